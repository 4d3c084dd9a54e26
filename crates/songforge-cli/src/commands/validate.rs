//! Validate command implementation
//!
//! Checks a request (and the catalog it will run against) without rendering.

use anyhow::{Context, Result};
use colored::Colorize;
use songforge_spec::{validate_request, ValidationResult};
use std::path::Path;
use std::process::ExitCode;

use super::json_output::{
    input_error_to_json, print_json, validation_error_to_json, validation_warning_to_json,
    ValidateOutput,
};
use super::{print_warnings, EXIT_INPUT_ERROR};
use crate::input::{build_request, load_catalog, RequestFlags};

/// Run the validate command
///
/// # Arguments
/// * `request_path` - Optional request JSON file
/// * `flags` - Request fields given on the command line
/// * `catalog_path` - Optional custom catalog
/// * `json_output` - Whether to output machine-readable JSON diagnostics
///
/// # Returns
/// Exit code: 0 if valid, 1 if invalid
pub fn run(
    request_path: Option<&Path>,
    flags: &RequestFlags,
    catalog_path: Option<&Path>,
    json_output: bool,
) -> Result<ExitCode> {
    if json_output {
        run_json(request_path, flags, catalog_path)
    } else {
        run_human(request_path, flags, catalog_path)
    }
}

fn exit_for(result: &ValidationResult) -> ExitCode {
    if result.is_ok() {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(EXIT_INPUT_ERROR)
    }
}

fn run_human(
    request_path: Option<&Path>,
    flags: &RequestFlags,
    catalog_path: Option<&Path>,
) -> Result<ExitCode> {
    let catalog = load_catalog(catalog_path).context("Failed to load catalog")?;
    let request = build_request(request_path, flags).context("Failed to load request")?;

    let source = request_path
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "command-line flags".to_string());
    println!("{} {}", "Validating:".cyan().bold(), source);

    let result = validate_request(&request, &catalog);
    for error in &result.errors {
        println!("  {} {}", "x".red(), error);
    }
    print_warnings(&result.warnings);

    if result.is_ok() {
        println!(
            "\n{} {} bars of {} at {} BPM",
            "SUCCESS".green().bold(),
            request.bar_count().unwrap_or_default(),
            request.mood,
            request.tempo_bpm
        );
    } else {
        println!(
            "\n{} with {} error(s)",
            "FAILED".red().bold(),
            result.errors.len()
        );
    }
    Ok(exit_for(&result))
}

fn run_json(
    request_path: Option<&Path>,
    flags: &RequestFlags,
    catalog_path: Option<&Path>,
) -> Result<ExitCode> {
    let inputs = load_catalog(catalog_path)
        .and_then(|catalog| build_request(request_path, flags).map(|r| (catalog, r)));
    let (catalog, request) = match inputs {
        Ok(inputs) => inputs,
        Err(e) => {
            print_json(&ValidateOutput::new(vec![input_error_to_json(&e)], vec![]))?;
            return Ok(ExitCode::from(EXIT_INPUT_ERROR));
        }
    };

    let result = validate_request(&request, &catalog);
    let output = ValidateOutput::new(
        result.errors.iter().map(validation_error_to_json).collect(),
        result
            .warnings
            .iter()
            .map(validation_warning_to_json)
            .collect(),
    );
    print_json(&output)?;
    Ok(exit_for(&result))
}
