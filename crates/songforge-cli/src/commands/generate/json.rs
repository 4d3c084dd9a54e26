//! JSON output mode for the generate command.

use anyhow::Result;
use songforge_spec::validate_request;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Instant;

use super::{render_with_progress, write_outputs, GenerateOptions};
use crate::commands::json_output::{
    audio_error_to_json, error_codes, input_error_to_json, print_json, validation_error_to_json,
    validation_warning_to_json, GenerateOutput, GeneratedFile, JsonError,
};
use crate::commands::{exit_status_for, EXIT_GENERATION_ERROR, EXIT_INPUT_ERROR};
use crate::input::{build_request, load_catalog};

fn fail(output: GenerateOutput, status: u8) -> Result<ExitCode> {
    print_json(&output)?;
    Ok(ExitCode::from(status))
}

/// Run generate with machine-readable JSON output.
pub fn run_json(options: &GenerateOptions) -> Result<ExitCode> {
    let start = Instant::now();
    let elapsed = || start.elapsed().as_millis() as u64;

    let inputs = load_catalog(options.catalog_path.as_deref()).and_then(|catalog| {
        build_request(options.request_path.as_deref(), &options.flags).map(|r| (catalog, r))
    });
    let (catalog, request) = match inputs {
        Ok(inputs) => inputs,
        Err(e) => {
            let output = GenerateOutput::failure(vec![input_error_to_json(&e)], vec![], elapsed());
            return fail(output, EXIT_INPUT_ERROR);
        }
    };

    let validation = validate_request(&request, &catalog);
    let warnings: Vec<_> = validation
        .warnings
        .iter()
        .map(validation_warning_to_json)
        .collect();
    if !validation.is_ok() {
        let errors = validation
            .errors
            .iter()
            .map(validation_error_to_json)
            .collect();
        return fail(
            GenerateOutput::failure(errors, warnings, elapsed()),
            EXIT_INPUT_ERROR,
        );
    }

    let render = match render_with_progress(request, Arc::new(catalog), |_| {}) {
        Ok(render) => render,
        Err(e) => {
            let output = GenerateOutput::failure(vec![audio_error_to_json(&e)], warnings, elapsed());
            return fail(output, exit_status_for(&e));
        }
    };
    // the render repeats the request warnings and adds chord fallbacks
    let warnings = render
        .warnings
        .iter()
        .map(validation_warning_to_json)
        .collect();

    let wav = render.to_wav(options.master);
    let written = match write_outputs(options, &render, &wav) {
        Ok(written) => written,
        Err(e) => {
            let error = JsonError::new(error_codes::WRITE_OUTPUT, e.to_string());
            return fail(
                GenerateOutput::failure(vec![error], warnings, elapsed()),
                EXIT_GENERATION_ERROR,
            );
        }
    };

    let mut outputs = vec![GeneratedFile {
        path: written.wav.display().to_string(),
        kind: "wav".to_string(),
        pcm_hash: Some(wav.pcm_hash.clone()),
    }];
    if let Some(artifact) = &written.artifact {
        outputs.push(GeneratedFile {
            path: artifact.display().to_string(),
            kind: "artifact".to_string(),
            pcm_hash: None,
        });
    }

    let output = GenerateOutput::success(
        render.summary,
        options.master.to_string(),
        outputs,
        warnings,
        elapsed(),
    );
    print_json(&output)?;
    Ok(ExitCode::SUCCESS)
}
