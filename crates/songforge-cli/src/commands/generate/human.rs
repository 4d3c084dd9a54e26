//! Human-readable (colored) output mode for the generate command.

use anyhow::{Context, Result};
use colored::Colorize;
use songforge_backend_audio::Progress;
use songforge_spec::validate_request;
use std::io::Write;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Instant;

use super::{render_with_progress, write_outputs, GenerateOptions};
use crate::commands::{exit_code_for, print_warnings, EXIT_GENERATION_ERROR, EXIT_INPUT_ERROR};
use crate::input::{build_request, load_catalog};

const PROGRESS_WIDTH: usize = 24;

fn draw_progress(progress: Progress) {
    let filled = (progress.fraction() * PROGRESS_WIDTH as f64).round() as usize;
    let bar = format!(
        "{}{}",
        "#".repeat(filled),
        " ".repeat(PROGRESS_WIDTH.saturating_sub(filled))
    );
    let mut stderr = std::io::stderr();
    let _ = write!(
        stderr,
        "\r  [{}] {}/{} bars",
        bar.cyan(),
        progress.completed_bars,
        progress.total_bars
    );
    let _ = stderr.flush();
}

/// Run generate with human-readable (colored) output.
pub fn run_human(options: &GenerateOptions) -> Result<ExitCode> {
    let start = Instant::now();

    let catalog = load_catalog(options.catalog_path.as_deref()).context("Failed to load catalog")?;
    let request = build_request(options.request_path.as_deref(), &options.flags)
        .context("Failed to load request")?;

    println!("{} {}", "Generating:".cyan().bold(), request.title);
    println!(
        "{} {} @ {} BPM, {}s, seed {}",
        "Request:".dimmed(),
        request.mood,
        request.tempo_bpm,
        request.duration_seconds,
        request.seed
    );

    let validation = validate_request(&request, &catalog);
    if !validation.is_ok() {
        for error in &validation.errors {
            println!("  {} {}", "x".red(), error);
        }
        println!("\n{}", "FAILED".red().bold());
        return Ok(ExitCode::from(EXIT_INPUT_ERROR));
    }

    let render = match render_with_progress(request, Arc::new(catalog), draw_progress) {
        Ok(render) => {
            eprintln!();
            render
        }
        Err(e) => {
            eprintln!();
            println!("  {} {}", "x".red(), e);
            println!("\n{}", "FAILED".red().bold());
            return Ok(exit_code_for(&e));
        }
    };
    print_warnings(&render.warnings);

    let wav = render.to_wav(options.master);
    let written = match write_outputs(options, &render, &wav) {
        Ok(written) => written,
        Err(e) => {
            println!("  {} failed to write output: {}", "x".red(), e);
            println!("\n{}", "FAILED".red().bold());
            return Ok(ExitCode::from(EXIT_GENERATION_ERROR));
        }
    };

    let summary = &render.summary;
    println!("  {} {}", "Vocalist:".dimmed(), summary.vocalist);
    println!("  {} {}", "Language:".dimmed(), summary.language);
    println!(
        "  {} {} ({})",
        "Bars:".dimmed(),
        summary.total_bars,
        summary.chords.join(" ")
    );
    println!("  {} {:?}", "Vocal bars:".dimmed(), summary.vocal_bars);
    let clip_note = if summary.clipped {
        " exceeds full scale".yellow()
    } else {
        "".normal()
    };
    println!("  {} {:.3}{}", "Peak:".dimmed(), summary.peak, clip_note);
    println!("  {} {}", "Master:".dimmed(), options.master);
    println!("  {} {}", "Output:".dimmed(), written.wav.display());
    println!("  {} {}", "PCM hash:".dimmed(), &wav.pcm_hash[..16]);
    if let Some(artifact) = &written.artifact {
        println!("  {} {}", "Artifact:".dimmed(), artifact.display());
    }

    println!(
        "\n{} in {}ms",
        "SUCCESS".green().bold(),
        start.elapsed().as_millis()
    );
    Ok(ExitCode::SUCCESS)
}
