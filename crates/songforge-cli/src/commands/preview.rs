//! Preview command implementations
//!
//! Short audition renders of a vocalist: a single preview tone, or a stacked
//! harmony test. Both are written as WAV files.

use anyhow::{Context, Result};
use colored::Colorize;
use songforge_backend_audio::{
    render_harmony_test, render_vocalist_preview, MasterPolicy, StereoOutput, WavResult,
};
use std::path::Path;
use std::process::ExitCode;

use super::exit_code_for;
use super::generate::ensure_parent;
use crate::input::load_catalog;

fn write_audition(
    label: &str,
    buffer: &StereoOutput,
    sample_rate: u32,
    out: &Path,
) -> Result<ExitCode> {
    let wav = WavResult::from_stereo_output(&MasterPolicy::HardClip.apply(buffer), sample_rate);
    ensure_parent(out).with_context(|| format!("Failed to create {}", out.display()))?;
    wav.write_to_file(out)
        .with_context(|| format!("Failed to write {}", out.display()))?;

    println!(
        "{} {} ({:.2}s) -> {}",
        "Wrote".green().bold(),
        label,
        wav.duration_seconds(),
        out.display()
    );
    Ok(ExitCode::SUCCESS)
}

fn note_fallback(kind: &str, requested: &str, used: &str) {
    println!(
        "  {} unknown {} '{}', using '{}'",
        "!".yellow(),
        kind,
        requested,
        used
    );
}

/// Run the preview command: a 1.5 s tone in the vocalist's voice, pitched for
/// the language.
///
/// # Returns
/// Exit code: 0 success, 1 input error, 2 render error
pub fn run_preview(
    vocalist_id: &str,
    language_id: &str,
    catalog_path: Option<&Path>,
    sample_rate: u32,
    out: &Path,
) -> Result<ExitCode> {
    let catalog = load_catalog(catalog_path).context("Failed to load catalog")?;
    let vocalist = catalog.vocalist(vocalist_id);
    let language = catalog.language(language_id);

    println!(
        "{} {} in {}",
        "Preview:".cyan().bold(),
        vocalist.profile.name,
        language.id
    );
    if vocalist.fell_back {
        note_fallback("vocalist", vocalist_id, vocalist.id);
    }
    if language.fell_back {
        note_fallback("language", language_id, language.id);
    }
    if !vocalist.profile.supports_language(language.id) {
        println!(
            "  {} {} does not list {}",
            "!".yellow(),
            vocalist.profile.name,
            language.id
        );
    }

    let buffer = match render_vocalist_preview(vocalist.profile, language.profile, sample_rate) {
        Ok(buffer) => buffer,
        Err(e) => {
            println!("  {} {}", "x".red(), e);
            return Ok(exit_code_for(&e));
        }
    };
    write_audition("vocalist preview", &buffer, sample_rate, out)
}

/// Run the harmony command: the vocalist's first `layers + 1` harmonics
/// entering one after another over 2 s.
///
/// # Returns
/// Exit code: 0 success, 1 input error, 2 render error
pub fn run_harmony(
    vocalist_id: &str,
    layers: usize,
    catalog_path: Option<&Path>,
    sample_rate: u32,
    out: &Path,
) -> Result<ExitCode> {
    let catalog = load_catalog(catalog_path).context("Failed to load catalog")?;
    let vocalist = catalog.vocalist(vocalist_id);

    let voices = vocalist.profile.harmonics.len().min(layers.saturating_add(1));
    println!(
        "{} {} with {} voice(s)",
        "Harmony test:".cyan().bold(),
        vocalist.profile.name,
        voices
    );
    if vocalist.fell_back {
        note_fallback("vocalist", vocalist_id, vocalist.id);
    }

    let buffer = match render_harmony_test(vocalist.profile, layers, sample_rate) {
        Ok(buffer) => buffer,
        Err(e) => {
            println!("  {} {}", "x".red(), e);
            return Ok(exit_code_for(&e));
        }
    };
    write_audition("harmony test", &buffer, sample_rate, out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_writes_one_and_a_half_seconds() {
        let tmp = tempfile::tempdir().unwrap();
        let out = tmp.path().join("preview.wav");

        let code = run_preview("luna", "french", None, 8000, &out).unwrap();
        assert_eq!(code, ExitCode::SUCCESS);

        let reader = hound::WavReader::open(&out).unwrap();
        assert_eq!(reader.duration(), 12_000);
    }

    #[test]
    fn test_harmony_writes_two_seconds() {
        let tmp = tempfile::tempdir().unwrap();
        let out = tmp.path().join("nested").join("harmony.wav");

        let code = run_harmony("zen", 3, None, 8000, &out).unwrap();
        assert_eq!(code, ExitCode::SUCCESS);

        let reader = hound::WavReader::open(&out).unwrap();
        assert_eq!(reader.duration(), 16_000);
    }

    #[test]
    fn test_zero_sample_rate_is_input_error() {
        let tmp = tempfile::tempdir().unwrap();
        let out = tmp.path().join("bad.wav");

        let code = run_preview("aria", "english", None, 0, &out).unwrap();
        assert_eq!(code, ExitCode::from(1));
        assert!(!out.exists());
    }
}
