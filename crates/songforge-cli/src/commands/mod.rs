//! CLI command implementations

pub mod catalog;
pub mod generate;
pub mod json_output;
pub mod play;
pub mod preview;
pub mod validate;

use colored::Colorize;
use songforge_backend_audio::AudioError;
use songforge_spec::ValidationWarning;
use std::process::ExitCode;

/// Exit code for bad input: unreadable files, invalid requests or catalogs.
pub const EXIT_INPUT_ERROR: u8 = 1;

/// Exit code for failures during synthesis or export.
pub const EXIT_GENERATION_ERROR: u8 = 2;

/// Exit status a backend error should produce.
pub fn exit_status_for(err: &AudioError) -> u8 {
    match err {
        AudioError::InvalidSampleRate { .. }
        | AudioError::InvalidDuration { .. }
        | AudioError::InvalidTempo { .. }
        | AudioError::InvalidParameter { .. } => EXIT_INPUT_ERROR,
        _ => EXIT_GENERATION_ERROR,
    }
}

/// [`exit_status_for`] as an [`ExitCode`].
pub fn exit_code_for(err: &AudioError) -> ExitCode {
    ExitCode::from(exit_status_for(err))
}

/// Prints fallback warnings in the human output style.
pub(crate) fn print_warnings(warnings: &[ValidationWarning]) {
    for warning in warnings {
        let path = warning
            .path
            .as_ref()
            .map(|p| format!(" at {}", p))
            .unwrap_or_default();
        println!(
            "  {} [{}]{}: {}",
            "!".yellow(),
            warning.code,
            path.dimmed(),
            warning.message
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes_split_input_from_generation() {
        assert_eq!(
            exit_status_for(&AudioError::InvalidTempo { tempo: 0.0 }),
            EXIT_INPUT_ERROR
        );
        assert_eq!(
            exit_status_for(&AudioError::invalid_param("catalog", "empty")),
            EXIT_INPUT_ERROR
        );
        assert_eq!(
            exit_status_for(&AudioError::synthesis("bad")),
            EXIT_GENERATION_ERROR
        );
        assert_eq!(
            exit_status_for(&AudioError::Cancelled {
                completed_bars: 0,
                total_bars: 2
            }),
            EXIT_GENERATION_ERROR
        );
    }
}
