//! JSON output types for machine-readable CLI output.
//!
//! Used by the `--json` flag on `generate` and `validate`.

use serde::{Deserialize, Serialize};
use songforge_backend_audio::{AudioError, RenderSummary};
use songforge_spec::BackendError;

use crate::input::InputError;

/// Error codes for CLI operations.
///
/// Validation and backend errors pass their own codes through (E00x, AUDIO_00x).
pub mod error_codes {
    /// File could not be read
    pub const FILE_READ: &str = "CLI_001";
    /// JSON parse error
    pub const JSON_PARSE: &str = "CLI_002";
    /// Custom catalog failed validation
    pub const INVALID_CATALOG: &str = "CLI_003";
    /// Output could not be written
    pub const WRITE_OUTPUT: &str = "CLI_004";
    /// JSON serialization error
    pub const JSON_SERIALIZE: &str = "CLI_005";
}

/// A structured error in JSON output.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct JsonError {
    /// Stable error code (e.g., "CLI_001", "E001", "AUDIO_005")
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Field path of the problem (if applicable)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Source file path (if applicable)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

impl JsonError {
    /// Creates a new error with code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            path: None,
            file: None,
        }
    }

    /// Sets the field path for this error.
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Sets the file path for this error.
    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }
}

/// A structured warning in JSON output.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct JsonWarning {
    /// Stable warning code (e.g., "W002")
    pub code: String,
    /// Human-readable warning message
    pub message: String,
    /// Field path of the problem (if applicable)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl JsonWarning {
    /// Creates a new warning with code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            path: None,
        }
    }

    /// Sets the field path for this warning.
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }
}

/// JSON output for the `validate` command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidateOutput {
    /// Whether validation succeeded (no errors)
    pub success: bool,
    /// Validation errors
    pub errors: Vec<JsonError>,
    /// Fallbacks the request would take
    pub warnings: Vec<JsonWarning>,
}

impl ValidateOutput {
    /// Creates a validate output; success is derived from `errors`.
    pub fn new(errors: Vec<JsonError>, warnings: Vec<JsonWarning>) -> Self {
        Self {
            success: errors.is_empty(),
            errors,
            warnings,
        }
    }
}

/// A file written by `generate`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GeneratedFile {
    /// Output path
    pub path: String,
    /// "wav" or "artifact"
    pub kind: String,
    /// BLAKE3 hash of the PCM payload (WAV only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pcm_hash: Option<String>,
}

/// JSON output for the `generate` command.
#[derive(Debug, Clone, Serialize)]
pub struct GenerateOutput {
    /// Whether generation succeeded
    pub success: bool,
    /// Errors encountered
    pub errors: Vec<JsonError>,
    /// Fallbacks taken
    pub warnings: Vec<JsonWarning>,
    /// Render facts (on success)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<RenderSummary>,
    /// Master policy applied at export
    #[serde(skip_serializing_if = "Option::is_none")]
    pub master: Option<String>,
    /// Files written (on success)
    pub outputs: Vec<GeneratedFile>,
    /// Wall-clock time in milliseconds
    pub duration_ms: u64,
}

impl GenerateOutput {
    /// Creates a successful generate output.
    pub fn success(
        summary: RenderSummary,
        master: String,
        outputs: Vec<GeneratedFile>,
        warnings: Vec<JsonWarning>,
        duration_ms: u64,
    ) -> Self {
        Self {
            success: true,
            errors: Vec::new(),
            warnings,
            summary: Some(summary),
            master: Some(master),
            outputs,
            duration_ms,
        }
    }

    /// Creates a failed generate output.
    pub fn failure(errors: Vec<JsonError>, warnings: Vec<JsonWarning>, duration_ms: u64) -> Self {
        Self {
            success: false,
            errors,
            warnings,
            summary: None,
            master: None,
            outputs: Vec::new(),
            duration_ms,
        }
    }
}

/// Converts an [`InputError`] to a [`JsonError`].
pub fn input_error_to_json(err: &InputError) -> JsonError {
    let code = match err {
        InputError::FileRead { .. } => error_codes::FILE_READ,
        InputError::JsonParse { .. } => error_codes::JSON_PARSE,
        InputError::InvalidCatalog { .. } => error_codes::INVALID_CATALOG,
    };
    JsonError::new(code, err.to_string()).with_file(err.path().display().to_string())
}

/// Converts a ValidationError to a JsonError.
pub fn validation_error_to_json(err: &songforge_spec::ValidationError) -> JsonError {
    let mut error = JsonError::new(err.code.to_string(), &err.message);
    if let Some(ref path) = err.path {
        error = error.with_path(path);
    }
    error
}

/// Converts a ValidationWarning to a JsonWarning.
pub fn validation_warning_to_json(warn: &songforge_spec::ValidationWarning) -> JsonWarning {
    let mut warning = JsonWarning::new(warn.code.to_string(), &warn.message);
    if let Some(ref path) = warn.path {
        warning = warning.with_path(path);
    }
    warning
}

/// Converts a backend error to a JsonError carrying its AUDIO_xxx code.
pub fn audio_error_to_json(err: &AudioError) -> JsonError {
    JsonError::new(err.code(), err.message())
}

/// Prints `value` as pretty JSON on stdout.
pub fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| anyhow::anyhow!("{}: {}", error_codes::JSON_SERIALIZE, e))?;
    println!("{}", json);
    Ok(())
}
