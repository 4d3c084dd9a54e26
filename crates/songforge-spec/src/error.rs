//! Error types for request validation and catalog loading.

use thiserror::Error;

/// Error codes for request and catalog validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// E001: Duration is zero, negative or not finite
    InvalidDuration,
    /// E002: Tempo is zero, negative or not finite
    InvalidTempo,
    /// E003: Sample rate is zero or above the budget
    InvalidSampleRate,
    /// E004: A vocalist profile is malformed
    InvalidVocalist,
    /// E005: A language profile is malformed
    InvalidLanguage,
    /// E006: Catalog has no entry for its declared default
    MissingDefault,
    /// E007: Duration exceeds the budget
    DurationTooLong,
    /// E008: Tempo outside the budget range
    TempoOutOfRange,
    /// E009: Song would span more bars than the budget allows
    TooManyBars,
    /// E010: Song would need more frames than the budget allows
    TooManyFrames,
}

impl ErrorCode {
    /// Returns the error code string (e.g., "E001").
    pub fn code(&self) -> &'static str {
        match self {
            ErrorCode::InvalidDuration => "E001",
            ErrorCode::InvalidTempo => "E002",
            ErrorCode::InvalidSampleRate => "E003",
            ErrorCode::InvalidVocalist => "E004",
            ErrorCode::InvalidLanguage => "E005",
            ErrorCode::MissingDefault => "E006",
            ErrorCode::DurationTooLong => "E007",
            ErrorCode::TempoOutOfRange => "E008",
            ErrorCode::TooManyBars => "E009",
            ErrorCode::TooManyFrames => "E010",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Warning codes. Every warning describes a fallback that was taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WarningCode {
    /// W001: Unknown mood, uplifting used instead
    UnknownMood,
    /// W002: Unknown vocalist, catalog default used instead
    UnknownVocalist,
    /// W003: Unknown language, catalog default used instead
    UnknownLanguage,
    /// W004: Vocalist does not list the requested language
    UnsupportedLanguage,
    /// W005: Chord symbol missing from a frequency table
    UnknownChord,
}

impl WarningCode {
    /// Returns the warning code string (e.g., "W001").
    pub fn code(&self) -> &'static str {
        match self {
            WarningCode::UnknownMood => "W001",
            WarningCode::UnknownVocalist => "W002",
            WarningCode::UnknownLanguage => "W003",
            WarningCode::UnsupportedLanguage => "W004",
            WarningCode::UnknownChord => "W005",
        }
    }
}

impl std::fmt::Display for WarningCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A validation error with code, message, and optional field path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// The error code.
    pub code: ErrorCode,
    /// Human-readable error message.
    pub message: String,
    /// Path to the problematic field (e.g., "vocalists.aria.harmonics").
    pub path: Option<String>,
}

impl ValidationError {
    /// Creates a new validation error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            path: None,
        }
    }

    /// Creates a new validation error with a field path.
    pub fn with_path(code: ErrorCode, message: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            path: Some(path.into()),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(ref path) = self.path {
            write!(f, "{}: {} (at {})", self.code, self.message, path)
        } else {
            write!(f, "{}: {}", self.code, self.message)
        }
    }
}

impl std::error::Error for ValidationError {}

/// A validation warning with code, message, and optional field path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationWarning {
    /// The warning code.
    pub code: WarningCode,
    /// Human-readable warning message.
    pub message: String,
    /// Path to the problematic field.
    pub path: Option<String>,
}

impl ValidationWarning {
    /// Creates a new validation warning.
    pub fn new(code: WarningCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            path: None,
        }
    }

    /// Creates a new validation warning with a field path.
    pub fn with_path(
        code: WarningCode,
        message: impl Into<String>,
        path: impl Into<String>,
    ) -> Self {
        Self {
            code,
            message: message.into(),
            path: Some(path.into()),
        }
    }
}

impl std::fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(ref path) = self.path {
            write!(f, "{}: {} (at {})", self.code, self.message, path)
        } else {
            write!(f, "{}: {}", self.code, self.message)
        }
    }
}

/// Top-level error type for spec operations.
#[derive(Debug, Error)]
pub enum SpecError {
    /// Validation failed with one or more errors.
    #[error("validation failed with {0} error(s)")]
    ValidationFailed(usize),

    /// JSON parsing error.
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result of validation.
#[derive(Debug, Clone)]
pub struct ValidationResult {
    /// Whether validation passed (no errors).
    pub ok: bool,
    /// List of validation errors.
    pub errors: Vec<ValidationError>,
    /// List of validation warnings.
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationResult {
    /// Creates a successful validation result.
    pub fn success() -> Self {
        Self {
            ok: true,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Adds an error to the result.
    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
        self.ok = false;
    }

    /// Adds a warning to the result.
    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }

    /// Returns true if there are no errors.
    pub fn is_ok(&self) -> bool {
        self.ok
    }

    /// Returns true if any warning carries the given code.
    pub fn has_warning(&self, code: WarningCode) -> bool {
        self.warnings.iter().any(|w| w.code == code)
    }

    /// Converts to a Result, returning Err if there are errors.
    pub fn into_result(self) -> Result<Vec<ValidationWarning>, Vec<ValidationError>> {
        if self.ok {
            Ok(self.warnings)
        } else {
            Err(self.errors)
        }
    }
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::success()
    }
}

/// Common trait for backend errors.
///
/// Gives every backend error a stable code and a category so the CLI can
/// report failures uniformly.
pub trait BackendError: std::error::Error {
    /// Get the error code for reporting, e.g. "AUDIO_001".
    fn code(&self) -> &'static str;

    /// Get a human-readable message describing the error.
    fn message(&self) -> String {
        self.to_string()
    }

    /// Get the error category for grouping related errors.
    fn category(&self) -> &'static str;
}
