//! Error types for the audio backend.

use songforge_spec::BackendError;
use thiserror::Error;

/// Result type for audio operations.
pub type AudioResult<T> = Result<T, AudioError>;

/// Errors that can occur during song generation, export or playback.
#[derive(Debug, Error)]
pub enum AudioError {
    /// Invalid sample rate.
    #[error("invalid sample rate: {rate}")]
    InvalidSampleRate {
        /// The invalid sample rate.
        rate: u32,
    },

    /// Invalid duration.
    #[error("invalid duration: {duration} seconds")]
    InvalidDuration {
        /// The invalid duration.
        duration: f64,
    },

    /// Invalid tempo.
    #[error("invalid tempo: {tempo} BPM")]
    InvalidTempo {
        /// The invalid tempo.
        tempo: f64,
    },

    /// Invalid parameter value.
    #[error("invalid parameter '{name}': {message}")]
    InvalidParameter {
        /// Parameter name.
        name: String,
        /// Error message.
        message: String,
    },

    /// Generation was cancelled between bars. The partial buffer is dropped.
    #[error("generation cancelled after {completed_bars} of {total_bars} bars")]
    Cancelled {
        /// Bars fully rendered before cancellation.
        completed_bars: usize,
        /// Bars in the song.
        total_bars: usize,
    },

    /// The audio output could not be acquired.
    #[error("audio output unavailable: {message}")]
    ResourceUnavailable {
        /// Error message.
        message: String,
    },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Internal synthesis error.
    #[error("synthesis error: {message}")]
    Synthesis {
        /// Error message.
        message: String,
    },
}

impl AudioError {
    /// Creates an invalid parameter error.
    pub fn invalid_param(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Creates a synthesis error.
    pub fn synthesis(message: impl Into<String>) -> Self {
        Self::Synthesis {
            message: message.into(),
        }
    }

    /// Creates a resource-unavailable error.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::ResourceUnavailable {
            message: message.into(),
        }
    }
}

impl BackendError for AudioError {
    fn code(&self) -> &'static str {
        match self {
            AudioError::InvalidSampleRate { .. } => "AUDIO_001",
            AudioError::InvalidDuration { .. } => "AUDIO_002",
            AudioError::InvalidTempo { .. } => "AUDIO_003",
            AudioError::InvalidParameter { .. } => "AUDIO_004",
            AudioError::Cancelled { .. } => "AUDIO_005",
            AudioError::ResourceUnavailable { .. } => "AUDIO_006",
            AudioError::Io(_) => "AUDIO_007",
            AudioError::Synthesis { .. } => "AUDIO_008",
        }
    }

    fn category(&self) -> &'static str {
        "audio"
    }
}
