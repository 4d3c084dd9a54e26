//! SongForge Spec Library
//!
//! Types shared by the synthesis backend and the CLI: generation requests,
//! the vocalist/language catalogs, request validation and the exported song
//! artifact.
//!
//! # Example
//!
//! ```
//! use songforge_spec::{validate_request, Catalog, SongRequest};
//!
//! let catalog = Catalog::builtin();
//! let request = SongRequest::new(8.0, 120.0)
//!     .title("Demo")
//!     .mood("chill")
//!     .vocalist("zen")
//!     .language("japanese")
//!     .seed(42);
//!
//! let result = validate_request(&request, &catalog);
//! assert!(result.is_ok());
//! ```
//!
//! # Modules
//!
//! - [`artifact`]: Serializable song metadata (no samples)
//! - [`budget`]: Resource limits enforced by validation
//! - [`catalog`]: Vocalist and language profiles
//! - [`error`]: Error and warning types
//! - [`mood`]: The closed set of moods
//! - [`request`]: Generation request parameters
//! - [`validation`]: Request validation

pub mod artifact;
pub mod budget;
pub mod catalog;
pub mod error;
pub mod mood;
pub mod request;
pub mod validation;

// Re-export commonly used types at the crate root
pub use artifact::{epoch_millis_now, SongArtifact};
pub use budget::SongBudget;
pub use catalog::{
    Catalog, Characteristics, FormantModulation, LanguageProfile, Resolved, Rhythm, Timbre,
    VocalistProfile,
};
pub use error::{
    BackendError, ErrorCode, SpecError, ValidationError, ValidationResult, ValidationWarning,
    WarningCode,
};
pub use mood::Mood;
pub use request::{bar_count, SongRequest, BEATS_PER_BAR, DEFAULT_SAMPLE_RATE};
pub use validation::{validate_request, validate_request_with_budget};
