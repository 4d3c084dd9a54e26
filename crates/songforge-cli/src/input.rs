//! Loading requests and catalogs from disk and command-line flags.
//!
//! A request comes from a JSON file, from flags, or from both: flags that are
//! set override the matching fields of the file.

use std::path::{Path, PathBuf};

use songforge_spec::{Catalog, SongRequest};

/// Song length used when neither a request file nor `--duration` is given.
pub const DEFAULT_DURATION_SECONDS: f64 = 60.0;

/// Tempo used when neither a request file nor `--tempo` is given.
pub const DEFAULT_TEMPO_BPM: f64 = 120.0;

/// Errors that can occur while loading inputs.
#[derive(Debug)]
pub enum InputError {
    /// File could not be read.
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// JSON parsing failed.
    JsonParse { path: PathBuf, message: String },

    /// A custom catalog failed validation.
    InvalidCatalog { path: PathBuf, message: String },
}

impl std::fmt::Display for InputError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InputError::FileRead { path, source } => {
                write!(f, "failed to read file '{}': {}", path.display(), source)
            }
            InputError::JsonParse { path, message } => {
                write!(f, "JSON parse error in '{}': {}", path.display(), message)
            }
            InputError::InvalidCatalog { path, message } => {
                write!(f, "invalid catalog '{}': {}", path.display(), message)
            }
        }
    }
}

impl std::error::Error for InputError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            InputError::FileRead { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl InputError {
    /// The file the error refers to.
    pub fn path(&self) -> &Path {
        match self {
            InputError::FileRead { path, .. }
            | InputError::JsonParse { path, .. }
            | InputError::InvalidCatalog { path, .. } => path,
        }
    }
}

fn read_file(path: &Path) -> Result<String, InputError> {
    std::fs::read_to_string(path).map_err(|source| InputError::FileRead {
        path: path.to_path_buf(),
        source,
    })
}

/// Loads a [`SongRequest`] from a JSON file.
pub fn load_request(path: &Path) -> Result<SongRequest, InputError> {
    let content = read_file(path)?;
    SongRequest::from_json(&content).map_err(|e| InputError::JsonParse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Loads a catalog from `path`, or the built-in catalog when `path` is `None`.
///
/// A loaded catalog must pass [`Catalog::validate`]; its warnings are ignored.
pub fn load_catalog(path: Option<&Path>) -> Result<Catalog, InputError> {
    let Some(path) = path else {
        return Ok(Catalog::builtin());
    };

    let content = read_file(path)?;
    let catalog = Catalog::from_json(&content).map_err(|e| InputError::JsonParse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let result = catalog.validate();
    if let Some(first) = result.errors.first() {
        return Err(InputError::InvalidCatalog {
            path: path.to_path_buf(),
            message: first.to_string(),
        });
    }
    tracing::debug!(
        path = %path.display(),
        vocalists = catalog.vocalists.len(),
        languages = catalog.languages.len(),
        "loaded catalog"
    );
    Ok(catalog)
}

/// Request fields given on the command line.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestFlags {
    pub title: Option<String>,
    pub mood: Option<String>,
    pub duration: Option<f64>,
    pub tempo: Option<f64>,
    pub vocalist: Option<String>,
    pub language: Option<String>,
    pub seed: Option<u32>,
    pub sample_rate: Option<u32>,
}

impl RequestFlags {
    /// Overrides the fields of `request` that are set.
    pub fn apply(&self, mut request: SongRequest) -> SongRequest {
        if let Some(title) = &self.title {
            request.title = title.clone();
        }
        if let Some(mood) = &self.mood {
            request.mood = mood.clone();
        }
        if let Some(duration) = self.duration {
            request.duration_seconds = duration;
        }
        if let Some(tempo) = self.tempo {
            request.tempo_bpm = tempo;
        }
        if let Some(vocalist) = &self.vocalist {
            request.vocalist_id = vocalist.clone();
        }
        if let Some(language) = &self.language {
            request.language_id = language.clone();
        }
        if let Some(seed) = self.seed {
            request.seed = seed;
        }
        if let Some(sample_rate) = self.sample_rate {
            request.sample_rate = sample_rate;
        }
        request
    }
}

/// Builds the request for a run from an optional file plus flags.
pub fn build_request(path: Option<&Path>, flags: &RequestFlags) -> Result<SongRequest, InputError> {
    let base = match path {
        Some(path) => load_request(path)?,
        None => SongRequest::new(DEFAULT_DURATION_SECONDS, DEFAULT_TEMPO_BPM),
    };
    Ok(flags.apply(base))
}
