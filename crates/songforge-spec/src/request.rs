//! Song generation requests.

use serde::{Deserialize, Serialize};

use crate::error::SpecError;

/// Default output sample rate in Hz.
pub const DEFAULT_SAMPLE_RATE: u32 = 44_100;

/// Beats in one bar.
pub const BEATS_PER_BAR: usize = 4;

/// Bars a song of `duration_seconds` spans at `tempo_bpm`,
/// `ceil(duration / (4 × 60 / tempo))`.
///
/// Returns `None` unless both inputs are positive and finite and the count
/// fits in a `usize`.
pub fn bar_count(duration_seconds: f64, tempo_bpm: f64) -> Option<usize> {
    if !(duration_seconds.is_finite() && duration_seconds > 0.0) {
        return None;
    }
    if !(tempo_bpm.is_finite() && tempo_bpm > 0.0) {
        return None;
    }
    let bar_seconds = 60.0 / tempo_bpm * BEATS_PER_BAR as f64;
    let bars = (duration_seconds / bar_seconds).ceil();
    if bars.is_finite() && bars < usize::MAX as f64 {
        Some(bars as usize)
    } else {
        None
    }
}

/// Parameters for one generation run.
///
/// Ids are kept as strings: unknown moods, vocalists and languages are not
/// errors, they resolve to documented fallbacks at render time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SongRequest {
    /// Song title. Only used for the exported artifact.
    #[serde(default = "default_title")]
    pub title: String,
    /// Mood id ("uplifting", "chill", ...).
    #[serde(default = "default_mood")]
    pub mood: String,
    /// Song length in seconds.
    pub duration_seconds: f64,
    /// Tempo in beats per minute.
    pub tempo_bpm: f64,
    /// Vocalist id.
    #[serde(default = "default_vocalist")]
    pub vocalist_id: String,
    /// Language id.
    #[serde(default = "default_language")]
    pub language_id: String,
    /// Seed for every random draw in the run.
    #[serde(default)]
    pub seed: u32,
    /// Output sample rate in Hz.
    #[serde(default = "default_sample_rate")]
    pub sample_rate: u32,
}

fn default_title() -> String {
    "Untitled Song".to_string()
}

fn default_mood() -> String {
    "uplifting".to_string()
}

fn default_vocalist() -> String {
    "aria".to_string()
}

fn default_language() -> String {
    "english".to_string()
}

fn default_sample_rate() -> u32 {
    DEFAULT_SAMPLE_RATE
}

impl SongRequest {
    /// Creates a request with default title, ids, seed and sample rate.
    pub fn new(duration_seconds: f64, tempo_bpm: f64) -> Self {
        Self {
            title: default_title(),
            mood: default_mood(),
            duration_seconds,
            tempo_bpm,
            vocalist_id: default_vocalist(),
            language_id: default_language(),
            seed: 0,
            sample_rate: DEFAULT_SAMPLE_RATE,
        }
    }

    /// Sets the title.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Sets the mood id.
    pub fn mood(mut self, mood: impl Into<String>) -> Self {
        self.mood = mood.into();
        self
    }

    /// Sets the vocalist id.
    pub fn vocalist(mut self, vocalist_id: impl Into<String>) -> Self {
        self.vocalist_id = vocalist_id.into();
        self
    }

    /// Sets the language id.
    pub fn language(mut self, language_id: impl Into<String>) -> Self {
        self.language_id = language_id.into();
        self
    }

    /// Sets the seed.
    pub fn seed(mut self, seed: u32) -> Self {
        self.seed = seed;
        self
    }

    /// Sets the sample rate.
    pub fn sample_rate(mut self, sample_rate: u32) -> Self {
        self.sample_rate = sample_rate;
        self
    }

    /// Parses a request from JSON.
    pub fn from_json(json: &str) -> Result<Self, SpecError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Length of one beat in seconds.
    pub fn beat_seconds(&self) -> f64 {
        60.0 / self.tempo_bpm
    }

    /// Bars the song spans; see [`bar_count`].
    pub fn bar_count(&self) -> Option<usize> {
        bar_count(self.duration_seconds, self.tempo_bpm)
    }

    /// Number of samples per channel, `round(duration × sample_rate)`.
    pub fn num_samples(&self) -> usize {
        (self.duration_seconds * self.sample_rate as f64).round() as usize
    }
}
