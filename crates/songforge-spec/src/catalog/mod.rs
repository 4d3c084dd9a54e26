//! Vocalist and language catalogs.
//!
//! Catalogs are read-only configuration. They are loaded once (either the
//! built-in tables or a JSON file) and then shared by every generation run.
//! Lookups never fail: an unknown id resolves to the catalog default and the
//! caller is told that a fallback happened.

mod builtin;


use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ErrorCode, SpecError, ValidationError, ValidationResult};

/// Waveform used when a vocalist is rendered as a plain oscillator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Timbre {
    /// Sine wave.
    #[default]
    Sine,
    /// Triangle wave.
    Triangle,
    /// Square wave.
    Square,
    /// Sawtooth wave.
    Sawtooth,
}

/// Expressive traits of a vocalist, each on a 0-10 scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Characteristics {
    /// Vocal power.
    pub power: f64,
    /// Emotional intensity.
    pub emotion: f64,
    /// Vocal range.
    pub range: f64,
}

/// A synthetic vocalist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VocalistProfile {
    /// Display name.
    pub name: String,
    /// Base pitch of vocal bursts in Hz.
    pub base_frequency_hz: f64,
    /// Harmonic multipliers; the first entry is the fundamental (1.0).
    pub harmonics: Vec<f64>,
    /// Oscillator waveform for previews.
    #[serde(default)]
    pub timbre: Timbre,
    /// Free-form style tag ("pop", "ambient", ...).
    #[serde(default)]
    pub style: String,
    /// Language ids this vocalist is tuned for.
    #[serde(default)]
    pub languages: Vec<String>,
    /// Power/emotion/range traits.
    pub characteristics: Characteristics,
}

impl VocalistProfile {
    /// Returns true if the vocalist lists the language id.
    pub fn supports_language(&self, language_id: &str) -> bool {
        self.languages.iter().any(|l| l == language_id)
    }

    /// Gain derived from emotion and power, `(emotion/10) * (power/10)`.
    pub fn expression_gain(&self) -> f64 {
        (self.characteristics.emotion / 10.0) * (self.characteristics.power / 10.0)
    }
}

/// Rhythmic character of a language. Descriptive only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rhythm {
    /// Even pacing.
    Moderate,
    /// Strong pulse.
    Rhythmic,
    /// Legato phrasing.
    Flowing,
    /// Clipped, exact phrasing.
    Precise,
    /// Sung phrasing.
    Melodic,
    /// One syllable per beat.
    Syllabic,
    /// Pitch-accented.
    Tonal,
}

/// Per-language modulation applied to each vocal harmonic.
///
/// A rough stand-in for vocal-tract colouring; it is not a real formant
/// filter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FormantModulation {
    /// Harmonics pass through unchanged.
    #[default]
    None,
    /// Multiply by `cos(2π · f · ratio · t)` where `f` is the harmonic's
    /// instantaneous frequency.
    Cosine {
        /// Modulation frequency as a fraction of the harmonic frequency.
        ratio: f64,
    },
}

impl FormantModulation {
    /// Returns the multiplier for a harmonic at `frequency` Hz, `t` seconds
    /// into the burst.
    #[inline]
    pub fn gain(&self, frequency: f64, t: f64) -> f64 {
        match *self {
            FormantModulation::None => 1.0,
            FormantModulation::Cosine { ratio } => {
                (2.0 * std::f64::consts::PI * frequency * ratio * t).cos()
            }
        }
    }
}

/// Phonetic profile of a language.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LanguageProfile {
    /// Vowel inventory. Descriptive only.
    #[serde(default)]
    pub vowels: Vec<String>,
    /// Syllable tokens drawn for each vocal burst.
    pub patterns: Vec<String>,
    /// Rhythmic character.
    pub rhythm: Rhythm,
    /// Pitch multiplier applied to melody and vocals.
    pub frequency_multiplier: f64,
    /// Harmonic modulation for vocals.
    #[serde(default)]
    pub formant: FormantModulation,
}

/// Outcome of a catalog lookup.
#[derive(Debug, Clone, Copy)]
pub struct Resolved<'a, T> {
    /// Id of the entry actually used.
    pub id: &'a str,
    /// The entry.
    pub profile: &'a T,
    /// True if the requested id was unknown and the default was used.
    pub fell_back: bool,
}

/// Vocalist and language catalogs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    /// Vocalist id used when a request names an unknown vocalist.
    pub default_vocalist: String,
    /// Language id used when a request names an unknown language.
    pub default_language: String,
    /// Vocalists keyed by id.
    pub vocalists: BTreeMap<String, VocalistProfile>,
    /// Languages keyed by id.
    pub languages: BTreeMap<String, LanguageProfile>,
}

impl Catalog {
    /// Returns the built-in catalog (six vocalists, nine languages).
    pub fn builtin() -> Self {
        builtin::catalog()
    }

    /// Parses a catalog from JSON.
    pub fn from_json(json: &str) -> Result<Self, SpecError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and parses a catalog file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SpecError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Serializes the catalog to pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String, SpecError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Looks up a vocalist, falling back to the default vocalist.
    ///
    /// # Panics
    /// Panics if the default vocalist is missing; [`Catalog::validate`]
    /// rejects such catalogs.
    pub fn vocalist<'a>(&'a self, id: &str) -> Resolved<'a, VocalistProfile> {
        self.try_vocalist(id)
            .expect("catalog default vocalist must exist (checked by Catalog::validate)")
    }

    /// Looks up a vocalist, falling back to the default vocalist. `None` if
    /// `id` is unknown and the default is missing too.
    pub fn try_vocalist<'a>(&'a self, id: &str) -> Option<Resolved<'a, VocalistProfile>> {
        resolve(&self.vocalists, id, &self.default_vocalist)
    }

    /// Looks up a language, falling back to the default language.
    ///
    /// # Panics
    /// Panics if the default language is missing; [`Catalog::validate`]
    /// rejects such catalogs.
    pub fn language<'a>(&'a self, id: &str) -> Resolved<'a, LanguageProfile> {
        self.try_language(id)
            .expect("catalog default language must exist (checked by Catalog::validate)")
    }

    /// Looks up a language, falling back to the default language. `None` if
    /// `id` is unknown and the default is missing too.
    pub fn try_language<'a>(&'a self, id: &str) -> Option<Resolved<'a, LanguageProfile>> {
        resolve(&self.languages, id, &self.default_language)
    }

    /// Checks structural invariants of the catalog.
    pub fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::success();

        if !self.vocalists.contains_key(&self.default_vocalist) {
            result.add_error(ValidationError::with_path(
                ErrorCode::MissingDefault,
                format!("default vocalist '{}' is not in the catalog", self.default_vocalist),
                "default_vocalist",
            ));
        }
        if !self.languages.contains_key(&self.default_language) {
            result.add_error(ValidationError::with_path(
                ErrorCode::MissingDefault,
                format!("default language '{}' is not in the catalog", self.default_language),
                "default_language",
            ));
        }

        for (id, vocalist) in &self.vocalists {
            validate_vocalist(id, vocalist, &mut result);
        }
        for (id, language) in &self.languages {
            validate_language(id, language, &mut result);
        }

        result
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

fn resolve<'a, T>(
    map: &'a BTreeMap<String, T>,
    id: &str,
    default: &str,
) -> Option<Resolved<'a, T>> {
    if let Some((key, profile)) = map.get_key_value(id) {
        return Some(Resolved {
            id: key.as_str(),
            profile,
            fell_back: false,
        });
    }
    map.get_key_value(default).map(|(key, profile)| Resolved {
        id: key.as_str(),
        profile,
        fell_back: true,
    })
}

fn validate_vocalist(id: &str, vocalist: &VocalistProfile, result: &mut ValidationResult) {
    let path = format!("vocalists.{}", id);

    if !(vocalist.base_frequency_hz.is_finite() && vocalist.base_frequency_hz > 0.0) {
        result.add_error(ValidationError::with_path(
            ErrorCode::InvalidVocalist,
            format!("base frequency must be positive, got {}", vocalist.base_frequency_hz),
            format!("{}.base_frequency_hz", path),
        ));
    }

    match vocalist.harmonics.first() {
        None => result.add_error(ValidationError::with_path(
            ErrorCode::InvalidVocalist,
            "harmonic list is empty",
            format!("{}.harmonics", path),
        )),
        Some(&first) if (first - 1.0).abs() > 1e-9 => result.add_error(ValidationError::with_path(
            ErrorCode::InvalidVocalist,
            format!("first harmonic must be the fundamental (1.0), got {}", first),
            format!("{}.harmonics[0]", path),
        )),
        Some(_) => {}
    }
    let non_positive = vocalist
        .harmonics
        .iter()
        .position(|h| !h.is_finite() || *h <= 0.0);
    if let Some(bad) = non_positive {
        result.add_error(ValidationError::with_path(
            ErrorCode::InvalidVocalist,
            "harmonic multipliers must be positive",
            format!("{}.harmonics[{}]", path, bad),
        ));
    }

    let traits = [
        ("power", vocalist.characteristics.power),
        ("emotion", vocalist.characteristics.emotion),
        ("range", vocalist.characteristics.range),
    ];
    for (name, value) in traits {
        if !(0.0..=10.0).contains(&value) {
            result.add_error(ValidationError::with_path(
                ErrorCode::InvalidVocalist,
                format!("{} must be within 0-10, got {}", name, value),
                format!("{}.characteristics.{}", path, name),
            ));
        }
    }
}

fn validate_language(id: &str, language: &LanguageProfile, result: &mut ValidationResult) {
    let path = format!("languages.{}", id);

    if language.patterns.is_empty() {
        result.add_error(ValidationError::with_path(
            ErrorCode::InvalidLanguage,
            "pattern set is empty",
            format!("{}.patterns", path),
        ));
    }
    if !(language.frequency_multiplier.is_finite() && language.frequency_multiplier > 0.0) {
        result.add_error(ValidationError::with_path(
            ErrorCode::InvalidLanguage,
            format!(
                "frequency multiplier must be positive, got {}",
                language.frequency_multiplier
            ),
            format!("{}.frequency_multiplier", path),
        ));
    }
}
