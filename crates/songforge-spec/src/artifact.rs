//! Exported song metadata.
//!
//! The artifact describes a generated song without its samples. Playback
//! needs the audio regenerated from the same request (and seed) or attached
//! separately as a WAV file.

use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::error::SpecError;
use crate::mood::Mood;
use crate::request::SongRequest;

/// Value of the artifact's `info` field.
pub const ARTIFACT_INFO: &str = "Generated by SongForge";
/// Value of the artifact's `format` field.
pub const ARTIFACT_FORMAT: &str = "Audio Composition Data";
/// Value of the artifact's `instructions` field.
pub const ARTIFACT_INSTRUCTIONS: &str = "Regenerate with the same request and seed to play";
/// Suffix appended to exported artifact file names.
pub const ARTIFACT_FILE_SUFFIX: &str = "_songforge.json";

/// Serializable record of a generated song.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SongArtifact {
    /// Song title.
    pub title: String,
    /// Mood actually used.
    pub mood: Mood,
    /// Duration in seconds.
    pub duration: f64,
    /// Tempo in BPM.
    pub tempo: f64,
    /// Vocalist id actually used.
    pub vocalist: String,
    /// Language id actually used.
    pub language: String,
    /// Seed of the run.
    pub seed: u32,
    /// Generation time in milliseconds since the Unix epoch.
    pub generated_at: u64,
    /// Producer description.
    pub info: String,
    /// Payload description.
    pub format: String,
    /// How to get the audio back.
    pub instructions: String,
}

impl SongArtifact {
    /// Builds an artifact from a request and the ids that were resolved for it.
    pub fn new(
        request: &SongRequest,
        mood: Mood,
        vocalist_id: &str,
        language_id: &str,
        generated_at: u64,
    ) -> Self {
        Self {
            title: request.title.clone(),
            mood,
            duration: request.duration_seconds,
            tempo: request.tempo_bpm,
            vocalist: vocalist_id.to_string(),
            language: language_id.to_string(),
            seed: request.seed,
            generated_at,
            info: ARTIFACT_INFO.to_string(),
            format: ARTIFACT_FORMAT.to_string(),
            instructions: ARTIFACT_INSTRUCTIONS.to_string(),
        }
    }

    /// File name for the exported artifact: whitespace runs in the title
    /// become `_`, followed by [`ARTIFACT_FILE_SUFFIX`].
    pub fn file_name(&self) -> String {
        let stem = self.title.split_whitespace().collect::<Vec<_>>().join("_");
        format!("{}{}", stem, ARTIFACT_FILE_SUFFIX)
    }

    /// Serializes the artifact to pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String, SpecError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parses an artifact from JSON.
    pub fn from_json(json: &str) -> Result<Self, SpecError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Rebuilds the request that produced this artifact.
    pub fn to_request(&self, sample_rate: u32) -> SongRequest {
        SongRequest::new(self.duration, self.tempo)
            .title(self.title.clone())
            .mood(self.mood.id())
            .vocalist(self.vocalist.clone())
            .language(self.language.clone())
            .seed(self.seed)
            .sample_rate(sample_rate)
    }
}

/// Milliseconds since the Unix epoch, or 0 if the clock is before it.
pub fn epoch_millis_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn artifact(title: &str) -> SongArtifact {
        let request = SongRequest::new(60.0, 120.0).title(title).seed(9);
        SongArtifact::new(&request, Mood::Epic, "nova", "korean", 1_700_000_000_000)
    }

    #[test]
    fn test_file_name_collapses_whitespace() {
        assert_eq!(
            artifact("My  First\tSong").file_name(),
            "My_First_Song_songforge.json"
        );
    }

    #[test]
    fn test_json_has_no_sample_data() {
        let json = artifact("Demo").to_json_pretty().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let mut keys: Vec<_> = value.as_object().unwrap().keys().cloned().collect();
        keys.sort();
        assert_eq!(
            keys,
            vec![
                "duration",
                "format",
                "generated_at",
                "info",
                "instructions",
                "language",
                "mood",
                "seed",
                "tempo",
                "title",
                "vocalist",
            ]
        );
        assert_eq!(value["mood"], "epic");
    }

    #[test]
    fn test_round_trip() {
        let original = artifact("Demo");
        let parsed = SongArtifact::from_json(&original.to_json_pretty().unwrap()).unwrap();
        assert_eq!(parsed, original);
    }

    #[test]
    fn test_to_request_restores_parameters() {
        let request = artifact("Demo").to_request(22_050);
        assert_eq!(request.title, "Demo");
        assert_eq!(request.mood, "epic");
        assert_eq!(request.vocalist_id, "nova");
        assert_eq!(request.language_id, "korean");
        assert_eq!(request.seed, 9);
        assert_eq!(request.sample_rate, 22_050);
    }
}
