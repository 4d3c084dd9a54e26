//! Song moods.

use serde::{Deserialize, Serialize};

/// Mood of a song. Selects the chord progression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Mood {
    /// Bright major progression. Fallback for unknown moods.
    #[default]
    Uplifting,
    /// Minor-led ballad progression.
    Romantic,
    /// Driving E-minor progression.
    Energetic,
    /// Laid-back D-minor progression.
    Chill,
    /// B-minor progression.
    Mysterious,
    /// Cinematic A-minor progression.
    Epic,
}

impl Mood {
    /// All moods in declaration order.
    pub const ALL: [Mood; 6] = [
        Mood::Uplifting,
        Mood::Romantic,
        Mood::Energetic,
        Mood::Chill,
        Mood::Mysterious,
        Mood::Epic,
    ];

    /// Returns the string id used in requests and artifacts.
    pub fn id(&self) -> &'static str {
        match self {
            Mood::Uplifting => "uplifting",
            Mood::Romantic => "romantic",
            Mood::Energetic => "energetic",
            Mood::Chill => "chill",
            Mood::Mysterious => "mysterious",
            Mood::Epic => "epic",
        }
    }

    /// Looks up a mood by id (case-insensitive, surrounding whitespace ignored).
    pub fn from_id(id: &str) -> Option<Mood> {
        let id = id.trim();
        Mood::ALL
            .iter()
            .copied()
            .find(|mood| mood.id().eq_ignore_ascii_case(id))
    }

    /// Looks up a mood by id, falling back to [`Mood::Uplifting`].
    pub fn resolve(id: &str) -> Mood {
        Mood::from_id(id).unwrap_or_default()
    }
}

impl std::fmt::Display for Mood {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}
