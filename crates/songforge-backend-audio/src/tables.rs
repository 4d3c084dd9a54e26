//! Chord progressions and per-chord frequency tables.
//!
//! Lookups return `None` for unknown symbols; the `*_or_default` helpers
//! apply the C fallback the generators use.

use songforge_spec::Mood;

/// Bass fundamental used for chords missing from [`BASS_FREQUENCIES`].
pub const FALLBACK_BASS_HZ: f64 = 65.41;

/// Notes per melody scale.
pub const SCALE_LEN: usize = 7;

/// A seven-note ascending scale in Hz.
pub type Scale = [f64; SCALE_LEN];

const C_MAJOR: Scale = [261.63, 293.66, 329.63, 349.23, 392.00, 440.00, 493.88];

/// Chord to bass fundamental (Hz).
pub const BASS_FREQUENCIES: &[(&str, f64)] = &[
    ("C", 65.41),
    ("D", 73.42),
    ("E", 82.41),
    ("F", 87.31),
    ("G", 98.00),
    ("A", 110.00),
    ("B", 123.47),
    ("Am", 110.00),
    ("Bm", 123.47),
    ("Dm", 73.42),
    ("Em", 82.41),
    ("Fm", 87.31),
    ("Gm", 98.00),
    ("Bb", 116.54),
];

/// Chord to melody scale.
pub const MELODY_SCALES: &[(&str, Scale)] = &[
    ("C", C_MAJOR),
    ("G", [392.00, 440.00, 493.88, 523.25, 587.33, 659.25, 739.99]),
    ("Am", [220.00, 246.94, 261.63, 293.66, 329.63, 369.99, 415.30]),
    ("F", [174.61, 196.00, 220.00, 233.08, 261.63, 293.66, 329.63]),
    ("D", [146.83, 164.81, 185.00, 196.00, 220.00, 246.94, 277.18]),
    ("Em", [164.81, 185.00, 196.00, 220.00, 246.94, 277.18, 311.13]),
    ("Dm", [146.83, 164.81, 174.61, 196.00, 220.00, 246.94, 261.63]),
    ("Bb", [116.54, 130.81, 146.83, 155.56, 174.61, 196.00, 220.00]),
    ("Bm", [123.47, 138.59, 146.83, 164.81, 185.00, 207.65, 220.00]),
];

/// The eight-bar progression for a mood.
pub fn progression(mood: Mood) -> &'static [&'static str] {
    match mood {
        Mood::Uplifting => &["C", "G", "Am", "F", "C", "G", "F", "C"],
        Mood::Romantic => &["Am", "F", "C", "G", "Am", "F", "G", "C"],
        Mood::Energetic => &["Em", "C", "D", "G", "Em", "C", "G", "D"],
        Mood::Chill => &["Dm", "Bb", "F", "C", "Dm", "Bb", "C", "F"],
        Mood::Mysterious => &["Bm", "G", "D", "A", "Bm", "G", "A", "D"],
        Mood::Epic => &["Am", "C", "G", "D", "Am", "F", "C", "G"],
    }
}

/// Bass fundamental for `chord`, if the table has one.
pub fn bass_frequency(chord: &str) -> Option<f64> {
    BASS_FREQUENCIES
        .iter()
        .find(|(name, _)| *name == chord)
        .map(|(_, hz)| *hz)
}

/// Bass fundamental for `chord`, falling back to C.
pub fn bass_frequency_or_default(chord: &str) -> f64 {
    bass_frequency(chord).unwrap_or(FALLBACK_BASS_HZ)
}

/// Melody scale for `chord`, if the table has one.
pub fn melody_scale(chord: &str) -> Option<&'static Scale> {
    MELODY_SCALES
        .iter()
        .find(|(name, _)| *name == chord)
        .map(|(_, scale)| scale)
}

/// Melody scale for `chord`, falling back to C major.
pub fn melody_scale_or_default(chord: &str) -> &'static Scale {
    melody_scale(chord).unwrap_or(&C_MAJOR)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progressions_are_eight_bars() {
        for mood in Mood::ALL {
            assert_eq!(progression(mood).len(), 8, "{}", mood);
        }
    }

    #[test]
    fn test_every_progression_chord_has_bass() {
        for mood in Mood::ALL {
            for chord in progression(mood) {
                assert!(bass_frequency(chord).is_some(), "{} in {}", chord, mood);
            }
        }
    }

    #[test]
    fn test_bass_lookup() {
        assert_eq!(bass_frequency("Bb"), Some(116.54));
        assert_eq!(bass_frequency("Am"), Some(110.0));
        assert_eq!(bass_frequency("X#"), None);
    }

    #[test]
    fn test_unknown_chord_falls_back_to_c() {
        assert_eq!(bass_frequency_or_default("X#"), FALLBACK_BASS_HZ);
        assert_eq!(melody_scale_or_default("X#"), &C_MAJOR);
        // A has a bass note but no scale
        assert_eq!(melody_scale_or_default("A"), &C_MAJOR);
    }

    #[test]
    fn test_scales_ascend() {
        for (chord, scale) in MELODY_SCALES {
            assert!(scale.windows(2).all(|w| w[0] < w[1]), "{}", chord);
        }
    }
}
