//! Built-in vocalist and language tables.

use std::collections::BTreeMap;

use super::{
    Catalog, Characteristics, FormantModulation, LanguageProfile, Rhythm, Timbre, VocalistProfile,
};

/// Modulation ratio used by the syllabic/tonal languages that colour vocals.
const TONAL_FORMANT_RATIO: f64 = 0.001;

pub(super) fn catalog() -> Catalog {
    Catalog {
        default_vocalist: "aria".to_string(),
        default_language: "english".to_string(),
        vocalists: vocalists(),
        languages: languages(),
    }
}

#[allow(clippy::too_many_arguments)]
fn vocalist(
    name: &str,
    base_frequency_hz: f64,
    harmonics: &[f64],
    timbre: Timbre,
    style: &str,
    languages: &[&str],
    (power, emotion, range): (f64, f64, f64),
) -> VocalistProfile {
    VocalistProfile {
        name: name.to_string(),
        base_frequency_hz,
        harmonics: harmonics.to_vec(),
        timbre,
        style: style.to_string(),
        languages: languages.iter().map(|l| l.to_string()).collect(),
        characteristics: Characteristics {
            power,
            emotion,
            range,
        },
    }
}

fn vocalists() -> BTreeMap<String, VocalistProfile> {
    let entries = [
        (
            "aria",
            vocalist(
                "Aria",
                261.63,
                &[1.0, 1.2, 1.5, 2.0, 2.5],
                Timbre::Sine,
                "pop",
                &["english", "spanish", "french", "italian"],
                (8.0, 9.0, 7.0),
            ),
        ),
        (
            "nova",
            vocalist(
                "Nova",
                220.00,
                &[1.0, 1.5, 2.0, 3.0, 4.0],
                Timbre::Triangle,
                "electronic",
                &["english", "german", "japanese", "korean"],
                (7.0, 6.0, 9.0),
            ),
        ),
        (
            "zen",
            vocalist(
                "Zen",
                196.00,
                &[1.0, 1.2, 1.8, 2.4],
                Timbre::Sine,
                "ambient",
                &["english", "chinese", "japanese", "hindi"],
                (5.0, 10.0, 6.0),
            ),
        ),
        (
            "cyber",
            vocalist(
                "Cyber",
                293.66,
                &[1.0, 2.0, 3.0, 4.0, 5.0],
                Timbre::Square,
                "robotic",
                &["english", "german", "japanese", "korean"],
                (9.0, 4.0, 8.0),
            ),
        ),
        (
            "luna",
            vocalist(
                "Luna",
                277.18,
                &[1.0, 1.3, 1.6, 2.0, 2.6, 3.2],
                Timbre::Sine,
                "classical",
                &["english", "italian", "french", "german"],
                (6.0, 8.0, 10.0),
            ),
        ),
        (
            "blaze",
            vocalist(
                "Blaze",
                246.94,
                &[1.0, 1.5, 2.0, 2.5, 3.0, 4.0],
                Timbre::Sawtooth,
                "rock",
                &["english", "spanish", "german"],
                (10.0, 7.0, 8.0),
            ),
        ),
    ];

    entries
        .into_iter()
        .map(|(id, profile)| (id.to_string(), profile))
        .collect()
}

fn language(
    vowels: &[&str],
    patterns: &[&str],
    rhythm: Rhythm,
    frequency_multiplier: f64,
    formant: FormantModulation,
) -> LanguageProfile {
    LanguageProfile {
        vowels: vowels.iter().map(|v| v.to_string()).collect(),
        patterns: patterns.iter().map(|p| p.to_string()).collect(),
        rhythm,
        frequency_multiplier,
        formant,
    }
}

fn languages() -> BTreeMap<String, LanguageProfile> {
    let plain = FormantModulation::None;
    let tonal = FormantModulation::Cosine {
        ratio: TONAL_FORMANT_RATIO,
    };
    let five = ["a", "e", "i", "o", "u"];
    let five_jp = ["a", "i", "u", "e", "o"];

    let entries = [
        (
            "english",
            language(
                &five,
                &["ah", "eh", "ih", "oh", "uh", "ay", "oy"],
                Rhythm::Moderate,
                1.0,
                plain,
            ),
        ),
        (
            "spanish",
            language(
                &five,
                &["ah", "eh", "ee", "oh", "oo", "ya", "wa"],
                Rhythm::Rhythmic,
                1.1,
                plain,
            ),
        ),
        (
            "french",
            language(
                &["a", "e", "i", "o", "u", "y"],
                &["ah", "eh", "ee", "oh", "oo", "eu", "on"],
                Rhythm::Flowing,
                1.05,
                plain,
            ),
        ),
        (
            "german",
            language(
                &["a", "e", "i", "o", "u", "ä", "ö", "ü"],
                &["ah", "eh", "ih", "oh", "uh", "ay", "oy", "uw"],
                Rhythm::Precise,
                0.95,
                plain,
            ),
        ),
        (
            "italian",
            language(
                &five,
                &["ah", "eh", "ee", "oh", "oo", "ia", "io"],
                Rhythm::Melodic,
                1.08,
                plain,
            ),
        ),
        (
            "japanese",
            language(
                &five_jp,
                &["ah", "ee", "oo", "eh", "oh", "ya", "yo", "yu"],
                Rhythm::Syllabic,
                1.15,
                tonal,
            ),
        ),
        (
            "korean",
            language(
                &five_jp,
                &["ah", "ee", "oo", "eh", "oh", "ya", "yo", "wa"],
                Rhythm::Tonal,
                1.12,
                tonal,
            ),
        ),
        (
            "chinese",
            language(
                &five_jp,
                &["ah", "ee", "oo", "eh", "oh", "ai", "ao", "ou"],
                Rhythm::Tonal,
                1.18,
                plain,
            ),
        ),
        (
            "hindi",
            language(
                &five_jp,
                &["ah", "ee", "oo", "eh", "oh", "ai", "au", "am"],
                Rhythm::Rhythmic,
                1.14,
                plain,
            ),
        ),
    ];

    entries
        .into_iter()
        .map(|(id, profile)| (id.to_string(), profile))
        .collect()
}
