//! Short audition renders for a single vocalist.
//!
//! Neither render uses randomness; both are pure functions of the profile.

use songforge_spec::{LanguageProfile, SongBudget, VocalistProfile};

use crate::error::{AudioError, AudioResult};
use crate::filter::BiquadFilter;
use crate::mixer::StereoOutput;
use crate::oscillator::{self, PhaseAccumulator, TWO_PI};

/// Length of a vocalist preview.
pub const PREVIEW_SECONDS: f64 = 1.5;
/// Length of a harmony test.
pub const HARMONY_SECONDS: f64 = 2.0;

const PREVIEW_VIBRATO_HZ: f64 = 5.0;
const PREVIEW_VIBRATO_DEPTH_HZ: f64 = 10.0;
const PREVIEW_FILTER_Q: f64 = 8.0;

const HARMONY_STAGGER_SECONDS: f64 = 0.1;
const HARMONY_ATTACK_SECONDS: f64 = 0.2;
const HARMONY_GAIN: f64 = 0.2;

/// Linear interpolation through `(time, level)` breakpoints, holding the
/// first and last levels outside them.
fn breakpoint_envelope(points: &[(f64, f64)], t: f64) -> f64 {
    let Some(&(first_t, first_v)) = points.first() else {
        return 0.0;
    };
    if t <= first_t {
        return first_v;
    }
    for pair in points.windows(2) {
        let (t0, v0) = pair[0];
        let (t1, v1) = pair[1];
        if t <= t1 {
            if t1 <= t0 {
                return v1;
            }
            return v0 + (v1 - v0) * (t - t0) / (t1 - t0);
        }
    }
    points.last().map_or(0.0, |&(_, v)| v)
}

fn check_sample_rate(sample_rate: u32) -> AudioResult<f64> {
    if sample_rate == 0 || sample_rate > SongBudget::DEFAULT_MAX_SAMPLE_RATE {
        return Err(AudioError::InvalidSampleRate { rate: sample_rate });
    }
    Ok(sample_rate as f64)
}

/// Level of the preview tone at `t` seconds.
pub fn preview_envelope(t: f64) -> f64 {
    breakpoint_envelope(
        &[
            (0.0, 0.0),
            (0.1, 0.3),
            (0.3, 0.25),
            (PREVIEW_SECONDS - 0.3, 0.2),
            (PREVIEW_SECONDS, 0.0),
        ],
        t,
    )
}

/// Renders a 1.5 s tone in the vocalist's timbre at the language-shifted
/// base pitch, with vibrato and a band-pass at twice the base frequency.
pub fn render_vocalist_preview(
    vocalist: &VocalistProfile,
    language: &LanguageProfile,
    sample_rate: u32,
) -> AudioResult<StereoOutput> {
    let sr = check_sample_rate(sample_rate)?;
    let num_samples = (PREVIEW_SECONDS * sr).round() as usize;
    let pitch = vocalist.base_frequency_hz * language.frequency_multiplier;

    let mut phase = PhaseAccumulator::new(sr);
    let mut filter =
        BiquadFilter::bandpass(vocalist.base_frequency_hz * 2.0, PREVIEW_FILTER_Q, sr);

    let mono = (0..num_samples)
        .map(|i| {
            let t = i as f64 / sr;
            let vibrato = (TWO_PI * PREVIEW_VIBRATO_HZ * t).sin() * PREVIEW_VIBRATO_DEPTH_HZ;
            let tone = oscillator::waveform(vocalist.timbre, phase.advance(pitch + vibrato));
            filter.process(tone) * preview_envelope(t)
        })
        .collect();

    Ok(StereoOutput::from_mono(mono))
}

/// Gain of harmony layer `layer` at `t` seconds into the test.
pub fn harmony_layer_gain(layer: usize, t: f64) -> f64 {
    let onset = layer as f64 * HARMONY_STAGGER_SECONDS;
    if t < onset {
        return 0.0;
    }
    let peak = HARMONY_GAIN / (layer + 1) as f64;
    breakpoint_envelope(
        &[(0.0, 0.0), (HARMONY_ATTACK_SECONDS, peak), (HARMONY_SECONDS, 0.0)],
        t,
    )
}

/// Renders the first `layers + 1` harmonics of the vocalist as stacked tones
/// entering 100 ms apart.
pub fn render_harmony_test(
    vocalist: &VocalistProfile,
    layers: usize,
    sample_rate: u32,
) -> AudioResult<StereoOutput> {
    let sr = check_sample_rate(sample_rate)?;
    let num_samples = (HARMONY_SECONDS * sr).round() as usize;
    let voices = vocalist.harmonics.len().min(layers.saturating_add(1));
    let mut out = StereoOutput::new(num_samples);

    for (layer, harmonic) in vocalist.harmonics.iter().take(voices).enumerate() {
        let frequency = vocalist.base_frequency_hz * harmonic;
        let onset = (layer as f64 * HARMONY_STAGGER_SECONDS * sr).round() as usize;
        let mut phase = PhaseAccumulator::new(sr);

        for i in out.window(onset, num_samples) {
            let t = i as f64 / sr;
            let tone = oscillator::waveform(vocalist.timbre, phase.advance(frequency));
            out.add_centered(i, tone * harmony_layer_gain(layer, t));
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mixer::peak;
    use songforge_spec::Catalog;

    #[test]
    fn test_breakpoints() {
        let points = [(0.0, 0.0), (1.0, 1.0), (3.0, 0.0)];
        assert_eq!(breakpoint_envelope(&points, -1.0), 0.0);
        assert_eq!(breakpoint_envelope(&points, 0.5), 0.5);
        assert_eq!(breakpoint_envelope(&points, 2.0), 0.5);
        assert_eq!(breakpoint_envelope(&points, 5.0), 0.0);
        assert_eq!(breakpoint_envelope(&[], 1.0), 0.0);
    }

    #[test]
    fn test_preview_envelope_points() {
        assert_eq!(preview_envelope(0.0), 0.0);
        assert!((preview_envelope(0.1) - 0.3).abs() < 1e-12);
        assert!((preview_envelope(0.3) - 0.25).abs() < 1e-12);
        assert!((preview_envelope(1.2) - 0.2).abs() < 1e-12);
        assert_eq!(preview_envelope(PREVIEW_SECONDS), 0.0);
    }

    #[test]
    fn test_preview_length_and_level() {
        let catalog = Catalog::builtin();
        for (id, vocalist) in &catalog.vocalists {
            let out =
                render_vocalist_preview(vocalist, catalog.language("english").profile, 22050)
                    .unwrap();
            assert_eq!(out.len(), 33075, "{}", id);
            assert!(out.is_mono());
            assert!(peak(&out) > 0.0, "{}", id);
            assert!(peak(&out) < 1.0, "{}", id);
        }
    }

    #[test]
    fn test_preview_is_deterministic() {
        let catalog = Catalog::builtin();
        let v = catalog.vocalist("cyber").profile;
        let l = catalog.language("japanese").profile;
        assert_eq!(
            render_vocalist_preview(v, l, 8000).unwrap(),
            render_vocalist_preview(v, l, 8000).unwrap()
        );
    }

    #[test]
    fn test_preview_rejects_unusable_rates() {
        let catalog = Catalog::builtin();
        let err = render_vocalist_preview(
            catalog.vocalist("aria").profile,
            catalog.language("english").profile,
            0,
        )
        .unwrap_err();
        assert!(matches!(err, AudioError::InvalidSampleRate { rate: 0 }));

        let err = render_harmony_test(catalog.vocalist("zen").profile, 3, u32::MAX).unwrap_err();
        assert!(matches!(err, AudioError::InvalidSampleRate { .. }));
    }

    #[test]
    fn test_harmony_layer_gain() {
        assert_eq!(harmony_layer_gain(0, 0.0), 0.0);
        assert!((harmony_layer_gain(0, 0.2) - 0.2).abs() < 1e-12);
        assert!((harmony_layer_gain(1, 0.2) - 0.1).abs() < 1e-12);
        assert_eq!(harmony_layer_gain(2, 0.15), 0.0);
        assert!(harmony_layer_gain(2, 0.25) > 0.0);
        assert!(harmony_layer_gain(0, HARMONY_SECONDS).abs() < 1e-12);
    }

    #[test]
    fn test_harmony_layers_enter_staggered() {
        let catalog = Catalog::builtin();
        let v = catalog.vocalist("aria").profile;
        let sr = 1000;

        let one = render_harmony_test(v, 0, sr).unwrap();
        let two = render_harmony_test(v, 1, sr).unwrap();
        assert_eq!(one.len(), 2000);
        // second layer starts at 100 ms
        assert_eq!(one.left[..100], two.left[..100]);
        assert_ne!(one.left[100..300], two.left[100..300]);
    }

    #[test]
    fn test_harmony_layers_capped_by_harmonics() {
        let catalog = Catalog::builtin();
        let v = catalog.vocalist("zen").profile;
        let all = render_harmony_test(v, v.harmonics.len() - 1, 4000).unwrap();
        let more = render_harmony_test(v, 50, 4000).unwrap();
        assert_eq!(all, more);
    }
}
