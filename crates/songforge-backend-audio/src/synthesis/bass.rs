//! Bass line: one sustained, beat-pulsed note per bar.

use crate::mixer::StereoOutput;
use crate::oscillator::TWO_PI;
use crate::tables;
use crate::timeline::Bar;

use super::{BarGenerator, SongContext};

/// Peak amplitude before saturation.
pub const BASS_AMPLITUDE: f64 = 0.3;

const ATTACK_END: f64 = 0.1;
const RELEASE_START: f64 = 0.8;
const HARMONIC_WEIGHTS: [f64; 3] = [0.8, 0.3, 0.1];
const DRIVE: f64 = 1.5;
const OUTPUT_GAIN: f64 = 0.6;

/// Amplitude at `beat_phase` in [0, 1): linear attack over the first 10% of
/// the beat, linear release over the last 20%.
pub fn bass_envelope(beat_phase: f64) -> f64 {
    let mut amp = BASS_AMPLITUDE;
    if beat_phase < ATTACK_END {
        amp *= beat_phase / ATTACK_END;
    }
    if beat_phase > RELEASE_START {
        amp *= 1.0 - (beat_phase - RELEASE_START) / (1.0 - RELEASE_START);
    }
    amp
}

/// Stateless bass generator.
#[derive(Debug, Default, Clone, Copy)]
pub struct BassGenerator;

impl BarGenerator for BassGenerator {
    fn render_bar(&mut self, bar: &Bar, ctx: &SongContext<'_>, out: &mut StereoOutput) {
        let omega = TWO_PI * tables::bass_frequency_or_default(&bar.chord);
        let beat = ctx.beat_seconds;
        let start = bar.start_sample(ctx.sample_rate);
        let end = bar.end_sample(ctx.sample_rate);

        for i in out.window(start, end.saturating_sub(start)) {
            let t = (i - start) as f64 / ctx.sample_rate;
            let amp = bass_envelope((t % beat) / beat);

            let raw = amp
                * HARMONIC_WEIGHTS
                    .iter()
                    .enumerate()
                    .map(|(k, w)| w * (omega * (k + 1) as f64 * t).sin())
                    .sum::<f64>();
            out.add_centered(i, OUTPUT_GAIN * (DRIVE * raw).tanh());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::synthesis::test_support::{bar, profiles};

    #[test]
    fn test_envelope_shape() {
        assert_eq!(bass_envelope(0.0), 0.0);
        assert!((bass_envelope(0.05) - 0.15).abs() < 1e-12);
        assert_eq!(bass_envelope(0.1), BASS_AMPLITUDE);
        assert_eq!(bass_envelope(0.5), BASS_AMPLITUDE);
        assert!((bass_envelope(0.8) - BASS_AMPLITUDE).abs() < 1e-12);
        assert!((bass_envelope(0.9) - 0.15).abs() < 1e-12);
        assert!(bass_envelope(1.0).abs() < 1e-12);
    }

    #[test]
    fn test_writes_only_inside_bar() {
        let (v, l) = profiles("aria", "english");
        let ctx = SongContext {
            sample_rate: 1000.0,
            beat_seconds: 0.5,
            vocalist: &v,
            language: &l,
        };
        let mut out = StereoOutput::new(6000);
        BassGenerator.render_bar(&bar(1, "G"), &ctx, &mut out);

        assert!(out.left[..2000].iter().all(|&s| s == 0.0));
        assert!(out.left[4000..].iter().all(|&s| s == 0.0));
        assert!(out.left[2000..4000].iter().any(|&s| s != 0.0));
        assert!(out.is_mono());
        // tanh saturation bounds the contribution
        assert!(out.left.iter().all(|s| s.abs() < OUTPUT_GAIN));
    }

    #[test]
    fn test_truncated_at_buffer_end() {
        let (v, l) = profiles("aria", "english");
        let ctx = SongContext {
            sample_rate: 1000.0,
            beat_seconds: 0.5,
            vocalist: &v,
            language: &l,
        };
        let mut out = StereoOutput::new(2500);
        BassGenerator.render_bar(&bar(1, "C"), &ctx, &mut out);
        assert_eq!(out.len(), 2500);
        assert!(out.left[2000..].iter().any(|&s| s != 0.0));
    }

    #[test]
    fn test_unknown_chord_sounds_like_c() {
        let (v, l) = profiles("aria", "english");
        let ctx = SongContext {
            sample_rate: 2000.0,
            beat_seconds: 0.5,
            vocalist: &v,
            language: &l,
        };
        let mut unknown = StereoOutput::new(4000);
        let mut c = StereoOutput::new(4000);
        BassGenerator.render_bar(&bar(0, "H7"), &ctx, &mut unknown);
        BassGenerator.render_bar(&bar(0, "C"), &ctx, &mut c);
        assert_eq!(unknown, c);
    }
}
