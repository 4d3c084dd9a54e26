//! Drum hits on the beat grid.
//!
//! Kicks land on beats 0 and 2, snares on 1 and 3, and every beat gets a
//! hi-hat that is longer on the even beats.

use rand::Rng;
use rand_pcg::Pcg32;

use crate::mixer::StereoOutput;
use crate::oscillator::TWO_PI;
use crate::timeline::{Bar, BEATS_PER_BAR};

use super::{BarGenerator, SongContext};

/// Kick length in seconds.
pub const KICK_SECONDS: f64 = 0.2;
/// Snare length in seconds.
pub const SNARE_SECONDS: f64 = 0.15;
/// Hi-hat length on even beats.
pub const HIHAT_ON_BEAT_SECONDS: f64 = 0.05;
/// Hi-hat length on odd beats.
pub const HIHAT_OFF_BEAT_SECONDS: f64 = 0.03;

const SNARE_TONE_HZ: f64 = 200.0;

/// Kick amplitude envelope.
#[inline]
pub fn kick_envelope(t: f64) -> f64 {
    (-15.0 * t).exp()
}

/// Kick pitch, sweeping down from 60 Hz.
#[inline]
pub fn kick_frequency(t: f64) -> f64 {
    60.0 * (-8.0 * t).exp()
}

/// Snare amplitude envelope.
#[inline]
pub fn snare_envelope(t: f64) -> f64 {
    (-12.0 * t).exp()
}

/// Hi-hat amplitude envelope.
#[inline]
pub fn hihat_envelope(t: f64) -> f64 {
    (-25.0 * t).exp()
}

/// Generates drums. Snare and hi-hat noise comes from the owned RNG.
#[derive(Debug, Clone)]
pub struct PercussionGenerator {
    rng: Pcg32,
}

impl PercussionGenerator {
    /// Creates a generator drawing noise from `rng`.
    pub fn new(rng: Pcg32) -> Self {
        Self { rng }
    }

    fn noise(&mut self) -> f64 {
        self.rng.gen::<f64>() * 2.0 - 1.0
    }

    fn kick(&mut self, out: &mut StereoOutput, start: usize, sample_rate: f64) {
        let len = (KICK_SECONDS * sample_rate).floor() as usize;
        for i in out.window(start, len) {
            let t = (i - start) as f64 / sample_rate;
            let s = (TWO_PI * kick_frequency(t) * t).sin() * kick_envelope(t) * 0.8;
            out.add_centered(i, s);
        }
    }

    fn snare(&mut self, out: &mut StereoOutput, start: usize, sample_rate: f64) {
        let len = (SNARE_SECONDS * sample_rate).floor() as usize;
        for i in out.window(start, len) {
            let t = (i - start) as f64 / sample_rate;
            let noise = self.noise();
            let tone = (TWO_PI * SNARE_TONE_HZ * t).sin();
            out.add_centered(i, 0.7 * (noise * 0.6 + tone * 0.4) * snare_envelope(t));
        }
    }

    fn hihat(&mut self, out: &mut StereoOutput, start: usize, seconds: f64, sample_rate: f64) {
        let len = (seconds * sample_rate).floor() as usize;
        for i in out.window(start, len) {
            let t = (i - start) as f64 / sample_rate;
            let noise = self.noise();
            out.add_centered(i, noise * hihat_envelope(t) * 0.3);
        }
    }
}

impl BarGenerator for PercussionGenerator {
    fn render_bar(&mut self, bar: &Bar, ctx: &SongContext<'_>, out: &mut StereoOutput) {
        let sr = ctx.sample_rate;
        let bar_start = bar.start_sample(sr);
        let beat_len = (ctx.beat_seconds * sr).floor() as usize;

        for beat in 0..BEATS_PER_BAR {
            let start = bar_start.saturating_add(beat.saturating_mul(beat_len));
            if start >= out.len() {
                break;
            }
            let on_beat = beat % 2 == 0;

            if on_beat {
                self.kick(out, start, sr);
            } else {
                self.snare(out, start, sr);
            }

            let hihat_seconds = if on_beat {
                HIHAT_ON_BEAT_SECONDS
            } else {
                HIHAT_OFF_BEAT_SECONDS
            };
            self.hihat(out, start, hihat_seconds, sr);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::create_rng;
    use crate::synthesis::test_support::{bar, profiles};

    #[test]
    fn test_kick_envelope() {
        assert_eq!(kick_envelope(0.0), 1.0);
        let mut prev = kick_envelope(0.0);
        for i in 1..=200 {
            let next = kick_envelope(i as f64 * 0.001);
            assert!(next < prev);
            prev = next;
        }
        // the kick ends at exp(-3) of its initial level
        assert!((kick_envelope(KICK_SECONDS) - (-3.0f64).exp()).abs() < 1e-12);
    }

    #[test]
    fn test_kick_frequency_sweeps_down() {
        assert_eq!(kick_frequency(0.0), 60.0);
        assert!(kick_frequency(0.1) < kick_frequency(0.05));
    }

    #[test]
    fn test_hits_are_on_the_beat_grid() {
        let (v, l) = profiles("aria", "english");
        let ctx = SongContext {
            sample_rate: 1000.0,
            beat_seconds: 0.5,
            vocalist: &v,
            language: &l,
        };
        let mut out = StereoOutput::new(2000);
        PercussionGenerator::new(create_rng(1)).render_bar(&bar(0, "C"), &ctx, &mut out);

        // beats at 0, 500, 1000, 1500; longest hit is the 200 ms kick
        for beat in 0..4 {
            let start = beat * 500;
            assert!(out.left[start + 200..start + 500].iter().all(|&s| s == 0.0));
        }
        assert!(out.is_mono());
    }

    #[test]
    fn test_same_seed_same_noise() {
        let (v, l) = profiles("aria", "english");
        let ctx = SongContext {
            sample_rate: 8000.0,
            beat_seconds: 0.5,
            vocalist: &v,
            language: &l,
        };
        let render = |seed| {
            let mut out = StereoOutput::new(16000);
            PercussionGenerator::new(create_rng(seed)).render_bar(&bar(0, "C"), &ctx, &mut out);
            out
        };
        assert_eq!(render(3), render(3));
        assert_ne!(render(3), render(4));
    }

    #[test]
    fn test_windows_past_end_are_truncated() {
        let (v, l) = profiles("aria", "english");
        let ctx = SongContext {
            sample_rate: 1000.0,
            beat_seconds: 0.5,
            vocalist: &v,
            language: &l,
        };
        let mut out = StereoOutput::new(600);
        PercussionGenerator::new(create_rng(1)).render_bar(&bar(0, "C"), &ctx, &mut out);
        assert_eq!(out.len(), 600);
        // snare on beat 1 starts at sample 500
        assert!(out.left[500..].iter().any(|&s| s != 0.0));
    }

    #[test]
    fn test_huge_beat_does_not_overflow() {
        let (v, l) = profiles("aria", "english");
        let ctx = SongContext {
            sample_rate: 8000.0,
            beat_seconds: 1e300,
            vocalist: &v,
            language: &l,
        };
        let mut out = StereoOutput::new(800);
        PercussionGenerator::new(create_rng(1)).render_bar(&bar(0, "C"), &ctx, &mut out);
        // only the first kick fits
        assert!(out.left[..800].iter().any(|&s| s != 0.0));
    }
}
