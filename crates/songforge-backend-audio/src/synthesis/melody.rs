//! Melody: random scale notes voiced with the vocalist's harmonic stack.

use rand::Rng;
use rand_pcg::Pcg32;

use crate::mixer::StereoOutput;
use crate::oscillator::TWO_PI;
use crate::tables::{self, SCALE_LEN};
use crate::timeline::Bar;

use super::{BarGenerator, SongContext};

/// Length of one melody note.
pub const NOTE_SECONDS: f64 = 0.5;
/// Output gain of the melody.
pub const MELODY_GAIN: f64 = 0.3;

/// Note envelope, `exp(-2t)(1 - exp(-10t))`: a fast rise and slow decay.
#[inline]
pub fn melody_envelope(t: f64) -> f64 {
    (-2.0 * t).exp() * (1.0 - (-10.0 * t).exp())
}

/// Generates melody notes. Note choice comes from the owned RNG.
#[derive(Debug, Clone)]
pub struct MelodyGenerator {
    rng: Pcg32,
}

impl MelodyGenerator {
    /// Creates a generator drawing notes from `rng`.
    pub fn new(rng: Pcg32) -> Self {
        Self { rng }
    }
}

impl BarGenerator for MelodyGenerator {
    fn render_bar(&mut self, bar: &Bar, ctx: &SongContext<'_>, out: &mut StereoOutput) {
        let sr = ctx.sample_rate;
        let scale = tables::melody_scale_or_default(&bar.chord);
        let harmonics = &ctx.vocalist.harmonics;
        let notes = (bar.duration_seconds / NOTE_SECONDS).floor() as usize;
        let note_len = (NOTE_SECONDS * sr).floor() as usize;

        for note in 0..notes {
            let start =
                ((bar.start_seconds + note as f64 * NOTE_SECONDS) * sr).floor() as usize;
            if start >= out.len() {
                break;
            }
            let frequency =
                scale[self.rng.gen_range(0..SCALE_LEN)] * ctx.language.frequency_multiplier;

            for i in out.window(start, note_len) {
                let t = (i - start) as f64 / sr;
                let voiced: f64 = harmonics
                    .iter()
                    .enumerate()
                    .map(|(k, h)| (TWO_PI * frequency * h * t).sin() / (k + 1) as f64)
                    .sum();
                out.add_centered(i, MELODY_GAIN * voiced * melody_envelope(t));
            }
        }
    }
}
