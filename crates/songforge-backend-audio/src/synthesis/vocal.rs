//! Vocal-like bursts.
//!
//! Every even bar is split into 300 ms bursts. Each burst draws a phoneme
//! token from the language's patterns (kept as metadata, never synthesized)
//! and a vibrato rate, then sums the vocalist's harmonics at the
//! language-shifted base pitch.

use std::f64::consts::PI;

use rand::seq::SliceRandom;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::Serialize;

use crate::mixer::StereoOutput;
use crate::oscillator::TWO_PI;
use crate::timeline::Bar;

use super::{BarGenerator, SongContext};

/// Length of one burst.
pub const BURST_SECONDS: f64 = 0.3;
/// Vibrato depth as a fraction of the base pitch.
pub const VIBRATO_DEPTH: f64 = 0.05;
/// Lowest vibrato rate in Hz.
pub const VIBRATO_MIN_HZ: f64 = 5.0;
/// Upper bound (exclusive) of the vibrato rate in Hz.
pub const VIBRATO_MAX_HZ: f64 = 8.0;

const VOCAL_GAIN: f64 = 0.25;
const VOCAL_MIX: f64 = 0.9;

/// Half-sine burst envelope: zero at both edges, one at the midpoint.
#[inline]
pub fn vocal_envelope(t: f64) -> f64 {
    (PI * t / BURST_SECONDS).sin()
}

/// Phoneme tokens drawn for one vocal bar.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VocalPhrase {
    /// Bar index.
    pub bar: usize,
    /// One token per burst, in order.
    pub tokens: Vec<String>,
}

/// Generates vocal bursts and records the tokens it drew.
#[derive(Debug, Clone)]
pub struct VocalGenerator {
    rng: Pcg32,
    phrases: Vec<VocalPhrase>,
}

impl VocalGenerator {
    /// Creates a generator drawing tokens and vibrato from `rng`.
    pub fn new(rng: Pcg32) -> Self {
        Self {
            rng,
            phrases: Vec::new(),
        }
    }

    /// Phrases rendered so far.
    pub fn phrases(&self) -> &[VocalPhrase] {
        &self.phrases
    }

    /// Consumes the generator, returning its phrases.
    pub fn into_phrases(self) -> Vec<VocalPhrase> {
        self.phrases
    }
}

impl BarGenerator for VocalGenerator {
    fn render_bar(&mut self, bar: &Bar, ctx: &SongContext<'_>, out: &mut StereoOutput) {
        if !bar.carries_vocal() {
            return;
        }

        let sr = ctx.sample_rate;
        let vocalist = ctx.vocalist;
        let formant = ctx.language.formant;
        let base = vocalist.base_frequency_hz * ctx.language.frequency_multiplier;
        let gain = vocalist.expression_gain() * VOCAL_GAIN * VOCAL_MIX;
        let bursts = (bar.duration_seconds / BURST_SECONDS).floor() as usize;
        let burst_len = (BURST_SECONDS * sr).floor() as usize;

        let mut tokens = Vec::with_capacity(bursts);
        for burst in 0..bursts {
            let start =
                ((bar.start_seconds + burst as f64 * BURST_SECONDS) * sr).floor() as usize;
            if start >= out.len() {
                break;
            }
            if let Some(token) = ctx.language.patterns.choose(&mut self.rng) {
                tokens.push(token.clone());
            }
            let rate = self.rng.gen_range(VIBRATO_MIN_HZ..VIBRATO_MAX_HZ);

            for i in out.window(start, burst_len) {
                let t = (i - start) as f64 / sr;
                let pitch = base * (1.0 + VIBRATO_DEPTH * (TWO_PI * rate * t).sin());
                let voiced: f64 = vocalist
                    .harmonics
                    .iter()
                    .enumerate()
                    .map(|(k, h)| {
                        let f = pitch * h;
                        (TWO_PI * f * t).sin() * formant.gain(f, t) / ((k + 1) as f64).sqrt()
                    })
                    .sum();
                out.add_centered(i, voiced * vocal_envelope(t) * gain);
            }
        }

        tracing::trace!(bar = bar.index, tokens = ?tokens, "vocal phrase");
        self.phrases.push(VocalPhrase {
            bar: bar.index,
            tokens,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::create_rng;
    use crate::synthesis::test_support::{bar, profiles};
    use pretty_assertions::assert_eq;

    fn ctx_for<'a>(
        v: &'a songforge_spec::VocalistProfile,
        l: &'a songforge_spec::LanguageProfile,
    ) -> SongContext<'a> {
        SongContext {
            sample_rate: 4000.0,
            beat_seconds: 0.5,
            vocalist: v,
            language: l,
        }
    }

    #[test]
    fn test_envelope_edges_and_midpoint() {
        assert_eq!(vocal_envelope(0.0), 0.0);
        assert!(vocal_envelope(BURST_SECONDS).abs() < 1e-12);
        assert!((vocal_envelope(BURST_SECONDS / 2.0) - 1.0).abs() < 1e-12);
        assert!(vocal_envelope(0.1) < vocal_envelope(0.15));
    }

    #[test]
    fn test_odd_bars_are_silent() {
        let (v, l) = profiles("aria", "english");
        let mut gen = VocalGenerator::new(create_rng(0));
        let mut out = StereoOutput::new(16000);
        gen.render_bar(&bar(1, "G"), &ctx_for(&v, &l), &mut out);
        assert_eq!(out, StereoOutput::new(16000));
        assert!(gen.phrases().is_empty());
    }

    #[test]
    fn test_even_bar_draws_one_token_per_burst() {
        let (v, l) = profiles("nova", "korean");
        let mut gen = VocalGenerator::new(create_rng(9));
        let mut out = StereoOutput::new(8000);
        gen.render_bar(&bar(0, "Am"), &ctx_for(&v, &l), &mut out);

        let phrases = gen.into_phrases();
        assert_eq!(phrases.len(), 1);
        assert_eq!(phrases[0].bar, 0);
        // 2.0 s bar holds six full 300 ms bursts
        assert_eq!(phrases[0].tokens.len(), 6);
        assert!(phrases[0].tokens.iter().all(|t| l.patterns.contains(t)));
        assert!(out.left[..1200 * 6].iter().any(|&s| s != 0.0));
        assert!(out.left[1200 * 6..].iter().all(|&s| s == 0.0));
    }

    #[test]
    fn test_zero_emotion_is_silent_but_still_draws() {
        let (mut v, l) = profiles("aria", "english");
        v.characteristics.emotion = 0.0;
        let mut gen = VocalGenerator::new(create_rng(2));
        let mut out = StereoOutput::new(8000);
        gen.render_bar(&bar(0, "C"), &ctx_for(&v, &l), &mut out);
        assert!(out.left.iter().all(|&s| s == 0.0));
        assert_eq!(gen.phrases()[0].tokens.len(), 6);
    }

    #[test]
    fn test_formant_changes_output() {
        let (v, plain) = profiles("aria", "english");
        let mut shaped = plain.clone();
        shaped.formant = songforge_spec::FormantModulation::Cosine { ratio: 0.001 };

        let render = |l: &songforge_spec::LanguageProfile| {
            let mut out = StereoOutput::new(8000);
            VocalGenerator::new(create_rng(4)).render_bar(&bar(0, "C"), &ctx_for(&v, l), &mut out);
            out
        };
        assert_ne!(render(&plain), render(&shaped));
    }

    #[test]
    fn test_bursts_stop_at_buffer_end() {
        let (v, l) = profiles("aria", "english");
        let endless = Bar {
            index: 0,
            chord: "C".to_string(),
            start_seconds: 0.0,
            duration_seconds: 4e299,
        };
        let mut gen = VocalGenerator::new(create_rng(6));
        let mut out = StereoOutput::new(4000);
        gen.render_bar(&endless, &ctx_for(&v, &l), &mut out);
        // bursts start at 0, 1200, 2400 and 3600
        assert_eq!(gen.phrases()[0].tokens.len(), 4);
    }
}
