//! Per-bar generators.
//!
//! - `bass` - saturated harmonic bass note
//! - `percussion` - kick, snare and hi-hat hits
//! - `melody` - short scale notes shaped by the vocalist's harmonics
//! - `vocal` - vibrato bursts with per-language formant modulation
//!
//! Every generator adds into the shared buffer and clips its own writes to
//! the buffer bounds. Generators that need randomness own their RNG stream.

pub mod bass;
pub mod melody;
pub mod percussion;
pub mod vocal;

use songforge_spec::{LanguageProfile, VocalistProfile};

use crate::mixer::StereoOutput;
use crate::timeline::Bar;

pub use bass::BassGenerator;
pub use melody::MelodyGenerator;
pub use percussion::PercussionGenerator;
pub use vocal::{VocalGenerator, VocalPhrase};

/// Song-wide values every generator reads.
#[derive(Debug, Clone, Copy)]
pub struct SongContext<'a> {
    /// Sample rate in Hz.
    pub sample_rate: f64,
    /// Beat length in seconds.
    pub beat_seconds: f64,
    /// Resolved vocalist.
    pub vocalist: &'a VocalistProfile,
    /// Resolved language.
    pub language: &'a LanguageProfile,
}

/// Common trait for everything that renders into a bar.
pub trait BarGenerator {
    /// Adds this generator's contribution for `bar` into `out`.
    fn render_bar(&mut self, bar: &Bar, ctx: &SongContext<'_>, out: &mut StereoOutput);
}
