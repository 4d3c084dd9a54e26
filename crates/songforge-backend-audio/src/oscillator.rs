//! Basic waveforms evaluated from a normalized phase in [0, 1).

use std::f64::consts::PI;

use songforge_spec::Timbre;

/// 2π.
pub const TWO_PI: f64 = 2.0 * PI;

/// Sine wave.
#[inline]
pub fn sine(phase: f64) -> f64 {
    (TWO_PI * phase).sin()
}

/// Square wave, +1 for the first half of the cycle.
#[inline]
pub fn square(phase: f64) -> f64 {
    if phase < 0.5 {
        1.0
    } else {
        -1.0
    }
}

/// Rising sawtooth from -1 to 1.
#[inline]
pub fn sawtooth(phase: f64) -> f64 {
    2.0 * phase - 1.0
}

/// Triangle wave, -1 at phase 0 and +1 at phase 0.5.
#[inline]
pub fn triangle(phase: f64) -> f64 {
    if phase < 0.5 {
        4.0 * phase - 1.0
    } else {
        3.0 - 4.0 * phase
    }
}

/// Evaluates the waveform of a vocalist timbre.
#[inline]
pub fn waveform(timbre: Timbre, phase: f64) -> f64 {
    match timbre {
        Timbre::Sine => sine(phase),
        Timbre::Square => square(phase),
        Timbre::Sawtooth => sawtooth(phase),
        Timbre::Triangle => triangle(phase),
    }
}

/// Running oscillator phase for time-varying frequencies.
#[derive(Debug, Clone)]
pub struct PhaseAccumulator {
    phase: f64,
    sample_rate: f64,
}

impl PhaseAccumulator {
    /// Starts at phase 0.
    pub fn new(sample_rate: f64) -> Self {
        Self {
            phase: 0.0,
            sample_rate,
        }
    }

    /// Returns the current phase and advances by one sample at `frequency`.
    #[inline]
    pub fn advance(&mut self, frequency: f64) -> f64 {
        let current = self.phase;
        self.phase = (self.phase + frequency / self.sample_rate).rem_euclid(1.0);
        current
    }
}
