//! Biquad band-pass filter (Audio EQ Cookbook, constant 0 dB peak gain).

use crate::oscillator::TWO_PI;

/// Normalized biquad coefficients (`a0` folded in).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BiquadCoeffs {
    pub b0: f64,
    pub b1: f64,
    pub b2: f64,
    pub a1: f64,
    pub a2: f64,
}

impl BiquadCoeffs {
    /// Band-pass centred on `center` Hz. `q` is clamped to at least 0.5.
    pub fn bandpass(center: f64, q: f64, sample_rate: f64) -> Self {
        let q = q.max(0.5);
        let omega = TWO_PI * center / sample_rate;
        let alpha = omega.sin() / (2.0 * q);
        let a0 = 1.0 + alpha;

        Self {
            b0: alpha / a0,
            b1: 0.0,
            b2: -alpha / a0,
            a1: -2.0 * omega.cos() / a0,
            a2: (1.0 - alpha) / a0,
        }
    }
}

/// Direct form I biquad.
#[derive(Debug, Clone)]
pub struct BiquadFilter {
    coeffs: BiquadCoeffs,
    x1: f64,
    x2: f64,
    y1: f64,
    y2: f64,
}

impl BiquadFilter {
    /// Creates a filter with zeroed state.
    pub fn new(coeffs: BiquadCoeffs) -> Self {
        Self {
            coeffs,
            x1: 0.0,
            x2: 0.0,
            y1: 0.0,
            y2: 0.0,
        }
    }

    /// Creates a band-pass filter.
    pub fn bandpass(center: f64, q: f64, sample_rate: f64) -> Self {
        Self::new(BiquadCoeffs::bandpass(center, q, sample_rate))
    }

    /// Filters one sample.
    #[inline]
    pub fn process(&mut self, input: f64) -> f64 {
        let c = &self.coeffs;
        let output = c.b0 * input + c.b1 * self.x1 + c.b2 * self.x2 - c.a1 * self.y1 - c.a2 * self.y2;

        self.x2 = self.x1;
        self.x1 = input;
        self.y2 = self.y1;
        self.y1 = output;

        output
    }
}
