//! Gain processing used by master policies.

use super::buffer::StereoOutput;

/// Largest absolute sample value across both channels.
pub fn peak(stereo: &StereoOutput) -> f64 {
    stereo
        .left
        .iter()
        .chain(stereo.right.iter())
        .map(|s| s.abs())
        .fold(0.0_f64, f64::max)
}

/// Scales both channels by one gain so the peak lands at `headroom_db` dBFS.
///
/// Silent buffers are left untouched.
pub fn normalize_stereo(stereo: &mut StereoOutput, headroom_db: f64) {
    let target_peak = 10.0_f64.powf(headroom_db / 20.0);
    let current_peak = peak(stereo);

    if current_peak > 0.0 {
        let gain = target_peak / current_peak;
        for sample in stereo.left.iter_mut().chain(stereo.right.iter_mut()) {
            *sample *= gain;
        }
    }
}

/// Soft clipping: linear up to `threshold`, then exponentially compressed
/// towards 1.0.
#[inline]
pub fn soft_clip(sample: f64, threshold: f64) -> f64 {
    let abs = sample.abs();
    if abs <= threshold {
        sample
    } else {
        let excess = abs - threshold;
        let compressed = threshold + (1.0 - threshold) * (1.0 - (-excess * 3.0).exp());
        sample.signum() * compressed
    }
}

/// Applies [`soft_clip`] to every sample.
pub fn soft_clip_buffer(samples: &mut [f64], threshold: f64) {
    for sample in samples.iter_mut() {
        *sample = soft_clip(*sample, threshold);
    }
}

/// Clamps every sample to [-1, 1].
pub fn hard_clip_buffer(samples: &mut [f64]) {
    for sample in samples.iter_mut() {
        *sample = sample.clamp(-1.0, 1.0);
    }
}
