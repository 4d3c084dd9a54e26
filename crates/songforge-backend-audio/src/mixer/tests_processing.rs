//! Tests for peak, normalization and clipping.

use super::*;

#[test]
fn test_peak_across_channels() {
    let stereo = StereoOutput {
        left: vec![0.1, -0.4],
        right: vec![0.3, -1.7],
    };
    assert_eq!(peak(&stereo), 1.7);
}

#[test]
fn test_normalize_stereo_to_zero_db() {
    let mut stereo = StereoOutput {
        left: vec![0.5, -0.25],
        right: vec![2.0, 1.0],
    };
    normalize_stereo(&mut stereo, 0.0);
    assert!((peak(&stereo) - 1.0).abs() < 1e-12);
    // one gain for both channels
    assert!((stereo.left[0] - 0.25).abs() < 1e-12);
}

#[test]
fn test_normalize_stereo_with_headroom() {
    let mut stereo = StereoOutput::from_mono(vec![0.2, -0.8]);
    normalize_stereo(&mut stereo, -6.0);
    let expected = 10.0_f64.powf(-6.0 / 20.0);
    assert!((peak(&stereo) - expected).abs() < 1e-9);
}

#[test]
fn test_normalize_silence_is_noop() {
    let mut stereo = StereoOutput::new(16);
    normalize_stereo(&mut stereo, 0.0);
    assert_eq!(stereo, StereoOutput::new(16));
}

#[test]
fn test_soft_clip_below_threshold_is_identity() {
    assert_eq!(soft_clip(0.5, 0.8), 0.5);
    assert_eq!(soft_clip(-0.79, 0.8), -0.79);
}

#[test]
fn test_soft_clip_above_threshold() {
    let clipped = soft_clip(2.0, 0.8);
    assert!(clipped > 0.8);
    assert!(clipped < 1.0);
    assert!((soft_clip(-2.0, 0.8) + clipped).abs() < 1e-12);
}

#[test]
fn test_soft_clip_is_monotonic() {
    let mut prev = soft_clip(0.0, 0.8);
    for i in 1..200 {
        let next = soft_clip(i as f64 * 0.05, 0.8);
        assert!(next >= prev);
        prev = next;
    }
}

#[test]
fn test_hard_clip_buffer() {
    let mut samples = vec![-3.0, -0.5, 0.0, 0.5, 3.0];
    hard_clip_buffer(&mut samples);
    assert_eq!(samples, vec![-1.0, -0.5, 0.0, 0.5, 1.0]);
}

#[test]
fn test_soft_clip_buffer_bounds() {
    let mut samples = vec![-5.0, 0.1, 5.0];
    soft_clip_buffer(&mut samples, 0.8);
    assert!(samples.iter().all(|s| s.abs() < 1.0));
    assert_eq!(samples[1], 0.1);
}
