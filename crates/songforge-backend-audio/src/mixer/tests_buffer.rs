//! Tests for StereoOutput.

use super::*;

#[test]
fn test_new_is_silent() {
    let stereo = StereoOutput::new(100);
    assert_eq!(stereo.left.len(), 100);
    assert_eq!(stereo.right.len(), 100);
    assert!(stereo.left.iter().chain(stereo.right.iter()).all(|&s| s == 0.0));
}

#[test]
fn test_from_mono_duplicates_channels() {
    let stereo = StereoOutput::from_mono(vec![1.0, 0.5, -0.5]);
    assert!(stereo.is_mono());
    assert_eq!(stereo.len(), 3);
}

#[test]
fn test_add_centered_accumulates() {
    let mut stereo = StereoOutput::new(4);
    stereo.add_centered(1, 0.25);
    stereo.add_centered(1, 0.5);
    assert_eq!(stereo.left, vec![0.0, 0.75, 0.0, 0.0]);
    assert_eq!(stereo.right, stereo.left);
}

#[test]
fn test_add_centered_drops_out_of_range() {
    let mut stereo = StereoOutput::new(4);
    stereo.add_centered(4, 1.0);
    stereo.add_centered(usize::MAX, 1.0);
    assert_eq!(stereo, StereoOutput::new(4));
}

#[test]
fn test_window_clips_to_buffer() {
    let stereo = StereoOutput::new(10);
    assert_eq!(stereo.window(2, 3), 2..5);
    assert_eq!(stereo.window(8, 5), 8..10);
    assert_eq!(stereo.window(12, 5), 10..10);
    assert!(stereo.window(usize::MAX, 5).is_empty());
}

#[test]
fn test_interleave_f32() {
    let stereo = StereoOutput {
        left: vec![1.0, 2.0, 3.0],
        right: vec![4.0, 5.0, 6.0],
    };
    assert_eq!(stereo.interleave_f32(0..3), vec![1.0, 4.0, 2.0, 5.0, 3.0, 6.0]);
    assert_eq!(stereo.interleave_f32(2..9), vec![3.0, 6.0]);
    assert!(stereo.interleave_f32(5..9).is_empty());
}
