//! Two-channel sample buffer with additive, bounds-clipped writes.

use std::ops::Range;

/// Stereo audio buffer. Both channels always have the same length.
#[derive(Debug, Clone, PartialEq)]
pub struct StereoOutput {
    /// Left channel samples.
    pub left: Vec<f64>,
    /// Right channel samples.
    pub right: Vec<f64>,
}

impl StereoOutput {
    /// Creates a silent buffer of `num_samples` frames.
    pub fn new(num_samples: usize) -> Self {
        Self {
            left: vec![0.0; num_samples],
            right: vec![0.0; num_samples],
        }
    }

    /// Creates a buffer with the same samples on both channels.
    pub fn from_mono(mono: Vec<f64>) -> Self {
        Self {
            left: mono.clone(),
            right: mono,
        }
    }

    /// Frames per channel.
    pub fn len(&self) -> usize {
        self.left.len()
    }

    /// Returns true if the buffer holds no frames.
    pub fn is_empty(&self) -> bool {
        self.left.is_empty()
    }

    /// Returns true if left and right channels are identical.
    pub fn is_mono(&self) -> bool {
        self.left == self.right
    }

    /// Clips `start..start + count` to the buffer. Windows that begin past the
    /// end come back empty.
    pub fn window(&self, start: usize, count: usize) -> Range<usize> {
        let len = self.len();
        let begin = start.min(len);
        begin..start.saturating_add(count).min(len)
    }

    /// Adds `value` to both channels at `index`. Out-of-range writes are
    /// dropped.
    #[inline]
    pub fn add_centered(&mut self, index: usize, value: f64) {
        if let (Some(l), Some(r)) = (self.left.get_mut(index), self.right.get_mut(index)) {
            *l += value;
            *r += value;
        }
    }

    /// Interleaves the channels as `f32` frames (L, R, L, R, ...) for a
    /// playback sink.
    pub fn interleave_f32(&self, frames: Range<usize>) -> Vec<f32> {
        let frames = frames.start.min(self.len())..frames.end.min(self.len());
        let mut out = Vec::with_capacity(frames.len() * 2);
        for i in frames {
            out.push(self.left[i] as f32);
            out.push(self.right[i] as f32);
        }
        out
    }
}
