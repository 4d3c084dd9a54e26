//! The shared song buffer and export-time master processing.
//!
//! Generators add into a single [`StereoOutput`] in place. Nothing in the
//! engine normalizes the sum; headroom is handled afterwards by a
//! [`MasterPolicy`] applied to a copy.

mod buffer;
mod policy;
mod processing;

#[cfg(test)]
mod tests_buffer;
#[cfg(test)]
mod tests_policy;
#[cfg(test)]
mod tests_processing;

pub use buffer::StereoOutput;
pub use policy::{MasterPolicy, DEFAULT_SOFT_CLIP_THRESHOLD};
pub use processing::{hard_clip_buffer, normalize_stereo, peak, soft_clip, soft_clip_buffer};
