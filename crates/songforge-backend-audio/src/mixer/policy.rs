//! Export-time headroom treatment.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::buffer::StereoOutput;
use super::processing::{hard_clip_buffer, normalize_stereo, soft_clip_buffer};
use crate::error::AudioError;

/// Threshold used by `soft-clip` when none is given.
pub const DEFAULT_SOFT_CLIP_THRESHOLD: f64 = 0.8;

/// How the unbounded mix is brought into [-1, 1] for export.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MasterPolicy {
    /// No processing. PCM conversion still clamps.
    Raw,
    /// Clamp to [-1, 1].
    HardClip,
    /// Compress everything above `threshold`.
    SoftClip {
        /// Level where compression starts, in (0, 1].
        threshold: f64,
    },
    /// Scale the whole song so its peak sits at `headroom_db` dBFS.
    Normalize {
        /// Target peak in dB, usually negative.
        headroom_db: f64,
    },
}

impl Default for MasterPolicy {
    fn default() -> Self {
        MasterPolicy::SoftClip {
            threshold: DEFAULT_SOFT_CLIP_THRESHOLD,
        }
    }
}

impl MasterPolicy {
    /// Returns a processed copy of `buffer`.
    pub fn apply(&self, buffer: &StereoOutput) -> StereoOutput {
        let mut out = buffer.clone();
        match *self {
            MasterPolicy::Raw => {}
            MasterPolicy::HardClip => {
                hard_clip_buffer(&mut out.left);
                hard_clip_buffer(&mut out.right);
            }
            MasterPolicy::SoftClip { threshold } => {
                soft_clip_buffer(&mut out.left, threshold);
                soft_clip_buffer(&mut out.right, threshold);
            }
            MasterPolicy::Normalize { headroom_db } => normalize_stereo(&mut out, headroom_db),
        }
        out
    }
}

impl fmt::Display for MasterPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MasterPolicy::Raw => write!(f, "raw"),
            MasterPolicy::HardClip => write!(f, "hard-clip"),
            MasterPolicy::SoftClip { threshold } => write!(f, "soft-clip:{}", threshold),
            MasterPolicy::Normalize { headroom_db } => write!(f, "normalize:{}", headroom_db),
        }
    }
}

/// Parses `raw`, `hard-clip`, `soft-clip[:THRESHOLD]` or `normalize[:DB]`.
impl FromStr for MasterPolicy {
    type Err = AudioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, arg) = match s.split_once(':') {
            Some((name, arg)) => (name.trim(), Some(arg.trim())),
            None => (s.trim(), None),
        };

        let number = |default: f64| -> Result<f64, AudioError> {
            match arg {
                None => Ok(default),
                Some(raw) => raw
                    .parse::<f64>()
                    .ok()
                    .filter(|v| v.is_finite())
                    .ok_or_else(|| {
                        AudioError::invalid_param("master", format!("'{}' is not a number", raw))
                    }),
            }
        };

        match name.to_ascii_lowercase().as_str() {
            "raw" => Ok(MasterPolicy::Raw),
            "hard-clip" | "hard_clip" => Ok(MasterPolicy::HardClip),
            "soft-clip" | "soft_clip" => {
                let threshold = number(DEFAULT_SOFT_CLIP_THRESHOLD)?;
                if threshold <= 0.0 || threshold > 1.0 {
                    return Err(AudioError::invalid_param(
                        "master",
                        format!("soft-clip threshold must be in (0, 1], got {}", threshold),
                    ));
                }
                Ok(MasterPolicy::SoftClip { threshold })
            }
            "normalize" => Ok(MasterPolicy::Normalize {
                headroom_db: number(-1.0)?,
            }),
            other => Err(AudioError::invalid_param(
                "master",
                format!(
                    "unknown policy '{}', expected raw, hard-clip, soft-clip or normalize",
                    other
                ),
            )),
        }
    }
}
