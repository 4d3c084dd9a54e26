//! Encoded WAV output.

use std::fs;
use std::path::Path;

use crate::error::AudioResult;
use crate::mixer::StereoOutput;

use super::format::WavFormat;
use super::writer::{encode_wav, stereo_to_pcm16};

/// An encoded song ready to be written to disk.
#[derive(Debug, Clone)]
pub struct WavResult {
    /// Complete WAV file bytes.
    pub wav_data: Vec<u8>,
    /// BLAKE3 hex digest of the PCM payload only.
    pub pcm_hash: String,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Frames per channel.
    pub num_frames: usize,
}

impl WavResult {
    /// Encodes a stereo buffer as 16-bit PCM.
    pub fn from_stereo_output(stereo: &StereoOutput, sample_rate: u32) -> Self {
        let pcm = stereo_to_pcm16(&stereo.left, &stereo.right);
        let pcm_hash = blake3::hash(&pcm).to_hex().to_string();
        let wav_data = encode_wav(&WavFormat::stereo(sample_rate), &pcm);

        Self {
            wav_data,
            pcm_hash,
            sample_rate,
            num_frames: stereo.len(),
        }
    }

    /// Length of the audio in seconds.
    pub fn duration_seconds(&self) -> f64 {
        self.num_frames as f64 / self.sample_rate as f64
    }

    /// Writes the file bytes to `path`.
    pub fn write_to_file(&self, path: impl AsRef<Path>) -> AudioResult<()> {
        fs::write(path, &self.wav_data)?;
        Ok(())
    }
}
