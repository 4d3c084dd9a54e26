//! RIFF encoding and PCM conversion.

use std::io::{self, Write};

use super::format::WavFormat;

/// Size of the canonical PCM header written by [`wav_header`].
pub const WAV_HEADER_LEN: usize = 44;

/// Builds the RIFF/fmt/data header for `data_len` bytes of PCM.
pub fn wav_header(format: &WavFormat, data_len: u32) -> [u8; WAV_HEADER_LEN] {
    let mut header = [0u8; WAV_HEADER_LEN];
    // RIFF size excludes the 8-byte RIFF preamble
    let riff_size = data_len.saturating_add(WAV_HEADER_LEN as u32 - 8);

    header[0..4].copy_from_slice(b"RIFF");
    header[4..8].copy_from_slice(&riff_size.to_le_bytes());
    header[8..12].copy_from_slice(b"WAVE");

    header[12..16].copy_from_slice(b"fmt ");
    header[16..20].copy_from_slice(&16u32.to_le_bytes());
    header[20..22].copy_from_slice(&1u16.to_le_bytes()); // PCM
    header[22..24].copy_from_slice(&format.channels.to_le_bytes());
    header[24..28].copy_from_slice(&format.sample_rate.to_le_bytes());
    header[28..32].copy_from_slice(&format.byte_rate().to_le_bytes());
    header[32..34].copy_from_slice(&format.block_align().to_le_bytes());
    header[34..36].copy_from_slice(&format.bits_per_sample.to_le_bytes());

    header[36..40].copy_from_slice(b"data");
    header[40..44].copy_from_slice(&data_len.to_le_bytes());
    header
}

/// Writes a complete WAV file to `writer`.
pub fn write_wav<W: Write>(writer: &mut W, format: &WavFormat, pcm_data: &[u8]) -> io::Result<()> {
    let data_len = u32::try_from(pcm_data.len()).map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "PCM payload exceeds the 4 GiB WAV limit",
        )
    })?;
    writer.write_all(&wav_header(format, data_len))?;
    writer.write_all(pcm_data)
}

/// Encodes a complete WAV file into memory.
///
/// Payloads past the 4 GiB RIFF limit get a saturated size field.
pub fn encode_wav(format: &WavFormat, pcm_data: &[u8]) -> Vec<u8> {
    let data_len = u32::try_from(pcm_data.len()).unwrap_or(u32::MAX);
    let mut bytes = Vec::with_capacity(WAV_HEADER_LEN + pcm_data.len());
    bytes.extend_from_slice(&wav_header(format, data_len));
    bytes.extend_from_slice(pcm_data);
    bytes
}

#[inline]
fn to_pcm16(sample: f64) -> i16 {
    (sample.clamp(-1.0, 1.0) * 32767.0).round() as i16
}

/// Interleaves two channels into little-endian 16-bit PCM, clamping to
/// [-1, 1]. Extra samples on the longer channel are ignored.
pub fn stereo_to_pcm16(left: &[f64], right: &[f64]) -> Vec<u8> {
    let mut pcm = Vec::with_capacity(left.len().min(right.len()) * 4);
    for (&l, &r) in left.iter().zip(right) {
        pcm.extend_from_slice(&to_pcm16(l).to_le_bytes());
        pcm.extend_from_slice(&to_pcm16(r).to_le_bytes());
    }
    pcm
}
