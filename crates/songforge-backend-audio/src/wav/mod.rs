//! Deterministic WAV export.
//!
//! Songs are written as 16-bit stereo PCM with a fixed 44-byte header and no
//! timestamps or metadata chunks, so the same buffer always produces the same
//! bytes. The BLAKE3 hash of the PCM payload identifies the audio content.

mod format;
mod pcm;
mod result;
mod writer;


pub use format::WavFormat;
pub use pcm::{compute_pcm_hash, extract_pcm_data};
pub use result::WavResult;
pub use writer::{encode_wav, stereo_to_pcm16, wav_header, write_wav, WAV_HEADER_LEN};
