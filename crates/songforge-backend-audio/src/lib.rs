//! SongForge Audio Backend
//!
//! Procedural song synthesis: a request (duration, tempo, mood, vocalist,
//! language, seed) becomes a stereo buffer holding bass, drums, melody and
//! vocal-like bursts laid out on a four-beat bar grid.
//!
//! # Determinism
//!
//! All synthesis is deterministic. Given the same request, catalog and seed,
//! the buffer is byte-identical across runs (on the same platform). The crate
//! uses PCG32 for all random number generation, with one stream per
//! generator derived from the song seed via BLAKE3.
//!
//! # Example
//!
//! ```
//! use songforge_backend_audio::{generate, MasterPolicy};
//! use songforge_spec::{Catalog, SongRequest};
//!
//! let request = SongRequest::new(4.0, 120.0).mood("epic").sample_rate(8000).seed(1);
//! let song = generate(&request, &Catalog::builtin()).unwrap();
//! assert_eq!(song.summary.total_bars, 2);
//!
//! let wav = song.to_wav(MasterPolicy::default());
//! assert_eq!(wav.num_frames, 32_000);
//! ```
//!
//! # Crate Structure
//!
//! - [`generate()`] - Main entry point, with progress and cancellation
//! - [`task`] - Generation on a worker thread
//! - [`timeline`] - Bar grid and chord assignment
//! - [`synthesis`] - Bass, percussion, melody and vocal generators
//! - [`mixer`] - Shared buffer and export master policies
//! - [`preview`] - Vocalist preview and harmony test renders
//! - [`player`] - Buffer playback through a sink
//! - [`wav`] - Deterministic WAV writer
//! - [`rng`] - Deterministic RNG with seed derivation

pub mod error;
pub mod filter;
pub mod generate;
pub mod mixer;
pub mod oscillator;
pub mod player;
pub mod preview;
pub mod rng;
pub mod synthesis;
pub mod tables;
pub mod task;
pub mod timeline;
pub mod wav;

// Re-export main types at crate root
pub use error::{AudioError, AudioResult};
pub use generate::{
    generate, generate_with, render_to_wav, CancelToken, Progress, RenderOptions, RenderSummary,
    SongRender,
};
pub use mixer::{MasterPolicy, StereoOutput};
pub use player::{AudioSink, PlaybackState, Player, RawPcmSink};
pub use preview::{render_harmony_test, render_vocalist_preview};
pub use task::SongTask;
pub use timeline::{Bar, ChordTimeline};
pub use wav::WavResult;
