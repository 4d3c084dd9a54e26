//! Buffer playback through a pluggable sink.
//!
//! The engine never talks to an audio device. A [`Player`] pulls blocks of
//! frames out of a finished buffer and pushes them into an [`AudioSink`];
//! device backends live outside this crate.

use std::io::Write;
use std::sync::Arc;

use crate::error::{AudioError, AudioResult};
use crate::generate::CancelToken;
use crate::mixer::StereoOutput;

/// Frames pushed per [`Player::pump`] call unless configured otherwise.
pub const DEFAULT_BLOCK_FRAMES: usize = 4096;

/// Destination for interleaved stereo `f32` frames.
pub trait AudioSink {
    /// Acquires the output. Fails with [`AudioError::ResourceUnavailable`]
    /// when the device cannot be used.
    fn open(&mut self, sample_rate: u32, channels: u16) -> AudioResult<()>;

    /// Writes interleaved frames.
    fn write(&mut self, interleaved: &[f32]) -> AudioResult<()>;

    /// Releases the output.
    fn close(&mut self) -> AudioResult<()> {
        Ok(())
    }
}

/// Sink writing raw little-endian `f32` frames to any writer, e.g. stdout
/// piped into `aplay -f FLOAT_LE -c 2`.
#[derive(Debug)]
pub struct RawPcmSink<W: Write> {
    writer: W,
}

impl<W: Write> RawPcmSink<W> {
    /// Wraps `writer`.
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Returns the wrapped writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> AudioSink for RawPcmSink<W> {
    fn open(&mut self, _sample_rate: u32, _channels: u16) -> AudioResult<()> {
        Ok(())
    }

    fn write(&mut self, interleaved: &[f32]) -> AudioResult<()> {
        let mut bytes = Vec::with_capacity(interleaved.len() * 4);
        for sample in interleaved {
            bytes.extend_from_slice(&sample.to_le_bytes());
        }
        self.writer.write_all(&bytes)?;
        Ok(())
    }

    fn close(&mut self) -> AudioResult<()> {
        self.writer.flush()?;
        Ok(())
    }
}

/// Playback state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    /// Not started.
    Idle,
    /// Pushing frames.
    Playing,
    /// Stopped before the end.
    Stopped,
    /// Every frame was delivered.
    Ended,
}

/// Plays a finished buffer into a sink.
pub struct Player {
    buffer: Arc<StereoOutput>,
    sample_rate: u32,
    block_frames: usize,
    position: usize,
    state: PlaybackState,
    stop_token: CancelToken,
    on_ended: Option<Box<dyn FnMut() + Send>>,
}

impl std::fmt::Debug for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Player")
            .field("frames", &self.buffer.len())
            .field("sample_rate", &self.sample_rate)
            .field("position", &self.position)
            .field("state", &self.state)
            .finish()
    }
}

impl Player {
    /// Creates an idle player for `buffer`.
    pub fn new(buffer: Arc<StereoOutput>, sample_rate: u32) -> Self {
        Self {
            buffer,
            sample_rate,
            block_frames: DEFAULT_BLOCK_FRAMES,
            position: 0,
            state: PlaybackState::Idle,
            stop_token: CancelToken::new(),
            on_ended: None,
        }
    }

    /// Sets the number of frames per block (at least one).
    pub fn with_block_frames(mut self, block_frames: usize) -> Self {
        self.block_frames = block_frames.max(1);
        self
    }

    /// Registers a callback fired once when playback reaches the end.
    pub fn on_ended(mut self, callback: impl FnMut() + Send + 'static) -> Self {
        self.on_ended = Some(Box::new(callback));
        self
    }

    /// Current state.
    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// Frames delivered so far.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Token that stops playback from another thread. [`Player::start`]
    /// issues a fresh token, so take it after starting.
    pub fn stop_handle(&self) -> CancelToken {
        self.stop_token.clone()
    }

    /// Opens the sink and rewinds to the start.
    pub fn start(&mut self, sink: &mut dyn AudioSink) -> AudioResult<()> {
        if self.sample_rate == 0 {
            return Err(AudioError::InvalidSampleRate { rate: 0 });
        }
        sink.open(self.sample_rate, 2)?;
        self.position = 0;
        self.stop_token = CancelToken::new();
        self.state = PlaybackState::Playing;
        tracing::debug!(frames = self.buffer.len(), "playback started");
        Ok(())
    }

    /// Pushes the next block. Returns false once playback is no longer
    /// running.
    pub fn pump(&mut self, sink: &mut dyn AudioSink) -> AudioResult<bool> {
        if self.state != PlaybackState::Playing {
            return Ok(false);
        }
        if self.stop_token.is_cancelled() {
            self.stop(sink)?;
            return Ok(false);
        }

        let end = (self.position + self.block_frames).min(self.buffer.len());
        if self.position < end {
            sink.write(&self.buffer.interleave_f32(self.position..end))?;
            self.position = end;
        }

        if self.position >= self.buffer.len() {
            sink.close()?;
            self.state = PlaybackState::Ended;
            tracing::debug!("playback ended");
            if let Some(callback) = self.on_ended.as_mut() {
                callback();
            }
            return Ok(false);
        }
        Ok(true)
    }

    /// Stops playback and releases the sink. The end callback is not fired.
    pub fn stop(&mut self, sink: &mut dyn AudioSink) -> AudioResult<()> {
        if self.state == PlaybackState::Playing {
            sink.close()?;
            self.state = PlaybackState::Stopped;
            tracing::debug!(position = self.position, "playback stopped");
        }
        Ok(())
    }

    /// Starts and pumps until the buffer ends or playback is stopped.
    pub fn play_to_end(&mut self, sink: &mut dyn AudioSink) -> AudioResult<PlaybackState> {
        self.start(sink)?;
        while self.pump(sink)? {}
        Ok(self.state)
    }
}
