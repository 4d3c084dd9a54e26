//! Bar grid and chord assignment.

use songforge_spec::{bar_count, Mood, SongBudget};

use crate::error::{AudioError, AudioResult};
use crate::tables;

pub use songforge_spec::BEATS_PER_BAR;

/// One bar of the song.
#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    /// Zero-based position in the song.
    pub index: usize,
    /// Chord symbol for the whole bar.
    pub chord: String,
    /// Bar start in seconds.
    pub start_seconds: f64,
    /// Bar length in seconds.
    pub duration_seconds: f64,
}

impl Bar {
    /// Vocals are sung on every second bar, starting with the first.
    pub fn carries_vocal(&self) -> bool {
        self.index % 2 == 0
    }

    /// First sample of the bar, `floor(start × sample_rate)`.
    pub fn start_sample(&self, sample_rate: f64) -> usize {
        (self.start_seconds * sample_rate).floor() as usize
    }

    /// One past the last sample of the bar.
    pub fn end_sample(&self, sample_rate: f64) -> usize {
        ((self.start_seconds + self.duration_seconds) * sample_rate).floor() as usize
    }
}

/// The ordered bars of a song.
#[derive(Debug, Clone, PartialEq)]
pub struct ChordTimeline {
    /// Mood the chords were taken from.
    pub mood: Mood,
    /// Beat length in seconds.
    pub beat_seconds: f64,
    /// Bars in order. Never empty.
    pub bars: Vec<Bar>,
}

impl ChordTimeline {
    /// Lays out `ceil(duration / bar)` bars, cycling through the mood's
    /// progression.
    pub fn build(duration_seconds: f64, tempo_bpm: f64, mood: Mood) -> AudioResult<Self> {
        Self::with_progression(duration_seconds, tempo_bpm, mood, tables::progression(mood))
    }

    /// Like [`ChordTimeline::build`] with an explicit progression.
    pub fn with_progression<S: AsRef<str>>(
        duration_seconds: f64,
        tempo_bpm: f64,
        mood: Mood,
        progression: &[S],
    ) -> AudioResult<Self> {
        if !(duration_seconds.is_finite() && duration_seconds > 0.0) {
            return Err(AudioError::InvalidDuration {
                duration: duration_seconds,
            });
        }
        if !(tempo_bpm.is_finite() && tempo_bpm > 0.0) {
            return Err(AudioError::InvalidTempo { tempo: tempo_bpm });
        }
        if progression.is_empty() {
            return Err(AudioError::invalid_param(
                "progression",
                "chord progression must not be empty",
            ));
        }

        let num_bars = bar_count(duration_seconds, tempo_bpm)
            .filter(|&bars| bars <= SongBudget::DEFAULT_MAX_BARS)
            .ok_or_else(|| {
                AudioError::invalid_param(
                    "bars",
                    format!(
                        "{}s at {} BPM spans more than {} bars",
                        duration_seconds,
                        tempo_bpm,
                        SongBudget::DEFAULT_MAX_BARS
                    ),
                )
            })?;
        let beat_seconds = 60.0 / tempo_bpm;
        let bar_seconds = beat_seconds * BEATS_PER_BAR as f64;

        let bars = (0..num_bars)
            .map(|index| Bar {
                index,
                chord: progression[index % progression.len()].as_ref().to_string(),
                start_seconds: index as f64 * bar_seconds,
                duration_seconds: bar_seconds,
            })
            .collect();

        Ok(Self {
            mood,
            beat_seconds,
            bars,
        })
    }

    /// Number of bars.
    pub fn len(&self) -> usize {
        self.bars.len()
    }

    /// Always false for a built timeline.
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// Indices of the bars that carry vocals.
    pub fn vocal_bars(&self) -> Vec<usize> {
        self.bars
            .iter()
            .filter(|bar| bar.carries_vocal())
            .map(|bar| bar.index)
            .collect()
    }
}
