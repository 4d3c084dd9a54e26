//! Resource limits for song requests.
//!
//! Limits are enforced at validation so a request can never ask the renderer
//! for more bars or frames than it can allocate.

use serde::{Deserialize, Serialize};

/// Upper and lower bounds on what one request may render.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SongBudget {
    /// Longest song in seconds.
    pub max_duration_seconds: f64,
    /// Slowest tempo in BPM.
    pub min_tempo_bpm: f64,
    /// Fastest tempo in BPM.
    pub max_tempo_bpm: f64,
    /// Highest output sample rate in Hz.
    pub max_sample_rate: u32,
    /// Most bars in one song.
    pub max_bars: usize,
    /// Most frames (per channel) in one song.
    pub max_frames: usize,
}

impl SongBudget {
    /// Ten minutes.
    pub const DEFAULT_MAX_DURATION_SECONDS: f64 = 600.0;
    /// Slowest default tempo.
    pub const DEFAULT_MIN_TEMPO_BPM: f64 = 20.0;
    /// Fastest default tempo.
    pub const DEFAULT_MAX_TEMPO_BPM: f64 = 400.0;
    /// Highest default sample rate.
    pub const DEFAULT_MAX_SAMPLE_RATE: u32 = 192_000;
    /// 600 s at 400 BPM is 1000 bars.
    pub const DEFAULT_MAX_BARS: usize = 1_024;
    /// Ten minutes at 48 kHz.
    pub const DEFAULT_MAX_FRAMES: usize = 600 * 48_000;
}

impl Default for SongBudget {
    fn default() -> Self {
        Self {
            max_duration_seconds: Self::DEFAULT_MAX_DURATION_SECONDS,
            min_tempo_bpm: Self::DEFAULT_MIN_TEMPO_BPM,
            max_tempo_bpm: Self::DEFAULT_MAX_TEMPO_BPM,
            max_sample_rate: Self::DEFAULT_MAX_SAMPLE_RATE,
            max_bars: Self::DEFAULT_MAX_BARS,
            max_frames: Self::DEFAULT_MAX_FRAMES,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_limits_are_consistent() {
        let budget = SongBudget::default();
        let shortest_bar = 4.0 * 60.0 / budget.max_tempo_bpm;
        let bars = (budget.max_duration_seconds / shortest_bar).ceil() as usize;
        assert!(bars <= budget.max_bars);
        assert!(budget.min_tempo_bpm < budget.max_tempo_bpm);
        assert_eq!(
            budget.max_frames,
            (budget.max_duration_seconds * 48_000.0) as usize
        );
    }
}
