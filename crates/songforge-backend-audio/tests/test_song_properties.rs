//! Integration tests for the structure of generated songs.

use songforge_backend_audio::mixer::peak;
use songforge_backend_audio::{generate, ChordTimeline, MasterPolicy, StereoOutput};
use songforge_spec::{Catalog, Mood, SongRequest};

fn request(duration: f64, tempo: f64) -> SongRequest {
    SongRequest::new(duration, tempo).sample_rate(8000).seed(42)
}

/// Samples in `[start, end)` seconds.
fn span(buffer: &StereoOutput, start: f64, end: f64, sr: f64) -> &[f64] {
    let a = (start * sr) as usize;
    let b = ((end * sr) as usize).min(buffer.len());
    &buffer.left[a..b]
}

fn energy(samples: &[f64]) -> f64 {
    samples.iter().map(|s| s * s).sum::<f64>() / samples.len().max(1) as f64
}

#[test]
fn test_buffer_length_is_rounded_duration() {
    let catalog = Catalog::builtin();
    for (duration, rate) in [(1.0, 8000), (2.5, 22050), (0.1234, 44100), (3.3, 11025)] {
        let song = generate(&request(duration, 100.0).sample_rate(rate), &catalog).unwrap();
        let expected = (duration * rate as f64).round() as usize;
        assert_eq!(song.buffer.left.len(), expected);
        assert_eq!(song.buffer.right.len(), expected);
    }
}

#[test]
fn test_eight_seconds_at_120_bpm() {
    let song = generate(&request(8.0, 120.0), &Catalog::builtin()).unwrap();
    assert_eq!(song.summary.total_bars, 4);
    assert_eq!(song.summary.vocal_bars, vec![0, 2]);
    assert_eq!(song.summary.chords, vec!["C", "G", "Am", "F"]);
}

#[test]
fn test_vocal_bars_are_louder() {
    // with the vocalist's expression gain at zero only the vocal part changes
    let loud_catalog = Catalog::builtin();
    let mut mute_catalog = Catalog::builtin();
    for vocalist in mute_catalog.vocalists.values_mut() {
        vocalist.characteristics.power = 0.0;
    }

    let req = request(8.0, 120.0).vocalist("blaze");
    let sung = generate(&req, &loud_catalog).unwrap().buffer;
    let mute = generate(&req, &mute_catalog).unwrap().buffer;

    let diff: Vec<f64> = sung
        .left
        .iter()
        .zip(&mute.left)
        .map(|(a, b)| a - b)
        .collect();
    let diff = StereoOutput::from_mono(diff);

    assert!(energy(span(&diff, 0.0, 2.0, 8000.0)) > 0.0);
    assert_eq!(energy(span(&diff, 2.0, 4.0, 8000.0)), 0.0);
    assert!(energy(span(&diff, 4.0, 6.0, 8000.0)) > 0.0);
    assert_eq!(energy(span(&diff, 6.0, 8.0, 8000.0)), 0.0);
}

#[test]
fn test_channels_are_identical() {
    let song = generate(&request(4.0, 128.0).mood("energetic"), &Catalog::builtin()).unwrap();
    assert!(song.buffer.is_mono());
}

#[test]
fn test_last_bar_is_truncated() {
    // 5 s at 120 BPM: three bars, the last one cut at 1 s
    let song = generate(&request(5.0, 120.0), &Catalog::builtin()).unwrap();
    assert_eq!(song.summary.total_bars, 3);
    assert_eq!(song.buffer.len(), 40_000);
    assert!(energy(span(&song.buffer, 4.0, 5.0, 8000.0)) > 0.0);
}

#[test]
fn test_progression_cycles_across_long_songs() {
    let timeline = ChordTimeline::build(64.0, 120.0, Mood::Uplifting).unwrap();
    assert_eq!(timeline.len(), 32);
    assert_eq!(timeline.bars[0].chord, "C");
    assert_eq!(timeline.bars[8].chord, "C");
    assert_eq!(timeline.bars[10].chord, "Am");
}

#[test]
fn test_every_mood_renders() {
    let catalog = Catalog::builtin();
    for mood in Mood::ALL {
        let song = generate(&request(2.0, 140.0).mood(mood.id()), &catalog).unwrap();
        assert_eq!(song.summary.mood, mood);
        assert!(song.summary.peak > 0.0, "{}", mood);
    }
}

#[test]
fn test_mix_is_not_normalized() {
    let song = generate(&request(4.0, 120.0).vocalist("blaze"), &Catalog::builtin()).unwrap();
    let normalized = MasterPolicy::Normalize { headroom_db: 0.0 }.apply(&song.buffer);
    assert!((peak(&normalized) - 1.0).abs() < 1e-9);
    // the raw mix keeps whatever level the generators summed to
    assert_eq!(song.summary.peak, peak(&song.buffer));
    assert!((song.summary.peak - 1.0).abs() > 1e-6);
}
