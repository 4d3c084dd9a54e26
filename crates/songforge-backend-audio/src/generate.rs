//! Main entry point for song generation.
//!
//! A run validates the request, resolves the mood, vocalist and language
//! (taking fallbacks with a warning), lays out the bar grid and then asks
//! every generator to add its part of each bar into one shared buffer. The
//! buffer is returned unprocessed; [`SongRender::to_wav`] applies a
//! [`MasterPolicy`] to a copy at export.

use std::collections::BTreeSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use serde::Serialize;
use songforge_spec::{
    epoch_millis_now, validate_request, Catalog, ErrorCode, Mood, SongArtifact, SongRequest,
    ValidationWarning, WarningCode,
};

use crate::error::{AudioError, AudioResult};
use crate::mixer::{peak, MasterPolicy, StereoOutput};
use crate::rng::{create_component_rng, MELODY_STREAM, PERCUSSION_STREAM, VOCAL_STREAM};
use crate::synthesis::{
    BarGenerator, BassGenerator, MelodyGenerator, PercussionGenerator, SongContext,
    VocalGenerator, VocalPhrase,
};
use crate::tables;
use crate::timeline::ChordTimeline;
use crate::wav::WavResult;

/// Export settings.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RenderOptions {
    /// Overrides the request's sample rate when set.
    pub sample_rate: Option<u32>,
    /// Headroom treatment applied to the exported copy.
    pub master: MasterPolicy,
}

/// Progress after a bar has been rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Progress {
    /// Bars rendered so far.
    pub completed_bars: usize,
    /// Bars in the song.
    pub total_bars: usize,
}

impl Progress {
    /// Completed share in [0, 1].
    pub fn fraction(&self) -> f64 {
        if self.total_bars == 0 {
            1.0
        } else {
            self.completed_bars as f64 / self.total_bars as f64
        }
    }
}

/// Shared flag checked between bars. Clones observe the same flag.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    /// Creates an unset token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    /// Returns true once [`CancelToken::cancel`] has been called on any clone.
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Facts about a finished render.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderSummary {
    /// Song title.
    pub title: String,
    /// Mood used.
    pub mood: Mood,
    /// Vocalist id used.
    pub vocalist: String,
    /// Language id used.
    pub language: String,
    /// Seed of the run.
    pub seed: u32,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Frames per channel.
    pub num_frames: usize,
    /// Number of bars.
    pub total_bars: usize,
    /// Chord of every bar, in order.
    pub chords: Vec<String>,
    /// Bars that carry vocals.
    pub vocal_bars: Vec<usize>,
    /// Phoneme tokens drawn for each vocal bar.
    pub phrases: Vec<VocalPhrase>,
    /// Largest absolute sample of the unprocessed mix.
    pub peak: f64,
    /// True if the unprocessed mix exceeds full scale.
    pub clipped: bool,
    /// Fallback warnings, formatted.
    pub warnings: Vec<String>,
}

/// Output of a successful run.
#[derive(Debug, Clone)]
pub struct SongRender {
    /// The unprocessed mix.
    pub buffer: StereoOutput,
    /// Sample rate of `buffer`.
    pub sample_rate: u32,
    /// Render facts.
    pub summary: RenderSummary,
    /// Exportable metadata.
    pub artifact: SongArtifact,
    /// Fallbacks taken during the run.
    pub warnings: Vec<ValidationWarning>,
}

impl SongRender {
    /// A mastered copy of the buffer.
    pub fn mastered(&self, policy: MasterPolicy) -> StereoOutput {
        policy.apply(&self.buffer)
    }

    /// Masters and encodes the song as 16-bit stereo WAV.
    pub fn to_wav(&self, policy: MasterPolicy) -> WavResult {
        WavResult::from_stereo_output(&self.mastered(policy), self.sample_rate)
    }
}

/// Generates a song without progress reporting.
pub fn generate(request: &SongRequest, catalog: &Catalog) -> AudioResult<SongRender> {
    generate_with(request, catalog, |_| {}, &CancelToken::new())
}

/// Generates a song and encodes it with `options`.
pub fn render_to_wav(
    request: &SongRequest,
    catalog: &Catalog,
    options: &RenderOptions,
) -> AudioResult<(SongRender, WavResult)> {
    let request = match options.sample_rate {
        Some(rate) => request.clone().sample_rate(rate),
        None => request.clone(),
    };
    let render = generate(&request, catalog)?;
    let wav = render.to_wav(options.master);
    Ok((render, wav))
}

/// Generates a song, calling `on_progress` after every bar.
///
/// `cancel` is checked before each bar. A cancelled run drops the partial
/// buffer and returns [`AudioError::Cancelled`].
pub fn generate_with<F>(
    request: &SongRequest,
    catalog: &Catalog,
    mut on_progress: F,
    cancel: &CancelToken,
) -> AudioResult<SongRender>
where
    F: FnMut(Progress),
{
    let mut warnings = check_inputs(request, catalog)?;

    let mood = Mood::resolve(&request.mood);
    let vocalist = catalog.vocalist(&request.vocalist_id);
    let language = catalog.language(&request.language_id);

    let timeline = ChordTimeline::build(request.duration_seconds, request.tempo_bpm, mood)?;
    warnings.extend(chord_warnings(&timeline));
    for warning in &warnings {
        tracing::warn!(code = %warning.code, "{}", warning.message);
    }

    let sample_rate = request.sample_rate as f64;
    let total_bars = timeline.len();
    let mut buffer = StereoOutput::new(request.num_samples());

    tracing::info!(
        title = %request.title,
        mood = %mood,
        vocalist = vocalist.id,
        language = language.id,
        seed = request.seed,
        bars = total_bars,
        frames = buffer.len(),
        "generating song"
    );

    let ctx = SongContext {
        sample_rate,
        beat_seconds: timeline.beat_seconds,
        vocalist: vocalist.profile,
        language: language.profile,
    };

    let mut bass = BassGenerator;
    let mut percussion =
        PercussionGenerator::new(create_component_rng(request.seed, PERCUSSION_STREAM));
    let mut melody = MelodyGenerator::new(create_component_rng(request.seed, MELODY_STREAM));
    let mut vocal = VocalGenerator::new(create_component_rng(request.seed, VOCAL_STREAM));

    for bar in &timeline.bars {
        if cancel.is_cancelled() {
            tracing::info!(completed_bars = bar.index, total_bars, "generation cancelled");
            return Err(AudioError::Cancelled {
                completed_bars: bar.index,
                total_bars,
            });
        }

        bass.render_bar(bar, &ctx, &mut buffer);
        percussion.render_bar(bar, &ctx, &mut buffer);
        melody.render_bar(bar, &ctx, &mut buffer);
        vocal.render_bar(bar, &ctx, &mut buffer);

        tracing::debug!(bar = bar.index, chord = %bar.chord, vocal = bar.carries_vocal(), "rendered bar");
        on_progress(Progress {
            completed_bars: bar.index + 1,
            total_bars,
        });
    }

    let peak = peak(&buffer);
    let summary = RenderSummary {
        title: request.title.clone(),
        mood,
        vocalist: vocalist.id.to_string(),
        language: language.id.to_string(),
        seed: request.seed,
        sample_rate: request.sample_rate,
        num_frames: buffer.len(),
        total_bars,
        chords: timeline.bars.iter().map(|bar| bar.chord.clone()).collect(),
        vocal_bars: timeline.vocal_bars(),
        phrases: vocal.into_phrases(),
        peak,
        clipped: peak > 1.0,
        warnings: warnings.iter().map(ToString::to_string).collect(),
    };
    tracing::info!(peak, clipped = summary.clipped, "song generated");

    let artifact = SongArtifact::new(
        request,
        mood,
        vocalist.id,
        language.id,
        epoch_millis_now(),
    );

    Ok(SongRender {
        buffer,
        sample_rate: request.sample_rate,
        summary,
        artifact,
        warnings,
    })
}

/// Rejects unusable requests and catalogs before anything is allocated.
fn check_inputs(request: &SongRequest, catalog: &Catalog) -> AudioResult<Vec<ValidationWarning>> {
    let catalog_check = catalog.validate();
    if let Some(error) = catalog_check.errors.first() {
        return Err(AudioError::invalid_param("catalog", error.to_string()));
    }

    let result = validate_request(request, catalog);
    if let Some(error) = result.errors.first() {
        return Err(match error.code {
            ErrorCode::InvalidDuration | ErrorCode::DurationTooLong => {
                AudioError::InvalidDuration {
                    duration: request.duration_seconds,
                }
            }
            ErrorCode::InvalidTempo | ErrorCode::TempoOutOfRange => AudioError::InvalidTempo {
                tempo: request.tempo_bpm,
            },
            ErrorCode::InvalidSampleRate => AudioError::InvalidSampleRate {
                rate: request.sample_rate,
            },
            _ => AudioError::invalid_param(
                error.path.clone().unwrap_or_else(|| "request".to_string()),
                error.message.clone(),
            ),
        });
    }

    Ok(result.warnings)
}

/// One warning per distinct chord missing from the bass or melody table.
fn chord_warnings(timeline: &ChordTimeline) -> Vec<ValidationWarning> {
    let chords: BTreeSet<&str> = timeline.bars.iter().map(|bar| bar.chord.as_str()).collect();
    let mut warnings = Vec::new();

    for chord in chords {
        if tables::bass_frequency(chord).is_none() {
            warnings.push(ValidationWarning::new(
                WarningCode::UnknownChord,
                format!("no bass note for chord '{}', using C", chord),
            ));
        }
        if tables::melody_scale(chord).is_none() {
            warnings.push(ValidationWarning::new(
                WarningCode::UnknownChord,
                format!("no melody scale for chord '{}', using C major", chord),
            ));
        }
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn short_request() -> SongRequest {
        SongRequest::new(2.0, 120.0).sample_rate(8000).seed(7)
    }

    #[test]
    fn test_progress_reports_every_bar() {
        let mut seen = Vec::new();
        let request = SongRequest::new(8.0, 120.0).sample_rate(4000);
        generate_with(&request, &Catalog::builtin(), |p| seen.push(p), &CancelToken::new())
            .unwrap();

        let completed: Vec<usize> = seen.iter().map(|p| p.completed_bars).collect();
        assert_eq!(completed, vec![1, 2, 3, 4]);
        assert!(seen.iter().all(|p| p.total_bars == 4));
        assert_eq!(seen.last().unwrap().fraction(), 1.0);
    }

    #[test]
    fn test_cancel_before_start() {
        let cancel = CancelToken::new();
        cancel.clone().cancel();
        let err = generate_with(&short_request(), &Catalog::builtin(), |_| {}, &cancel)
            .unwrap_err();
        assert!(matches!(
            err,
            AudioError::Cancelled {
                completed_bars: 0,
                total_bars: 1
            }
        ));
    }

    #[test]
    fn test_cancel_mid_song() {
        let cancel = CancelToken::new();
        let request = SongRequest::new(8.0, 120.0).sample_rate(4000);
        let err = generate_with(
            &request,
            &Catalog::builtin(),
            |p| {
                if p.completed_bars == 2 {
                    cancel.cancel();
                }
            },
            &cancel,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            AudioError::Cancelled {
                completed_bars: 2,
                total_bars: 4
            }
        ));
    }

    #[test]
    fn test_invalid_request_fails_before_render() {
        let catalog = Catalog::builtin();
        assert!(matches!(
            generate(&SongRequest::new(-1.0, 120.0), &catalog),
            Err(AudioError::InvalidDuration { .. })
        ));
        assert!(matches!(
            generate(&SongRequest::new(1.0, 0.0), &catalog),
            Err(AudioError::InvalidTempo { .. })
        ));
        assert!(matches!(
            generate(&SongRequest::new(1.0, 120.0).sample_rate(0), &catalog),
            Err(AudioError::InvalidSampleRate { rate: 0 })
        ));
    }

    #[test]
    fn test_extreme_tempo_fails_before_allocation() {
        let catalog = Catalog::builtin();
        assert!(matches!(
            generate(&SongRequest::new(60.0, 1e20).sample_rate(8000), &catalog),
            Err(AudioError::InvalidTempo { .. })
        ));
        assert!(matches!(
            generate(&SongRequest::new(1.0, 1e-300).sample_rate(8000), &catalog),
            Err(AudioError::InvalidTempo { .. })
        ));
        assert!(matches!(
            generate(&SongRequest::new(1e9, 120.0).sample_rate(8000), &catalog),
            Err(AudioError::InvalidDuration { .. })
        ));
        assert!(matches!(
            generate(&SongRequest::new(600.0, 120.0).sample_rate(192_000), &catalog),
            Err(AudioError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn test_invalid_catalog_is_rejected() {
        let mut catalog = Catalog::builtin();
        catalog.default_vocalist = "nobody".to_string();
        let err = generate(&short_request(), &catalog).unwrap_err();
        assert!(matches!(err, AudioError::InvalidParameter { .. }));
    }

    #[test]
    fn test_fallbacks_are_reported() {
        let request = short_request().mood("jazzy").vocalist("ghost").language("klingon");
        let render = generate(&request, &Catalog::builtin()).unwrap();

        assert_eq!(render.summary.mood, Mood::Uplifting);
        assert_eq!(render.summary.vocalist, "aria");
        assert_eq!(render.summary.language, "english");
        let codes: Vec<WarningCode> = render.warnings.iter().map(|w| w.code).collect();
        assert_eq!(
            codes,
            vec![
                WarningCode::UnknownMood,
                WarningCode::UnknownVocalist,
                WarningCode::UnknownLanguage
            ]
        );
    }

    #[test]
    fn test_mysterious_reports_missing_scale() {
        // 'A' appears at bar 3 and has no melody scale
        let request = SongRequest::new(8.0, 120.0).mood("mysterious").sample_rate(2000);
        let render = generate(&request, &Catalog::builtin()).unwrap();
        assert_eq!(render.warnings.len(), 1);
        assert_eq!(render.warnings[0].code, WarningCode::UnknownChord);
        assert!(render.summary.warnings[0].contains("'A'"));
    }

    #[test]
    fn test_summary_and_artifact() {
        let request = SongRequest::new(8.0, 120.0)
            .title("Night Drive")
            .mood("chill")
            .vocalist("zen")
            .language("japanese")
            .sample_rate(4000)
            .seed(3);
        let render = generate(&request, &Catalog::builtin()).unwrap();

        assert_eq!(render.summary.total_bars, 4);
        assert_eq!(render.summary.chords, vec!["Dm", "Bb", "F", "C"]);
        assert_eq!(render.summary.vocal_bars, vec![0, 2]);
        let phrase_bars: Vec<usize> = render.summary.phrases.iter().map(|p| p.bar).collect();
        assert_eq!(phrase_bars, vec![0, 2]);
        assert_eq!(render.summary.peak, peak(&render.buffer));
        assert_eq!(render.summary.clipped, render.summary.peak > 1.0);

        assert_eq!(render.artifact.title, "Night Drive");
        assert_eq!(render.artifact.mood, Mood::Chill);
        assert_eq!(render.artifact.vocalist, "zen");
        assert_eq!(render.artifact.seed, 3);
    }

    #[test]
    fn test_to_wav_leaves_buffer_unprocessed() {
        let render = generate(&short_request(), &Catalog::builtin()).unwrap();
        let before = render.buffer.clone();
        let wav = render.to_wav(MasterPolicy::Normalize { headroom_db: -1.0 });
        assert_eq!(render.buffer, before);
        assert_eq!(wav.num_frames, 16000);
    }

    #[test]
    fn test_render_options_override_sample_rate() {
        let options = RenderOptions {
            sample_rate: Some(4000),
            master: MasterPolicy::HardClip,
        };
        let (render, wav) = render_to_wav(&short_request(), &Catalog::builtin(), &options).unwrap();
        assert_eq!(render.sample_rate, 4000);
        assert_eq!(wav.sample_rate, 4000);
        assert_eq!(render.buffer.len(), 8000);
    }
}
