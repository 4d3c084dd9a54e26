//! Play command implementation
//!
//! Renders a song and streams it as raw interleaved little-endian `f32`
//! stereo frames, to stdout or a file. Pipe into a player, e.g.
//! `songforge play | aplay -f FLOAT_LE -c 2 -r 44100`.
//!
//! Status goes to stderr so stdout stays pure audio.

use anyhow::{Context, Result};
use colored::Colorize;
use songforge_backend_audio::{AudioError, MasterPolicy, PlaybackState, Player, RawPcmSink};
use songforge_spec::{SongArtifact, DEFAULT_SAMPLE_RATE};
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use super::exit_code_for;
use super::generate::render_with_progress;
use crate::input::{build_request, load_catalog, InputError, RequestFlags};

/// Inputs of one `play` invocation.
#[derive(Debug, Clone, Default)]
pub struct PlayOptions {
    /// Request JSON file; flags override its fields.
    pub request_path: Option<PathBuf>,
    /// Song artifact to regenerate instead of a request.
    pub artifact_path: Option<PathBuf>,
    /// Request fields given as flags.
    pub flags: RequestFlags,
    /// Custom catalog JSON file.
    pub catalog_path: Option<PathBuf>,
    /// Headroom treatment before playback.
    pub master: MasterPolicy,
    /// Frames per write; `None` uses the player default.
    pub block_frames: Option<usize>,
    /// Raw PCM destination; stdout when `None`.
    pub out: Option<PathBuf>,
}

fn load_artifact(path: &std::path::Path) -> Result<SongArtifact, InputError> {
    let content = std::fs::read_to_string(path).map_err(|source| InputError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    SongArtifact::from_json(&content).map_err(|e| InputError::JsonParse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Run the play command
///
/// # Returns
/// Exit code: 0 played to the end, 1 input error, 2 generation or output error
pub fn run(options: &PlayOptions) -> Result<ExitCode> {
    let catalog = load_catalog(options.catalog_path.as_deref()).context("Failed to load catalog")?;
    let request = match &options.artifact_path {
        Some(path) => {
            let artifact = load_artifact(path).context("Failed to load song artifact")?;
            let sample_rate = options.flags.sample_rate.unwrap_or(DEFAULT_SAMPLE_RATE);
            options.flags.apply(artifact.to_request(sample_rate))
        }
        None => build_request(options.request_path.as_deref(), &options.flags)
            .context("Failed to load request")?,
    };

    eprintln!("{} {}", "Rendering:".cyan().bold(), request.title);
    let render = match render_with_progress(request, Arc::new(catalog), |_| {}) {
        Ok(render) => render,
        Err(e) => {
            eprintln!("  {} {}", "x".red(), e);
            return Ok(exit_code_for(&e));
        }
    };

    let buffer = Arc::new(render.mastered(options.master));
    let mut player = Player::new(buffer, render.sample_rate)
        .on_ended(|| tracing::debug!("end of song reached"));
    if let Some(block_frames) = options.block_frames {
        player = player.with_block_frames(block_frames);
    }

    eprintln!(
        "{} {} frames at {} Hz, f32le stereo",
        "Playing:".cyan().bold(),
        render.buffer.len(),
        render.sample_rate
    );

    let played = match &options.out {
        Some(path) => match File::create(path) {
            Ok(file) => {
                let mut sink = RawPcmSink::new(BufWriter::new(file));
                player.play_to_end(&mut sink)
            }
            Err(e) => Err(AudioError::unavailable(format!(
                "cannot open '{}': {}",
                path.display(),
                e
            ))),
        },
        None => {
            let mut sink = RawPcmSink::new(std::io::stdout().lock());
            player.play_to_end(&mut sink)
        }
    };

    match played {
        Ok(PlaybackState::Ended) => {
            eprintln!("{}", "Done".green().bold());
            Ok(ExitCode::SUCCESS)
        }
        Ok(state) => {
            eprintln!("{} playback ended as {:?}", "!".yellow(), state);
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            eprintln!("  {} {}", "x".red(), e);
            Ok(exit_code_for(&e))
        }
    }
}
