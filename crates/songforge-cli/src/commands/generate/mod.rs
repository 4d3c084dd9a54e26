//! Generate command implementation
//!
//! Renders a song from a request and writes it as a WAV file, optionally
//! with the song artifact next to it.

mod human;
mod json;


use anyhow::Result;
use songforge_backend_audio::{AudioResult, MasterPolicy, Progress, SongRender, SongTask, WavResult};
use songforge_spec::{Catalog, SongArtifact, SongRequest};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use crate::input::RequestFlags;

/// Inputs of one `generate` invocation.
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    /// Request JSON file; flags override its fields.
    pub request_path: Option<PathBuf>,
    /// Request fields given as flags.
    pub flags: RequestFlags,
    /// Custom catalog JSON file.
    pub catalog_path: Option<PathBuf>,
    /// Exact WAV output path.
    pub out: Option<PathBuf>,
    /// Output directory, used when `out` is not set.
    pub out_dir: Option<PathBuf>,
    /// Also write the song artifact JSON.
    pub artifact: bool,
    /// Headroom treatment for the exported file.
    pub master: MasterPolicy,
}

impl GenerateOptions {
    /// Where the WAV for a song titled `title` goes.
    pub fn wav_path(&self, title: &str) -> PathBuf {
        if let Some(out) = &self.out {
            return out.clone();
        }
        let dir = self.out_dir.as_deref().unwrap_or_else(|| Path::new("."));
        dir.join(format!("{}.wav", file_stem(title)))
    }

    /// Where the artifact goes: next to the WAV.
    pub fn artifact_path(&self, wav_path: &Path, artifact: &SongArtifact) -> PathBuf {
        match wav_path.parent() {
            Some(parent) => parent.join(artifact.file_name()),
            None => PathBuf::from(artifact.file_name()),
        }
    }
}

/// File stem for a title: whitespace runs become `_`.
pub fn file_stem(title: &str) -> String {
    let stem = title.split_whitespace().collect::<Vec<_>>().join("_");
    if stem.is_empty() {
        "song".to_string()
    } else {
        stem
    }
}

/// Runs the render on a worker thread, forwarding each progress event.
pub(crate) fn render_with_progress<F>(
    request: SongRequest,
    catalog: Arc<Catalog>,
    mut on_progress: F,
) -> AudioResult<SongRender>
where
    F: FnMut(Progress),
{
    let task = SongTask::spawn(request, catalog)?;
    while let Some(progress) = task.next_progress() {
        on_progress(progress);
    }
    task.join()
}

/// Creates the parent directory of `path` if it has one.
pub(crate) fn ensure_parent(path: &Path) -> std::io::Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => std::fs::create_dir_all(parent),
        _ => Ok(()),
    }
}

/// Files written by one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenFiles {
    /// The WAV file.
    pub wav: PathBuf,
    /// The artifact JSON, if requested.
    pub artifact: Option<PathBuf>,
}

/// Writes the encoded song and, if requested, its artifact.
pub(crate) fn write_outputs(
    options: &GenerateOptions,
    render: &SongRender,
    wav: &WavResult,
) -> std::io::Result<WrittenFiles> {
    let wav_path = options.wav_path(&render.summary.title);
    ensure_parent(&wav_path)?;
    std::fs::write(&wav_path, &wav.wav_data)?;

    let artifact = if options.artifact {
        let path = options.artifact_path(&wav_path, &render.artifact);
        let json = render
            .artifact
            .to_json_pretty()
            .map_err(|e| std::io::Error::other(e.to_string()))?;
        std::fs::write(&path, json)?;
        Some(path)
    } else {
        None
    };

    tracing::info!(wav = %wav_path.display(), "wrote song");
    Ok(WrittenFiles {
        wav: wav_path,
        artifact,
    })
}

/// Run the generate command
///
/// # Arguments
/// * `options` - Request source, catalog, output location and master policy
/// * `json_output` - Whether to output machine-readable JSON diagnostics
///
/// # Returns
/// Exit code: 0 success, 1 input error, 2 generation error
pub fn run(options: &GenerateOptions, json_output: bool) -> Result<ExitCode> {
    if json_output {
        json::run_json(options)
    } else {
        human::run_human(options)
    }
}
