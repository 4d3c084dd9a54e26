//! CLI argument definitions for the SongForge command-line interface.
//!
//! All `#[derive(Parser)]` and `#[derive(Subcommand)]` types are defined here,
//! keeping `main.rs` focused on dispatch logic.

use clap::{Args, Parser, Subcommand};
use songforge_backend_audio::MasterPolicy;
use songforge_cli::input::RequestFlags;
use songforge_spec::DEFAULT_SAMPLE_RATE;
use std::path::PathBuf;

/// SongForge - Procedural song generation
#[derive(Parser)]
#[command(name = "songforge")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub(crate) struct Cli {
    /// Raise log verbosity (-v info, -vv debug, -vvv trace); RUST_LOG overrides
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Request fields shared by `generate`, `validate` and `play`.
#[derive(Args, Debug, Clone, Default)]
pub(crate) struct RequestArgs {
    /// Song title
    #[arg(long)]
    pub title: Option<String>,

    /// Mood (uplifting, romantic, energetic, chill, mysterious, epic)
    #[arg(long)]
    pub mood: Option<String>,

    /// Song length in seconds (default: 60)
    #[arg(short, long)]
    pub duration: Option<f64>,

    /// Tempo in BPM (default: 120)
    #[arg(short, long)]
    pub tempo: Option<f64>,

    /// Vocalist id
    #[arg(long)]
    pub vocalist: Option<String>,

    /// Language id
    #[arg(long)]
    pub language: Option<String>,

    /// Seed for every random draw
    #[arg(short, long)]
    pub seed: Option<u32>,

    /// Output sample rate in Hz (default: 44100)
    #[arg(long)]
    pub sample_rate: Option<u32>,
}

impl From<RequestArgs> for RequestFlags {
    fn from(args: RequestArgs) -> Self {
        RequestFlags {
            title: args.title,
            mood: args.mood,
            duration: args.duration,
            tempo: args.tempo,
            vocalist: args.vocalist,
            language: args.language,
            seed: args.seed,
            sample_rate: args.sample_rate,
        }
    }
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Render a song to a WAV file
    Generate {
        /// Request JSON file (flags override its fields)
        #[arg(short, long)]
        request: Option<PathBuf>,

        #[command(flatten)]
        fields: RequestArgs,

        /// Custom catalog JSON file (default: built-in)
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Exact output path for the WAV file
        #[arg(short, long, conflicts_with = "out_dir")]
        out: Option<PathBuf>,

        /// Output directory; the file is named after the title
        #[arg(long)]
        out_dir: Option<PathBuf>,

        /// Also write the song artifact JSON next to the WAV
        #[arg(long)]
        artifact: bool,

        /// Export master policy: raw, hard-clip, soft-clip[:threshold], normalize[:headroom_db]
        #[arg(long, default_value = "soft-clip:0.8")]
        master: MasterPolicy,

        /// Output machine-readable JSON diagnostics (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Validate a request without rendering
    Validate {
        /// Request JSON file (flags override its fields)
        #[arg(short, long)]
        request: Option<PathBuf>,

        #[command(flatten)]
        fields: RequestArgs,

        /// Custom catalog JSON file (default: built-in)
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Output machine-readable JSON diagnostics (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Inspect or export the vocalist and language catalog
    Catalog {
        #[command(subcommand)]
        command: CatalogCommands,
    },

    /// Render a short preview tone of a vocalist
    Preview {
        /// Vocalist id
        #[arg(long)]
        vocalist: String,

        /// Language id
        #[arg(long, default_value = "english")]
        language: String,

        /// Custom catalog JSON file (default: built-in)
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Output sample rate in Hz
        #[arg(long, default_value_t = DEFAULT_SAMPLE_RATE)]
        sample_rate: u32,

        /// Output WAV path
        #[arg(short, long)]
        out: PathBuf,
    },

    /// Render stacked harmonics of a vocalist
    Harmony {
        /// Vocalist id
        #[arg(long)]
        vocalist: String,

        /// Harmony layers above the fundamental
        #[arg(short, long, default_value_t = 3)]
        layers: usize,

        /// Custom catalog JSON file (default: built-in)
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Output sample rate in Hz
        #[arg(long, default_value_t = DEFAULT_SAMPLE_RATE)]
        sample_rate: u32,

        /// Output WAV path
        #[arg(short, long)]
        out: PathBuf,
    },

    /// Render a song and stream raw f32 stereo PCM to stdout or a file
    Play {
        /// Request JSON file (flags override its fields)
        #[arg(short, long, conflicts_with = "artifact")]
        request: Option<PathBuf>,

        /// Song artifact JSON to regenerate
        #[arg(short, long)]
        artifact: Option<PathBuf>,

        #[command(flatten)]
        fields: RequestArgs,

        /// Custom catalog JSON file (default: built-in)
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Master policy applied before playback
        #[arg(long, default_value = "soft-clip:0.8")]
        master: MasterPolicy,

        /// Frames per write
        #[arg(long)]
        block_frames: Option<usize>,

        /// Write the PCM stream to a file instead of stdout
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
pub(crate) enum CatalogCommands {
    /// List vocalists and languages
    List {
        /// Custom catalog JSON file (default: built-in)
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Output machine-readable JSON
        #[arg(long)]
        json: bool,
    },

    /// Write the built-in catalog as JSON
    Export {
        /// Output path (default: stdout)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
}
