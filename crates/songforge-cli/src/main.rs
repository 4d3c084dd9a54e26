//! SongForge CLI - Command-line interface for procedural song generation
//!
//! This binary provides commands for validating requests, rendering songs
//! and vocalist auditions, and inspecting the catalog.

mod cli_args;

use clap::Parser;
use std::process::ExitCode;

use cli_args::{CatalogCommands, Cli, Commands};
// Use modules from the library crate
use songforge_cli::commands;
use songforge_cli::commands::generate::GenerateOptions;
use songforge_cli::commands::play::PlayOptions;
use songforge_cli::logging;

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let result = match cli.command {
        Commands::Generate {
            request,
            fields,
            catalog,
            out,
            out_dir,
            artifact,
            master,
            json,
        } => {
            let options = GenerateOptions {
                request_path: request,
                flags: fields.into(),
                catalog_path: catalog,
                out,
                out_dir,
                artifact,
                master,
            };
            commands::generate::run(&options, json)
        }
        Commands::Validate {
            request,
            fields,
            catalog,
            json,
        } => commands::validate::run(
            request.as_deref(),
            &fields.into(),
            catalog.as_deref(),
            json,
        ),
        Commands::Catalog { command } => match command {
            CatalogCommands::List { catalog, json } => {
                commands::catalog::run_list(catalog.as_deref(), json)
            }
            CatalogCommands::Export { out } => commands::catalog::run_export(out.as_deref()),
        },
        Commands::Preview {
            vocalist,
            language,
            catalog,
            sample_rate,
            out,
        } => commands::preview::run_preview(
            &vocalist,
            &language,
            catalog.as_deref(),
            sample_rate,
            &out,
        ),
        Commands::Harmony {
            vocalist,
            layers,
            catalog,
            sample_rate,
            out,
        } => commands::preview::run_harmony(
            &vocalist,
            layers,
            catalog.as_deref(),
            sample_rate,
            &out,
        ),
        Commands::Play {
            request,
            artifact,
            fields,
            catalog,
            master,
            block_frames,
            out,
        } => {
            let options = PlayOptions {
                request_path: request,
                artifact_path: artifact,
                flags: fields.into(),
                catalog_path: catalog,
                master,
                block_frames,
                out,
            };
            commands::play::run(&options)
        }
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", colored::Colorize::red("error"), e);
            ExitCode::from(commands::EXIT_INPUT_ERROR)
        }
    }
}
