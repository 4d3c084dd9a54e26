//! Catalog command implementation
//!
//! Lists the vocalists and languages a run can use, or exports the built-in
//! catalog as a starting point for a custom one.

use anyhow::{Context, Result};
use colored::Colorize;
use serde::Serialize;
use songforge_spec::Catalog;
use std::path::Path;
use std::process::ExitCode;

use super::json_output::print_json;
use crate::input::load_catalog;

/// One vocalist in `catalog list --json`.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct VocalistEntry {
    pub id: String,
    pub name: String,
    pub base_frequency_hz: f64,
    pub timbre: String,
    pub style: String,
    pub languages: Vec<String>,
    pub default: bool,
}

/// One language in `catalog list --json`.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct LanguageEntry {
    pub id: String,
    pub rhythm: String,
    pub frequency_multiplier: f64,
    pub patterns: usize,
    pub default: bool,
}

/// Output of `catalog list --json`.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CatalogListing {
    pub vocalists: Vec<VocalistEntry>,
    pub languages: Vec<LanguageEntry>,
}

fn lowercase_debug<T: std::fmt::Debug>(value: &T) -> String {
    format!("{:?}", value).to_lowercase()
}

impl CatalogListing {
    /// Flattens a catalog, in id order.
    pub fn from_catalog(catalog: &Catalog) -> Self {
        let vocalists = catalog
            .vocalists
            .iter()
            .map(|(id, v)| VocalistEntry {
                id: id.clone(),
                name: v.name.clone(),
                base_frequency_hz: v.base_frequency_hz,
                timbre: lowercase_debug(&v.timbre),
                style: v.style.clone(),
                languages: v.languages.clone(),
                default: *id == catalog.default_vocalist,
            })
            .collect();
        let languages = catalog
            .languages
            .iter()
            .map(|(id, l)| LanguageEntry {
                id: id.clone(),
                rhythm: lowercase_debug(&l.rhythm),
                frequency_multiplier: l.frequency_multiplier,
                patterns: l.patterns.len(),
                default: *id == catalog.default_language,
            })
            .collect();
        Self {
            vocalists,
            languages,
        }
    }
}

/// Run `catalog list`.
pub fn run_list(catalog_path: Option<&Path>, json_output: bool) -> Result<ExitCode> {
    let catalog = load_catalog(catalog_path).context("Failed to load catalog")?;
    let listing = CatalogListing::from_catalog(&catalog);

    if json_output {
        print_json(&listing)?;
        return Ok(ExitCode::SUCCESS);
    }

    println!("{}", "Vocalists:".cyan().bold());
    for v in &listing.vocalists {
        let marker = if v.default { " (default)".dimmed() } else { "".normal() };
        println!(
            "  {:<8} {} {}{}",
            v.id.bold(),
            v.name,
            format!(
                "{:.2} Hz, {}, {}, speaks {}",
                v.base_frequency_hz,
                v.timbre,
                v.style,
                v.languages.join("/")
            )
            .dimmed(),
            marker
        );
    }

    println!("\n{}", "Languages:".cyan().bold());
    for l in &listing.languages {
        let marker = if l.default { " (default)".dimmed() } else { "".normal() };
        println!(
            "  {:<10} {}{}",
            l.id.bold(),
            format!(
                "{} rhythm, x{} pitch, {} patterns",
                l.rhythm, l.frequency_multiplier, l.patterns
            )
            .dimmed(),
            marker
        );
    }
    Ok(ExitCode::SUCCESS)
}

/// Run `catalog export`: writes the built-in catalog as JSON to `out`, or
/// stdout when `out` is `None`.
pub fn run_export(out: Option<&Path>) -> Result<ExitCode> {
    let json = Catalog::builtin()
        .to_json_pretty()
        .context("Failed to serialize catalog")?;

    match out {
        Some(path) => {
            std::fs::write(path, json)
                .with_context(|| format!("Failed to write catalog: {}", path.display()))?;
            println!("{} {}", "Exported:".green().bold(), path.display());
        }
        None => println!("{}", json),
    }
    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_listing_marks_defaults() {
        let catalog = Catalog::builtin();
        let listing = CatalogListing::from_catalog(&catalog);

        assert_eq!(listing.vocalists.len(), catalog.vocalists.len());
        assert_eq!(listing.languages.len(), catalog.languages.len());
        assert_eq!(listing.vocalists.iter().filter(|v| v.default).count(), 1);
        assert_eq!(listing.languages.iter().filter(|l| l.default).count(), 1);

        let aria = listing.vocalists.iter().find(|v| v.id == "aria").unwrap();
        assert_eq!(aria.timbre, "sine");
    }

    #[test]
    fn test_export_then_list_custom_catalog() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("catalog.json");

        assert_eq!(run_export(Some(&path)).unwrap(), ExitCode::SUCCESS);
        assert_eq!(run_list(Some(&path), true).unwrap(), ExitCode::SUCCESS);

        let exported = Catalog::from_file(&path).unwrap();
        assert_eq!(exported, Catalog::builtin());
    }
}
