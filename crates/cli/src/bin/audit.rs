//! CLI tool for auditing generated decks against a brand.

use anyhow::{Context, Result};
use clap::Parser;
use deck_core::{load_theme, Theme};
use deck_pptx::audit_path;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// Check .pptx files for canvas size, brand colors, brand fonts and logo placement.
#[derive(Parser, Debug)]
#[command(name = "deck-audit")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Deck file(s) to audit
    #[arg(required = true)]
    input: Vec<PathBuf>,

    /// Brand token JSON file (default: built-in brand defaults)
    #[arg(short, long)]
    brand: Option<PathBuf>,

    /// Print reports as JSON
    #[arg(long)]
    json: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();

    if args.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    }

    let theme = match &args.brand {
        Some(path) => {
            let base = path.parent().unwrap_or_else(|| Path::new("."));
            load_theme(path, base)
                .with_context(|| format!("Failed to load brand tokens from {}", path.display()))?
        }
        None => Theme::default(),
    };

    let mut failed = false;
    for input in &args.input {
        log::debug!("Auditing {}", input.display());
        let report = match audit_path(input, &theme) {
            Ok(report) => report,
            Err(e) => {
                eprintln!("Error auditing {}: {}", input.display(), e);
                failed = true;
                continue;
            }
        };

        if args.json {
            let json = serde_json::json!({ "file": input, "report": &report });
            println!("{}", serde_json::to_string_pretty(&json)?);
        } else {
            println!("{}", input.display());
            println!("{}", report);
        }
        failed |= !report.passed();
    }

    Ok(if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}
