//! CLI tool for generating branded PowerPoint decks.

use anyhow::{bail, Context, Result};
use chrono::Datelike;
use clap::Parser;
use deck_core::demo::demo_spec;
use deck_core::load_theme;
use deck_render::{generate_to_path, DeckOptions};
use serde_json::Value;
use std::io::{self, IsTerminal, Read};
use std::path::{Path, PathBuf};

/// Generate a branded .pptx deck from a JSON slide specification.
#[derive(Parser, Debug)]
#[command(name = "deck-gen")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Slide specification JSON (read from stdin when omitted)
    #[arg(short, long, conflicts_with = "demo")]
    spec: Option<PathBuf>,

    /// Render the built-in demo deck with one slide of every type
    #[arg(long)]
    demo: bool,

    /// Brand token JSON file
    #[arg(short, long)]
    brand: PathBuf,

    /// Output .pptx file
    #[arg(short, long)]
    out: PathBuf,

    /// Directory logo paths are relative to (default: the brand file's directory)
    #[arg(long)]
    assets_dir: Option<PathBuf>,

    /// Footer caption (default: "© <year> <brand name>")
    #[arg(long)]
    footer: Option<String>,

    /// Most member cards shown on a team slide
    #[arg(long, default_value_t = deck_render::options::DEFAULT_MAX_TEAM_MEMBERS)]
    max_team_members: usize,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    }

    let spec = load_spec(&args)?;

    let assets_dir = args
        .assets_dir
        .clone()
        .unwrap_or_else(|| brand_dir(&args.brand));
    let theme = load_theme(&args.brand, &assets_dir)
        .with_context(|| format!("Failed to load brand tokens from {}", args.brand.display()))?;

    let year = chrono::Utc::now().year();
    let mut options = DeckOptions::for_brand(&theme.brand_name, year)
        .with_max_team_members(args.max_team_members);
    if let Some(footer) = &args.footer {
        options = options.with_footer(footer.as_str());
    }

    let output = generate_to_path(&spec, &theme, &options, &args.out)
        .with_context(|| format!("Failed to generate {}", args.out.display()))?;

    for failure in &output.failures {
        eprintln!(
            "Skipped slide {} ({}): {}",
            failure.number, failure.kind, failure.message
        );
    }
    println!(
        "Saved {} ({} slides)",
        args.out.display(),
        output.rendered
    );

    Ok(())
}

/// Read the slide specification from `--spec`, `--demo` or stdin.
fn load_spec(args: &Args) -> Result<Value> {
    if args.demo {
        log::debug!("Using built-in demo spec");
        return Ok(demo_spec());
    }

    let text = match &args.spec {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?,
        None => {
            let stdin = io::stdin();
            if stdin.is_terminal() {
                bail!("No slide spec given: pass --spec <file>, --demo, or pipe JSON on stdin");
            }
            let mut text = String::new();
            stdin
                .lock()
                .read_to_string(&mut text)
                .context("Failed to read spec from stdin")?;
            text
        }
    };

    serde_json::from_str(&text).context("Slide spec is not valid JSON")
}

fn brand_dir(brand: &Path) -> PathBuf {
    brand
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."))
}
