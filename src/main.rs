//! LayerKit - inspect, compare, translate and capture keymap layers
//!
//! # Usage
//!
//! ```bash
//! # Render the default layers of ./keymap.json
//! layerkit show
//!
//! # Render the Symbol layer mirrored, with raw keycodes
//! layerkit show Symbol --mirror --keycodes
//!
//! # Compare layers against an older revision
//! layerkit compare --left v36:keymap.json --layer QWERTY
//! ```

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use layerkit::cli::{CaptureArgs, CliResult, CompareArgs, ShowArgs, TranslateArgs};
use layerkit::config::Config;

/// Inspect, compare, translate and capture layers of a keymap JSON export
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Config file to use instead of the platform default
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render layers as two-handed tables
    Show(ShowArgs),
    /// Compare layers between two keymap files
    Compare(CompareArgs),
    /// Capture preserved layers into the override document
    Capture(CaptureArgs),
    /// Translate keymap files to a keyboard locale
    Translate(TranslateArgs),
}

impl Cli {
    fn run(&self) -> CliResult<()> {
        let config = match &self.config {
            Some(path) => Config::load_from(path),
            None => Config::load(),
        }
        .unwrap_or_else(|e| {
            tracing::warn!("{:#}, using default configuration", e);
            Config::default()
        });

        match &self.command {
            Command::Show(args) => args.execute(&config),
            Command::Compare(args) => args.execute(&config),
            Command::Capture(args) => args.execute(&config),
            Command::Translate(args) => args.execute(&config),
        }
    }
}

fn main() {
    let cli = Cli::parse();

    // Initialize tracing (stderr only, stdout carries command output)
    let filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_ansi(false)
                .without_time(),
        )
        .init();

    if let Err(e) = cli.run() {
        eprintln!("Error: {e}");
        std::process::exit(e.exit_code());
    }
}
