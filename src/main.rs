//! KeyKit - software keyboard core diagnostics
//!
//! Replays recorded touch scripts against the keyboard faces and lists the
//! available faces.
//!
//! # Usage
//!
//! ```bash
//! # Replay a script on the letters face
//! keykit replay session.json
//!
//! # Start on another face, with custom faces loaded
//! keykit replay session.json --face com.example.dvorak --faces faces.json
//!
//! # List faces
//! keykit faces
//! ```

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use keykit::cli::{FacesArgs, ReplayArgs};
use keykit::config::Config;

/// KeyKit - software keyboard core diagnostics
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to a config file (defaults to the platform config directory)
    #[arg(long, value_name = "PATH", global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Replay a touch script and print the resulting text and events
    Replay(ReplayArgs),
    /// List available faces
    Faces(FacesArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    match &cli.command {
        Commands::Replay(args) => args.execute(&config),
        Commands::Faces(args) => args.execute(),
    }
}
