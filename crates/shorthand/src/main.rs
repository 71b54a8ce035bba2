//! shorthand CLI - natural-language interaction directives.
//!
//! Provides commands for:
//! - `check`: Parse and bind a page's directives and report problems
//! - `run`: Fire events on a page and print the resulting HTML

mod commands;
mod error;
mod output;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use shorthand_config::CliSettings;
use tracing_subscriber::EnvFilter;

use commands::{CheckArgs, RunArgs};
use output::Output;

/// shorthand - natural-language interaction directives for web pages.
#[derive(Parser)]
#[command(name = "shorthand", version, about)]
struct Cli {
    /// Path to configuration file (default: auto-discover shorthand.toml).
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Base directory for relative `load` URLs (overrides config).
    #[arg(long, global = true)]
    base_dir: Option<PathBuf>,

    /// Refuse to fetch http:// and https:// URLs (overrides config).
    #[arg(long, global = true)]
    no_http: bool,

    /// Enable verbose output (log parsing, binding and dispatch).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    fn cli_settings(&self) -> CliSettings {
        CliSettings {
            base_dir: self.base_dir.clone(),
            allow_http: self.no_http.then_some(false),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Parse and bind a page's directives, then list them with any diagnostics.
    Check(CheckArgs),
    /// Bind a page's directives, fire events and print the resulting HTML.
    Run(RunArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let settings = cli.cli_settings();
    let config_path = cli.config.as_deref();
    let result = match cli.command {
        Commands::Check(args) => args.execute(config_path, &settings),
        Commands::Run(args) => args.execute(config_path, &settings),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
