//! wikembed CLI - wiki embed directive renderer.
//!
//! Provides commands for:
//! - `render`: Render a wiki text file, replacing embed markup with HTML
//! - `check`: Preview a file and report embed resolution problems

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{CheckArgs, RenderArgs};
use output::Output;

/// wikembed - wiki embed directive renderer.
#[derive(Parser)]
#[command(name = "wikembed", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a wiki text file to HTML-spliced output.
    Render(RenderArgs),
    /// Check a wiki text file for embed resolution problems.
    Check(CheckArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default
    let verbose = match &cli.command {
        Commands::Render(args) => args.verbose,
        Commands::Check(args) => args.verbose,
    };
    let filter = if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let result = match cli.command {
        Commands::Render(args) => args.execute(),
        Commands::Check(args) => args.execute(&output),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
