//! Ensemble — sync canonical rule files into AI coding agent config files.
//!
//! # Usage
//!
//! ```text
//! ensemble init [DIR]
//! ensemble agents [--dir DIR]
//! ensemble apply [--agents a,b] [--dir DIR] [--dry-run] [--backup-suffix S] [--verbose]
//! ensemble revert [--agents a,b] [--dir DIR] [--keep-backups] [--backup-suffix S] [--dry-run] [--verbose]
//! ensemble status [--dir DIR] [--json]
//! ensemble diff [--agents a,b] [--dir DIR]
//! ```

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{
    agents::AgentsArgs, apply::ApplyArgs, diff::DiffArgs, init::InitArgs, revert::RevertArgs,
    status::StatusArgs,
};

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "ensemble",
    version,
    about = "Sync canonical rule files into AI coding agent config files",
    long_about = None,
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Scaffold .ensemble/config.yaml and a starter rule fragment.
    Init(InitArgs),

    /// List the agent registry with output paths and enablement.
    Agents(AgentsArgs),

    /// Merge rule fragments and write each selected agent's config file.
    Apply(ApplyArgs),

    /// Restore agent config files from their pre-apply backups.
    Revert(RevertArgs),

    /// Show per-agent sync state (missing / current / modified).
    Status(StatusArgs),

    /// Show unified diffs of what apply would write.
    Diff(DiffArgs),
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

/// Stable, tool-identifying rendering for any surfaced failure.
fn format_error(err: &anyhow::Error) -> String {
    format!("ensemble: {err:#}")
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Init(args) => args.run(),
        Commands::Agents(args) => args.run(),
        Commands::Apply(args) => args.run(),
        Commands::Revert(args) => args.run(),
        Commands::Status(args) => args.run(),
        Commands::Diff(args) => args.run(),
    }
}

fn main() {
    let cli = Cli::parse();
    if let Err(err) = run(cli) {
        eprintln!("{}", format_error(&err));
        std::process::exit(1);
    }
}
