//! `ensemble revert` — restore agent files from their pre-apply backups.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use ensemble_core::config;
use ensemble_sync::{revert, RevertAction, RevertOptions, RevertReport, DEFAULT_BACKUP_SUFFIX};

use super::{agents_opt, project_dir};

/// Arguments for `ensemble revert`.
#[derive(Args, Debug)]
pub struct RevertArgs {
    /// Agents to revert (identifier or name substring); all agents when omitted.
    #[arg(long, short = 'a', value_delimiter = ',')]
    pub agents: Vec<String>,

    /// Project directory (defaults to the current directory).
    #[arg(long)]
    pub dir: Option<PathBuf>,

    /// Leave backup artifacts in place after restoring.
    #[arg(long)]
    pub keep_backups: bool,

    /// Suffix of the backup artifacts to restore from.
    #[arg(long, default_value = DEFAULT_BACKUP_SUFFIX)]
    pub backup_suffix: String,

    /// Show what would be reverted without touching any files.
    #[arg(long)]
    pub dry_run: bool,

    /// Print per-agent failure detail.
    #[arg(long, short = 'v')]
    pub verbose: bool,
}

impl RevertArgs {
    pub fn run(self) -> Result<()> {
        let dir = project_dir(self.dir)?;
        let agent_ids = agents_opt(self.agents);
        let config = config::load_config(&dir, None).context("failed to load configuration")?;
        let opts = RevertOptions {
            backup_suffix: self.backup_suffix,
            keep_backups: self.keep_backups,
            dry_run: self.dry_run,
        };

        let report = revert(&dir, &config, agent_ids.as_deref(), &opts)?;
        print_report(&report, self.dry_run, self.verbose);

        if report.has_failures() {
            let failed: Vec<&str> = report
                .failed_agents()
                .iter()
                .map(|a| a.identifier())
                .collect();
            return Err(anyhow::anyhow!(
                "revert failed for {} agent(s): {}",
                failed.len(),
                failed.join(", ")
            ));
        }
        Ok(())
    }
}

fn print_report(report: &RevertReport, dry_run: bool, verbose: bool) {
    let prefix = if dry_run { "[dry-run] " } else { "" };
    let touched = report
        .reverts
        .iter()
        .filter(|r| !matches!(r.outcome, Ok(RevertAction::Skipped { .. }) | Err(_)))
        .count();
    let failed = report.reverts.iter().filter(|r| r.outcome.is_err()).count();

    println!("{prefix}✓ {touched} reverted, {failed} failed");

    for revert in &report.reverts {
        match &revert.outcome {
            Ok(RevertAction::Restored { path }) => println!("  ↩  {}", path.display()),
            Ok(RevertAction::Deleted { path }) => println!("  −  {}", path.display()),
            Ok(RevertAction::WouldRestore { path }) | Ok(RevertAction::WouldDelete { path }) => {
                println!("  ~  {}", path.display())
            }
            Ok(RevertAction::Skipped { path }) => println!("  ·  {}", path.display()),
            Err(err) => {
                let line = if verbose {
                    format!("  ✗  {}: {err}", revert.agent.identifier())
                } else {
                    format!("  ✗  {}", revert.agent.identifier())
                };
                println!("{}", line.red());
            }
        }
    }
}
