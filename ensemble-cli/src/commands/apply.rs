//! `ensemble apply` — merge rule fragments and write per-agent files.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use ensemble_core::config;
use ensemble_sync::{pipeline, ApplyOptions, ApplyReport, WriteResult, DEFAULT_BACKUP_SUFFIX};

use super::{agents_opt, project_dir};

/// Arguments for `ensemble apply`.
#[derive(Args, Debug)]
pub struct ApplyArgs {
    /// Agent filters (identifier or name substring), comma-separated or repeated.
    #[arg(long, short = 'a', value_delimiter = ',')]
    pub agents: Vec<String>,

    /// Project directory (defaults to the current directory).
    #[arg(long)]
    pub dir: Option<PathBuf>,

    /// Show what would be written without actually writing any files.
    #[arg(long)]
    pub dry_run: bool,

    /// Suffix for the pre-apply backup artifact.
    #[arg(long, default_value = DEFAULT_BACKUP_SUFFIX)]
    pub backup_suffix: String,

    /// Print per-agent failure detail.
    #[arg(long, short = 'v')]
    pub verbose: bool,
}

impl ApplyArgs {
    pub fn run(self) -> Result<()> {
        let dir = project_dir(self.dir)?;
        let config = config::load_config(&dir, agents_opt(self.agents))
            .context("failed to load configuration")?;
        let opts = ApplyOptions {
            backup_suffix: self.backup_suffix,
            dry_run: self.dry_run,
        };

        let report = pipeline::run(&dir, &config, &opts)?;
        print_report(&report, self.dry_run, self.verbose);

        if report.has_failures() {
            let failed: Vec<&str> = report
                .failed_agents()
                .iter()
                .map(|a| a.identifier())
                .collect();
            return Err(anyhow::anyhow!(
                "apply failed for {} agent(s): {}",
                failed.len(),
                failed.join(", ")
            ));
        }
        Ok(())
    }
}

fn print_report(report: &ApplyReport, dry_run: bool, verbose: bool) {
    let prefix = if dry_run { "[dry-run] " } else { "" };
    let written = report
        .applies
        .iter()
        .filter(|a| {
            matches!(
                a.outcome,
                Ok(WriteResult::Written { .. }) | Ok(WriteResult::WouldWrite { .. })
            )
        })
        .count();
    let unchanged = report
        .applies
        .iter()
        .filter(|a| matches!(a.outcome, Ok(WriteResult::Unchanged { .. })))
        .count();
    let failed = report.applies.len() - written - unchanged;

    println!("{prefix}✓ {written} written, {unchanged} unchanged, {failed} failed");

    for apply in &report.applies {
        match &apply.outcome {
            Ok(WriteResult::Written { path }) => println!("  ✎  {}", path.display()),
            Ok(WriteResult::WouldWrite { path }) => println!("  ~  {}", path.display()),
            Ok(WriteResult::Unchanged { path }) => println!("  ·  {}", path.display()),
            Err(err) => {
                let line = if verbose {
                    format!("  ✗  {}: {err}", apply.agent.identifier())
                } else {
                    format!("  ✗  {}", apply.agent.identifier())
                };
                println!("{}", line.red());
            }
        }
    }
}
