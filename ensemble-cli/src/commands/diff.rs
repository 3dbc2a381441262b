//! `ensemble diff` — show unified diffs of what apply would write.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use ensemble_core::config;
use ensemble_sync::{diff::diff_agents, pipeline, resolve_selected_agents};

use super::{agents_opt, project_dir};

/// Arguments for `ensemble diff`.
#[derive(Args, Debug)]
pub struct DiffArgs {
    /// Agent filters (identifier or name substring), comma-separated or repeated.
    #[arg(long, short = 'a', value_delimiter = ',')]
    pub agents: Vec<String>,

    /// Project directory (defaults to the current directory).
    #[arg(long)]
    pub dir: Option<PathBuf>,
}

impl DiffArgs {
    pub fn run(self) -> Result<()> {
        let dir = project_dir(self.dir)?;
        let config = config::load_config(&dir, agents_opt(self.agents))
            .context("failed to load configuration")?;
        let agents = resolve_selected_agents(&config)?;
        let rules = pipeline::load_rules(&dir)?;

        let diffs = diff_agents(&agents, &rules, &dir, &config)?;
        if diffs.is_empty() {
            println!("No differences.");
            return Ok(());
        }

        for diff in diffs {
            print!("{}", diff.unified_diff);
            if !diff.unified_diff.ends_with('\n') {
                println!();
            }
        }
        Ok(())
    }
}
