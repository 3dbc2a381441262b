//! `ensemble init [DIR]` — scaffold the .ensemble config and starter rule.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use ensemble_core::config;

/// Arguments for `ensemble init`.
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Project directory to initialize.
    #[arg(default_value = ".")]
    pub dir: PathBuf,
}

impl InitArgs {
    pub fn run(self) -> Result<()> {
        let dir = self
            .dir
            .canonicalize()
            .with_context(|| format!("cannot resolve path '{}'", self.dir.display()))?;

        let report = config::init(&dir)
            .with_context(|| format!("failed to initialize '{}'", dir.display()))?;

        if report.created.is_empty() {
            println!("✓ '{}' is already initialized", dir.display());
            return Ok(());
        }

        println!("✓ Initialized '{}'", dir.display());
        for path in &report.created {
            println!("  + {}", path.display());
        }
        println!("Edit the rules under .ensemble/rules/, then run 'ensemble apply'.");
        Ok(())
    }
}
