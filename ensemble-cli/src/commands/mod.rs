//! Subcommand implementations.

pub mod agents;
pub mod apply;
pub mod diff;
pub mod init;
pub mod revert;
pub mod status;

use std::path::PathBuf;

use anyhow::{Context, Result};

/// Canonicalized project directory from an optional `--dir` flag
/// (defaults to the current working directory).
pub(crate) fn project_dir(dir: Option<PathBuf>) -> Result<PathBuf> {
    let dir = match dir {
        Some(d) => d,
        None => std::env::current_dir().context("cannot determine current directory")?,
    };
    dir.canonicalize()
        .with_context(|| format!("cannot resolve directory '{}'", dir.display()))
}

/// `--agents` values as the selector expects them: `None` when empty.
pub(crate) fn agents_opt(agents: Vec<String>) -> Option<Vec<String>> {
    if agents.is_empty() {
        None
    } else {
        Some(agents)
    }
}
