//! Shared apply pipeline entrypoint used by the CLI subcommands.

use std::path::Path;

use ensemble_core::{config, LoadedConfig};
use ensemble_rules::{concatenate, load_fragments};

use crate::apply::{apply_all, ApplyOptions, ApplyReport};
use crate::error::SyncError;
use crate::selector::resolve_selected_agents;

/// Load and concatenate every rule fragment for a project.
///
/// Zero fragments is an error: truncating every agent file to an empty
/// document is never what a sync run should do.
pub fn load_rules(project_dir: &Path) -> Result<String, SyncError> {
    let dir = config::rules_dir(project_dir);
    let fragments = load_fragments(&dir)?;
    if fragments.is_empty() {
        return Err(SyncError::NoRules { path: dir });
    }
    Ok(concatenate(&fragments, project_dir))
}

/// Run the apply pipeline: select agents, merge fragments, write files.
///
/// This is the canonical apply entrypoint for `ensemble apply`.
pub fn run(
    project_dir: &Path,
    config: &LoadedConfig,
    opts: &ApplyOptions,
) -> Result<ApplyReport, SyncError> {
    let agents = resolve_selected_agents(config)?;
    let rules = load_rules(project_dir)?;
    Ok(apply_all(&agents, &rules, project_dir, config, opts))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
