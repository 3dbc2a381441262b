//! Revert engine — restore agent files from their backups.
//!
//! Depends only on current filesystem state (generated file + backup
//! presence), never on in-memory state from a prior apply:
//! - backup present → copy it over the output path, then delete the
//!   backup (unless configured to keep it);
//! - no backup but generated file present → delete the file;
//! - neither → no-op.
//!
//! Restore completes before backup deletion.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use ensemble_core::LoadedConfig;
use ensemble_rules::AgentKind;

use crate::apply::{backup_path, resolve_output_path, DEFAULT_BACKUP_SUFFIX};
use crate::error::{io_err, SyncError};
use crate::selector::select_by_filters;

/// Options threaded through a revert run.
#[derive(Debug, Clone)]
pub struct RevertOptions {
    pub backup_suffix: String,
    pub keep_backups: bool,
    pub dry_run: bool,
}

impl Default for RevertOptions {
    fn default() -> Self {
        RevertOptions {
            backup_suffix: DEFAULT_BACKUP_SUFFIX.to_string(),
            keep_backups: false,
            dry_run: false,
        }
    }
}

/// What revert did (or would do) for one agent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RevertAction {
    /// Backup copied over the output path; backup removed unless kept.
    Restored { path: PathBuf },
    /// No backup existed; the generated file was deleted.
    Deleted { path: PathBuf },
    /// Neither file nor backup existed.
    Skipped { path: PathBuf },
    /// `--dry-run`: a restore *would* happen.
    WouldRestore { path: PathBuf },
    /// `--dry-run`: a delete *would* happen.
    WouldDelete { path: PathBuf },
}

impl RevertAction {
    pub fn path(&self) -> &Path {
        match self {
            RevertAction::Restored { path }
            | RevertAction::Deleted { path }
            | RevertAction::Skipped { path }
            | RevertAction::WouldRestore { path }
            | RevertAction::WouldDelete { path } => path,
        }
    }
}

/// One agent's revert outcome; failures stay attached to their agent.
#[derive(Debug)]
pub struct AgentRevert {
    pub agent: AgentKind,
    pub outcome: Result<RevertAction, SyncError>,
}

/// Outcome of reverting a batch of agents.
#[derive(Debug, Default)]
pub struct RevertReport {
    pub reverts: Vec<AgentRevert>,
}

impl RevertReport {
    pub fn has_failures(&self) -> bool {
        self.reverts.iter().any(|r| r.outcome.is_err())
    }

    pub fn failed_agents(&self) -> Vec<AgentKind> {
        self.reverts
            .iter()
            .filter(|r| r.outcome.is_err())
            .map(|r| r.agent)
            .collect()
    }
}

/// Revert a single agent's output path to its pre-apply state.
pub fn revert_agent(
    agent: AgentKind,
    project_dir: &Path,
    config: &LoadedConfig,
    opts: &RevertOptions,
) -> Result<RevertAction, SyncError> {
    let path = resolve_output_path(agent, config, project_dir);
    let backup = backup_path(&path, &opts.backup_suffix);

    if backup.exists() {
        if opts.dry_run {
            return Ok(RevertAction::WouldRestore { path });
        }
        std::fs::copy(&backup, &path).map_err(|e| io_err(&path, e))?;
        // Restore must complete before the backup may be removed.
        if !opts.keep_backups {
            remove_tolerant(&backup)?;
        }
        tracing::info!("restored: {}", path.display());
        return Ok(RevertAction::Restored { path });
    }

    if path.exists() {
        if opts.dry_run {
            return Ok(RevertAction::WouldDelete { path });
        }
        remove_tolerant(&path)?;
        tracing::info!("deleted: {}", path.display());
        return Ok(RevertAction::Deleted { path });
    }

    tracing::debug!("nothing to revert: {}", path.display());
    Ok(RevertAction::Skipped { path })
}

/// Remove a file, tolerating a concurrent disappearance.
fn remove_tolerant(path: &Path) -> Result<(), SyncError> {
    match std::fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
        Err(err) => Err(io_err(path, err)),
    }
}

/// Revert a set of agents (or all agents when `agent_ids` is absent/empty).
///
/// Explicit names are validated like selection filters: any unknown name
/// fails the whole call before anything is touched. Per-agent filesystem
/// failures are collected, not propagated early.
pub fn revert(
    project_dir: &Path,
    config: &LoadedConfig,
    agent_ids: Option<&[String]>,
    opts: &RevertOptions,
) -> Result<RevertReport, SyncError> {
    let agents = match agent_ids {
        Some(ids) if !ids.is_empty() => select_by_filters(ids)?,
        _ => AgentKind::all().to_vec(),
    };

    let mut report = RevertReport::default();
    for agent in agents {
        let outcome = revert_agent(agent, project_dir, config, opts);
        if let Err(err) = &outcome {
            tracing::warn!("revert failed for {}: {}", agent.identifier(), err);
        }
        report.reverts.push(AgentRevert { agent, outcome });
    }
    Ok(report)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
