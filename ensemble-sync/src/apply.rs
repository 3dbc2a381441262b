//! Apply engine — backup-then-write materialization of concatenated rules.
//!
//! ## Per-agent protocol
//!
//! 1. Resolve the output path (config override or agent default).
//! 2. Render agent-specific content, normalize CRLF to LF.
//! 3. Unchanged content short-circuits: no write, no backup churn.
//! 4. An existing file is copied byte-for-byte to `<path><suffix>`,
//!    overwriting any prior backup. Backup completes before the write.
//! 5. Content lands via `<path>.ensemble.tmp` + rename.
//!
//! One agent's failure never aborts its siblings: [`apply_all`] attempts
//! every agent and collects per-agent outcomes.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use ensemble_core::LoadedConfig;
use ensemble_rules::AgentKind;

use crate::error::{io_err, SyncError};

/// Suffix appended to an output path to name its backup artifact.
pub const DEFAULT_BACKUP_SUFFIX: &str = ".bak";

/// Options threaded through an apply run.
#[derive(Debug, Clone)]
pub struct ApplyOptions {
    pub backup_suffix: String,
    pub dry_run: bool,
}

impl Default for ApplyOptions {
    fn default() -> Self {
        ApplyOptions {
            backup_suffix: DEFAULT_BACKUP_SUFFIX.to_string(),
            dry_run: false,
        }
    }
}

/// Outcome of an individual file write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteResult {
    /// File was written (content changed or did not previously exist).
    Written { path: PathBuf },
    /// File was skipped — on-disk content already matches.
    Unchanged { path: PathBuf },
    /// `--dry-run` mode: the file *would* have been written.
    WouldWrite { path: PathBuf },
}

impl WriteResult {
    pub fn path(&self) -> &Path {
        match self {
            WriteResult::Written { path }
            | WriteResult::Unchanged { path }
            | WriteResult::WouldWrite { path } => path,
        }
    }
}

/// One agent's apply outcome; failures stay attached to their agent.
#[derive(Debug)]
pub struct AgentApply {
    pub agent: AgentKind,
    pub outcome: Result<WriteResult, SyncError>,
}

/// Outcome of applying a batch of agents.
#[derive(Debug, Default)]
pub struct ApplyReport {
    pub applies: Vec<AgentApply>,
}

impl ApplyReport {
    pub fn has_failures(&self) -> bool {
        self.applies.iter().any(|a| a.outcome.is_err())
    }

    pub fn failed_agents(&self) -> Vec<AgentKind> {
        self.applies
            .iter()
            .filter(|a| a.outcome.is_err())
            .map(|a| a.agent)
            .collect()
    }
}

/// Resolve where an agent's file lands: config `output_path` joined under
/// the project directory, else the agent's default location.
pub fn resolve_output_path(
    agent: AgentKind,
    config: &LoadedConfig,
    project_dir: &Path,
) -> PathBuf {
    match config.output_override(agent.identifier()) {
        Some(relative) => project_dir.join(relative),
        None => agent.default_output_path(project_dir),
    }
}

/// `<path><suffix>` sibling holding the pre-apply copy.
pub fn backup_path(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(suffix);
    PathBuf::from(name)
}

/// Read an output file, or `None` if it does not exist.
pub(crate) fn read_existing(path: &Path) -> Result<Option<String>, SyncError> {
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
        Err(err) => Err(io_err(path, err)),
    }
}

/// Apply the concatenated rules to a single agent's output file.
pub fn apply_agent(
    agent: AgentKind,
    rules: &str,
    project_dir: &Path,
    config: &LoadedConfig,
    opts: &ApplyOptions,
) -> Result<WriteResult, SyncError> {
    let path = resolve_output_path(agent, config, project_dir);
    let rendered = agent.render(rules).replace("\r\n", "\n");

    let existing = read_existing(&path)?;
    let existing_normalized = existing.as_ref().map(|c| c.replace("\r\n", "\n"));
    if existing_normalized.as_deref() == Some(rendered.as_str()) {
        tracing::debug!("unchanged: {}", path.display());
        return Ok(WriteResult::Unchanged { path });
    }

    if opts.dry_run {
        tracing::info!("[dry-run] would write: {}", path.display());
        return Ok(WriteResult::WouldWrite { path });
    }

    // Backup must complete before the write may begin.
    if existing.is_some() {
        let backup = backup_path(&path, &opts.backup_suffix);
        std::fs::copy(&path, &backup).map_err(|e| io_err(&backup, e))?;
        tracing::debug!("backed up: {}", backup.display());
    }

    write_atomic(&path, &rendered)?;
    tracing::info!("wrote: {}", path.display());
    Ok(WriteResult::Written { path })
}

/// Write `content` to `path` via a `.ensemble.tmp` sibling and rename,
/// creating parent directories as needed. The tmp file is removed if the
/// rename fails.
fn write_atomic(path: &Path, content: &str) -> Result<(), SyncError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| io_err(parent, e))?;
    }
    let tmp = PathBuf::from(format!("{}.ensemble.tmp", path.display()));
    std::fs::write(&tmp, content).map_err(|e| io_err(&tmp, e))?;
    if let Err(err) = std::fs::rename(&tmp, path) {
        let _ = std::fs::remove_file(&tmp);
        return Err(io_err(path, err));
    }
    Ok(())
}

/// Apply the rules to every agent in `agents`, in order.
///
/// Never aborts early: each agent's failure is recorded in the report and
/// the remaining agents are still attempted.
pub fn apply_all(
    agents: &[AgentKind],
    rules: &str,
    project_dir: &Path,
    config: &LoadedConfig,
    opts: &ApplyOptions,
) -> ApplyReport {
    let mut report = ApplyReport::default();
    for agent in agents {
        let outcome = apply_agent(*agent, rules, project_dir, config, opts);
        if let Err(err) = &outcome {
            tracing::warn!("apply failed for {}: {}", agent.identifier(), err);
        }
        report.applies.push(AgentApply {
            agent: *agent,
            outcome,
        });
    }
    report
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
