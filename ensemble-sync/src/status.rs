//! Per-agent sync state classification.
//!
//! Signal precedence:
//! 1. `Missing` (no file at the output path)
//! 2. `Modified` (on-disk content differs from what apply would write)
//! 3. `Current`
//!
//! Backup presence is reported alongside, as revert eligibility.

use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};

use ensemble_core::LoadedConfig;
use ensemble_rules::AgentKind;

use crate::apply::{backup_path, read_existing, resolve_output_path};
use crate::error::SyncError;

/// Classification of one agent's output file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgentState {
    Missing,
    Current,
    Modified,
}

/// Status row for one agent.
#[derive(Debug, Clone)]
pub struct AgentStatus {
    pub agent: AgentKind,
    pub path: PathBuf,
    pub state: AgentState,
    pub has_backup: bool,
}

/// Classify every agent in `agents` against what apply would write.
///
/// No files are written.
pub fn check(
    agents: &[AgentKind],
    rules: &str,
    project_dir: &Path,
    config: &LoadedConfig,
    backup_suffix: &str,
) -> Result<Vec<AgentStatus>, SyncError> {
    let mut statuses = Vec::with_capacity(agents.len());
    for agent in agents {
        let path = resolve_output_path(*agent, config, project_dir);
        let has_backup = backup_path(&path, backup_suffix).exists();

        let state = match read_existing(&path)? {
            None => AgentState::Missing,
            Some(disk) => {
                let rendered = agent.render(rules).replace("\r\n", "\n");
                if digest(&disk.replace("\r\n", "\n")) == digest(&rendered) {
                    AgentState::Current
                } else {
                    AgentState::Modified
                }
            }
        };

        statuses.push(AgentStatus {
            agent: *agent,
            path,
            state,
            has_backup,
        });
    }
    Ok(statuses)
}

fn digest(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    hex::encode(hasher.finalize())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
