//! Dry-run unified diff support for `ensemble diff`.

use std::path::{Path, PathBuf};

use similar::TextDiff;

use ensemble_core::LoadedConfig;
use ensemble_rules::AgentKind;

use crate::apply::{read_existing, resolve_output_path};
use crate::error::SyncError;

/// A single rendered file diff.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDiff {
    pub agent: AgentKind,
    pub path: PathBuf,
    pub unified_diff: String,
}

/// Render what apply would write for each agent and compare it to current
/// on-disk content.
///
/// No files are written. Agents whose files already match are omitted.
pub fn diff_agents(
    agents: &[AgentKind],
    rules: &str,
    project_dir: &Path,
    config: &LoadedConfig,
) -> Result<Vec<FileDiff>, SyncError> {
    let mut diffs = Vec::new();
    for agent in agents {
        let path = resolve_output_path(*agent, config, project_dir);
        let rendered = agent.render(rules).replace("\r\n", "\n");
        let existing = read_existing(&path)?
            .map(|c| c.replace("\r\n", "\n"))
            .unwrap_or_default();
        if existing == rendered {
            continue;
        }

        let relative = path.strip_prefix(project_dir).unwrap_or(path.as_path());
        let old_header = format!("a/{}", relative.display());
        let new_header = format!("b/{}", relative.display());
        let unified = TextDiff::from_lines(&existing, &rendered)
            .unified_diff()
            .header(&old_header, &new_header)
            .context_radius(3)
            .to_string();

        diffs.push(FileDiff {
            agent: *agent,
            path,
            unified_diff: unified,
        });
    }
    Ok(diffs)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
