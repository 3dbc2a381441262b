//! Configuration types for Ensemble.
//!
//! All path fields use `PathBuf`; never `&str` or `String` for filesystem paths.
//! Persisted types are serializable/deserializable via serde + serde_yaml.

use std::collections::BTreeMap;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Per-agent settings from a config file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct AgentSettings {
    /// Explicit include/exclude override. `None` defers to the selection tier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,

    /// Output path override, relative to the project directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_path: Option<PathBuf>,
}

/// On-disk shape of `.ensemble/config.yaml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct FileConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    /// Agents to target when the CLI passes no `--agents` filters.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_agents: Option<Vec<String>>,

    /// Per-agent settings keyed by agent identifier.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub agents: BTreeMap<String, AgentSettings>,
}

/// Fully resolved configuration for one invocation.
///
/// Built once by [`crate::config::load_config_at`]; read-only afterward.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LoadedConfig {
    /// Agent filters supplied on the command line.
    pub cli_agents: Option<Vec<String>>,

    /// Default agent list from persistent configuration.
    pub default_agents: Option<Vec<String>>,

    /// Per-agent settings keyed by agent identifier.
    pub agents: BTreeMap<String, AgentSettings>,
}

impl LoadedConfig {
    /// Settings record for an agent, if the config carries one.
    pub fn agent_settings(&self, identifier: &str) -> Option<&AgentSettings> {
        self.agents.get(identifier)
    }

    /// Explicit `enabled` override for an agent, if set.
    pub fn enabled_override(&self, identifier: &str) -> Option<bool> {
        self.agent_settings(identifier).and_then(|s| s.enabled)
    }

    /// Output-path override for an agent, if set.
    pub fn output_override(&self, identifier: &str) -> Option<&PathBuf> {
        self.agent_settings(identifier)
            .and_then(|s| s.output_path.as_ref())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
