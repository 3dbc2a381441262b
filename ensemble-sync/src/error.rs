//! Error types for ensemble-sync.

use std::path::PathBuf;

use thiserror::Error;

use ensemble_core::ConfigError;
use ensemble_rules::{AgentKind, RulesError};

/// All errors that can arise from selection, apply, and revert operations.
#[derive(Debug, Error)]
pub enum SyncError {
    /// An error from rule-fragment handling.
    #[error("rules error: {0}")]
    Rules(#[from] RulesError),

    /// An error from configuration loading.
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// An I/O error, with annotated path for context.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// One or more user-supplied agent names matched no known agent.
    /// Carries the full valid identifier set as remediation context.
    #[error("unknown agent(s): {}; valid agents are: {}", unknown.join(", "), valid.join(", "))]
    UnknownAgents {
        unknown: Vec<String>,
        valid: Vec<String>,
    },

    /// The project has no rule fragments to apply.
    #[error("no rule fragments found under {path}; run `ensemble init` to scaffold one")]
    NoRules { path: PathBuf },
}

/// Convenience constructor for [`SyncError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> SyncError {
    SyncError::Io {
        path: path.into(),
        source,
    }
}

/// Build an [`SyncError::UnknownAgents`] with the valid set filled in from
/// the registry. Pure: formatting lives in the error's `Display`.
pub(crate) fn unknown_agents(unknown: Vec<String>) -> SyncError {
    SyncError::UnknownAgents {
        unknown,
        valid: AgentKind::all()
            .iter()
            .map(|a| a.identifier().to_string())
            .collect(),
    }
}
