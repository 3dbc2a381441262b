//! Error types for ensemble-rules.

use std::path::PathBuf;

use thiserror::Error;

/// All errors that can arise from rule-fragment handling.
#[derive(Debug, Error)]
pub enum RulesError {
    /// Filesystem error while discovering or reading fragments.
    #[error("rules io error at {path}: {source}")]
    Io { path: PathBuf, source: std::io::Error },
}

pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> RulesError {
    RulesError::Io {
        path: path.into(),
        source,
    }
}
