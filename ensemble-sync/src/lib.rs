//! # ensemble-sync
//!
//! Agent selection, backup-gated apply, and revert for Ensemble rule files.
//!
//! Call [`pipeline::run`] to select agents, merge rule fragments, and write
//! every agent file for a project, or [`revert`] to restore the pre-apply
//! filesystem state from backups.

pub mod apply;
pub mod diff;
pub mod error;
pub mod pipeline;
pub mod revert;
pub mod selector;
pub mod status;

pub use apply::{apply_all, ApplyOptions, ApplyReport, WriteResult, DEFAULT_BACKUP_SUFFIX};
pub use error::SyncError;
pub use revert::{revert, RevertAction, RevertOptions, RevertReport};
pub use selector::resolve_selected_agents;
pub use status::{AgentState, AgentStatus};
