//! Ensemble core library — configuration types, layered loader, errors.
//!
//! Public API surface:
//! - [`types`] — config structs consumed by the agent selector
//! - [`error`] — [`ConfigError`]
//! - [`config`] — load / save / init

pub mod config;
pub mod error;
pub mod types;

pub use error::ConfigError;
pub use types::{AgentSettings, FileConfig, LoadedConfig};
