//! # ensemble-rules
//!
//! Agent registry and rule-fragment handling: which agents exist, where
//! their files live, and how rule fragments merge into one document.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use ensemble_rules::{concatenate, load_fragments, AgentKind};
//! use std::path::Path;
//!
//! fn render_all(project_dir: &Path) {
//!     if let Ok(fragments) = load_fragments(&project_dir.join(".ensemble/rules")) {
//!         let rules = concatenate(&fragments, project_dir);
//!         for agent in AgentKind::all() {
//!             let path = agent.default_output_path(project_dir);
//!             println!("{}: {} bytes", path.display(), agent.render(&rules).len());
//!         }
//!     }
//! }
//! ```

pub mod agents;
pub mod concat;
pub mod error;
pub mod fragment;

pub use agents::AgentKind;
pub use concat::concatenate;
pub use error::RulesError;
pub use fragment::{load_fragments, RuleFragment};
