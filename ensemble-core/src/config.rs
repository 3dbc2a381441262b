//! Layered configuration loading and project scaffolding.
//!
//! # Storage layout
//!
//! ```text
//! <home>/.ensemble/
//!   config.yaml               (user layer — optional)
//! <project>/.ensemble/
//!   config.yaml               (project layer — wins key-by-key)
//!   rules/
//!     *.md                    (rule fragments, merged in sorted order)
//! ```
//!
//! # API pattern
//!
//! Every home-reading function has two forms:
//! - `fn_at(home: &Path, …)` — explicit home; used in tests with `TempDir`
//! - `fn(…)` — derives home from `dirs::home_dir()`, delegates to `_at`
//!
//! Tests must NEVER call the no-arg wrappers; always use `_at`.

use std::path::{Path, PathBuf};

use chrono::Utc;

use crate::error::ConfigError;
use crate::types::{FileConfig, LoadedConfig};

/// Starter fragment written by [`init`].
const STARTER_RULE: &str = "\
# Project rules

Describe the conventions agents must follow in this repository.
Every `.md` file in this directory becomes one labelled section of the
generated agent files, merged in sorted path order.
";

// ---------------------------------------------------------------------------
// 1. Path helpers
// ---------------------------------------------------------------------------

/// `<project>/.ensemble/` — pure, no I/O.
pub fn ensemble_dir(project_dir: &Path) -> PathBuf {
    project_dir.join(".ensemble")
}

/// `<project>/.ensemble/config.yaml` — pure, no I/O.
pub fn config_path(project_dir: &Path) -> PathBuf {
    ensemble_dir(project_dir).join("config.yaml")
}

/// `<project>/.ensemble/rules/` — pure, no I/O.
pub fn rules_dir(project_dir: &Path) -> PathBuf {
    ensemble_dir(project_dir).join("rules")
}

/// `<home>/.ensemble/config.yaml` — pure, no I/O.
pub fn user_config_path_at(home: &Path) -> PathBuf {
    home.join(".ensemble").join("config.yaml")
}

// ---------------------------------------------------------------------------
// 2. Load
// ---------------------------------------------------------------------------

/// Load a single config file, or `None` if it does not exist.
///
/// Returns `ConfigError::Parse` (with path + line context) if malformed YAML.
pub fn load_file_config(path: &Path) -> Result<Option<FileConfig>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let contents = std::fs::read_to_string(path)?;
    let config = serde_yaml::from_str(&contents).map_err(|e| ConfigError::Parse {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(Some(config))
}

/// Project layer over user layer: the project's `default_agents` replaces the
/// user's when present, and project per-agent entries replace user entries
/// key-by-key.
fn overlay(base: FileConfig, over: FileConfig) -> FileConfig {
    let mut agents = base.agents;
    for (identifier, settings) in over.agents {
        agents.insert(identifier, settings);
    }
    FileConfig {
        created_at: over.created_at.or(base.created_at),
        default_agents: over.default_agents.or(base.default_agents),
        agents,
    }
}

/// Build the [`LoadedConfig`] for one invocation: user config (if any)
/// layered under project config (if any), with CLI filters attached.
pub fn load_config_at(
    home: &Path,
    project_dir: &Path,
    cli_agents: Option<Vec<String>>,
) -> Result<LoadedConfig, ConfigError> {
    let user = load_file_config(&user_config_path_at(home))?.unwrap_or_default();
    let project = load_file_config(&config_path(project_dir))?.unwrap_or_default();
    let merged = overlay(user, project);
    Ok(LoadedConfig {
        cli_agents,
        default_agents: merged.default_agents,
        agents: merged.agents,
    })
}

/// `load_config_at` convenience wrapper.
pub fn load_config(
    project_dir: &Path,
    cli_agents: Option<Vec<String>>,
) -> Result<LoadedConfig, ConfigError> {
    load_config_at(&home()?, project_dir, cli_agents)
}

// ---------------------------------------------------------------------------
// 3. Save (atomic)
// ---------------------------------------------------------------------------

/// Atomically save a config file.
///
/// Write flow: serialize → `.yaml.tmp` sibling → `rename`.
/// `.tmp` is always in the same directory as the target (same filesystem).
pub fn save_file_config(path: &Path, config: &FileConfig) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let tmp = path.with_extension("yaml.tmp");
    let yaml = serde_yaml::to_string(config)?;
    std::fs::write(&tmp, yaml)?;
    std::fs::rename(&tmp, path)?;
    Ok(())
}

// ---------------------------------------------------------------------------
// 4. Init
// ---------------------------------------------------------------------------

/// Files created by [`init`].
#[derive(Debug, Default, PartialEq, Eq)]
pub struct InitReport {
    pub created: Vec<PathBuf>,
}

/// Scaffold `.ensemble/` in a project directory.
///
/// Creates `config.yaml` and a starter `rules/general.md` when absent.
/// Idempotent: existing files are never touched.
pub fn init(project_dir: &Path) -> Result<InitReport, ConfigError> {
    let mut report = InitReport::default();

    let config = config_path(project_dir);
    if !config.exists() {
        save_file_config(
            &config,
            &FileConfig {
                created_at: Some(Utc::now()),
                default_agents: None,
                agents: Default::default(),
            },
        )?;
        report.created.push(config);
    }

    let rules = rules_dir(project_dir);
    std::fs::create_dir_all(&rules)?;
    let starter = rules.join("general.md");
    if !starter.exists() && !has_rule_fragment(&rules)? {
        std::fs::write(&starter, STARTER_RULE)?;
        report.created.push(starter);
    }

    Ok(report)
}

fn has_rule_fragment(dir: &Path) -> Result<bool, ConfigError> {
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.extension().and_then(|s| s.to_str()) == Some("md") {
            return Ok(true);
        }
    }
    Ok(false)
}

// ---------------------------------------------------------------------------
// Private helpers
// ---------------------------------------------------------------------------

fn home() -> Result<PathBuf, ConfigError> {
    dirs::home_dir().ok_or(ConfigError::HomeNotFound)
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
