//! Agent registry — [`AgentKind`] and its fixed capability surface.
//!
//! # Path mapping (official docs)
//!
//! | Agent       | Output path                       |
//! |-------------|-----------------------------------|
//! | Claude      | `CLAUDE.md`                       |
//! | Cursor      | `.cursor/rules/ensemble.mdc`      |
//! | Windsurf    | `.windsurf/rules/ensemble.md`     |
//! | Copilot     | `.github/copilot-instructions.md` |
//! | Codex       | `AGENTS.md`                       |
//! | Gemini      | `GEMINI.md`                       |
//! | Cline       | `.clinerules/ensemble.md`         |
//! | Antigravity | `.agent/rules/ensemble.md`        |

use std::path::{Path, PathBuf};

/// All supported AI coding agents.
///
/// A closed, registry-driven set: every agent implements the same fixed
/// operation set via match arms, and [`AgentKind::all`] is the canonical
/// ordering used everywhere selection order matters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AgentKind {
    Claude,
    Cursor,
    Windsurf,
    Copilot,
    Codex,
    Gemini,
    Cline,
    Antigravity,
}

impl AgentKind {
    /// All agent variants in a stable order.
    pub fn all() -> &'static [AgentKind] {
        &[
            AgentKind::Claude,
            AgentKind::Cursor,
            AgentKind::Windsurf,
            AgentKind::Copilot,
            AgentKind::Codex,
            AgentKind::Gemini,
            AgentKind::Cline,
            AgentKind::Antigravity,
        ]
    }

    /// Unique lowercase identifier — the stable key used in config files
    /// and `--agents` filters.
    pub fn identifier(&self) -> &'static str {
        match self {
            AgentKind::Claude      => "claude",
            AgentKind::Cursor      => "cursor",
            AgentKind::Windsurf    => "windsurf",
            AgentKind::Copilot     => "copilot",
            AgentKind::Codex       => "codex",
            AgentKind::Gemini      => "gemini",
            AgentKind::Cline       => "cline",
            AgentKind::Antigravity => "antigravity",
        }
    }

    /// Human-readable name. Not guaranteed unique; `--agents` filters match
    /// case-insensitive substrings of it.
    pub fn display_name(&self) -> &'static str {
        match self {
            AgentKind::Claude      => "Claude Code",
            AgentKind::Cursor      => "Cursor",
            AgentKind::Windsurf    => "Windsurf",
            AgentKind::Copilot     => "GitHub Copilot",
            AgentKind::Codex       => "Codex CLI",
            AgentKind::Gemini      => "Gemini CLI",
            AgentKind::Cline       => "Cline",
            AgentKind::Antigravity => "Antigravity",
        }
    }

    /// Official output path for this agent, relative to the project root.
    pub fn default_output_path(&self, project_dir: &Path) -> PathBuf {
        let root = project_dir;
        match self {
            AgentKind::Claude => root.join("CLAUDE.md"),
            AgentKind::Cursor => root.join(".cursor").join("rules").join("ensemble.mdc"),
            AgentKind::Windsurf => root.join(".windsurf").join("rules").join("ensemble.md"),
            AgentKind::Copilot => root.join(".github").join("copilot-instructions.md"),
            AgentKind::Codex => root.join("AGENTS.md"),
            AgentKind::Gemini => root.join("GEMINI.md"),
            AgentKind::Cline => root.join(".clinerules").join("ensemble.md"),
            AgentKind::Antigravity => root.join(".agent").join("rules").join("ensemble.md"),
        }
    }

    /// Agent-specific content transformation applied before writing.
    ///
    /// Most agents take the concatenated rules verbatim; Cursor and
    /// Antigravity require a frontmatter header to load the file at all.
    pub fn render(&self, rules: &str) -> String {
        match self {
            AgentKind::Cursor => format!(
                "---\ndescription: Project rules managed by ensemble\nalwaysApply: true\n---\n\n{rules}"
            ),
            AgentKind::Antigravity => format!("---\ntrigger: always_on\n---\n\n{rules}"),
            _ => rules.to_string(),
        }
    }

    /// Look up an agent by its exact identifier.
    pub fn from_identifier(identifier: &str) -> Option<AgentKind> {
        AgentKind::all()
            .iter()
            .copied()
            .find(|agent| agent.identifier() == identifier)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
