//! `ensemble status` — per-agent sync state visibility.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use serde::Serialize;
use tabled::{settings::Style, Table, Tabled};

use ensemble_core::config;
use ensemble_sync::{
    pipeline, resolve_selected_agents, status::check, AgentState, AgentStatus,
    DEFAULT_BACKUP_SUFFIX,
};

use super::project_dir;

/// Arguments for `ensemble status`.
#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Project directory (defaults to the current directory).
    #[arg(long)]
    pub dir: Option<PathBuf>,

    /// Emit machine-readable JSON.
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize)]
struct StatusReportJson {
    summary: StatusSummaryJson,
    agents: Vec<AgentStatusJson>,
}

#[derive(Serialize)]
struct StatusSummaryJson {
    agents: usize,
    current: usize,
    modified: usize,
    missing: usize,
}

#[derive(Serialize)]
struct AgentStatusJson {
    agent: String,
    path: String,
    state: String,
    has_backup: bool,
}

#[derive(Tabled)]
struct StatusTableRow {
    #[tabled(rename = "agent")]
    agent: &'static str,
    #[tabled(rename = "status")]
    status: String,
    #[tabled(rename = "file")]
    file: String,
    #[tabled(rename = "backup")]
    backup: &'static str,
}

impl StatusArgs {
    pub fn run(self) -> Result<()> {
        let dir = project_dir(self.dir)?;
        let config = config::load_config(&dir, None).context("failed to load configuration")?;
        let agents = resolve_selected_agents(&config)?;
        let rules = pipeline::load_rules(&dir)?;

        let statuses = check(&agents, &rules, &dir, &config, DEFAULT_BACKUP_SUFFIX)?;
        if self.json {
            print_json(&statuses)?;
            return Ok(());
        }
        print_table(&dir, &statuses);
        Ok(())
    }
}

fn count(statuses: &[AgentStatus], state: AgentState) -> usize {
    statuses.iter().filter(|s| s.state == state).count()
}

fn print_json(statuses: &[AgentStatus]) -> Result<()> {
    let payload = StatusReportJson {
        summary: StatusSummaryJson {
            agents: statuses.len(),
            current: count(statuses, AgentState::Current),
            modified: count(statuses, AgentState::Modified),
            missing: count(statuses, AgentState::Missing),
        },
        agents: statuses
            .iter()
            .map(|s| AgentStatusJson {
                agent: s.agent.identifier().to_string(),
                path: s.path.display().to_string(),
                state: state_key(s.state).to_string(),
                has_backup: s.has_backup,
            })
            .collect(),
    };
    println!(
        "{}",
        serde_json::to_string_pretty(&payload).context("failed to serialize status JSON")?
    );
    Ok(())
}

fn print_table(dir: &std::path::Path, statuses: &[AgentStatus]) {
    println!(
        "Ensemble v{} | {} agents | {} current | {} modified | {} missing",
        env!("CARGO_PKG_VERSION"),
        statuses.len(),
        count(statuses, AgentState::Current),
        count(statuses, AgentState::Modified),
        count(statuses, AgentState::Missing),
    );
    println!(
        "Indicators: {} CURRENT  {} MODIFIED  {} MISSING",
        state_indicator(AgentState::Current),
        state_indicator(AgentState::Modified),
        state_indicator(AgentState::Missing),
    );

    let rows: Vec<StatusTableRow> = statuses
        .iter()
        .map(|s| StatusTableRow {
            agent: s.agent.identifier(),
            status: format!("{} {}", state_indicator(s.state), state_label(s.state)),
            file: s
                .path
                .strip_prefix(dir)
                .unwrap_or(&s.path)
                .display()
                .to_string(),
            backup: if s.has_backup { "yes" } else { "-" },
        })
        .collect();
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{table}");

    if count(statuses, AgentState::Current) < statuses.len() {
        println!("Run 'ensemble apply' to update out-of-date agent files.");
    }
}

fn state_key(state: AgentState) -> &'static str {
    match state {
        AgentState::Missing => "missing",
        AgentState::Current => "current",
        AgentState::Modified => "modified",
    }
}

fn state_label(state: AgentState) -> &'static str {
    match state {
        AgentState::Missing => "MISSING",
        AgentState::Current => "CURRENT",
        AgentState::Modified => "MODIFIED",
    }
}

fn state_indicator(state: AgentState) -> String {
    match state {
        AgentState::Missing => "■".bright_black().bold().to_string(),
        AgentState::Current => "■".green().bold().to_string(),
        AgentState::Modified => "■".yellow().bold().to_string(),
    }
}
