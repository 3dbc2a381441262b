//! `ensemble agents` — list the agent registry with enablement.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use tabled::{settings::Style, Table, Tabled};

use ensemble_core::config;
use ensemble_rules::AgentKind;
use ensemble_sync::resolve_selected_agents;

use super::project_dir;

/// Arguments for `ensemble agents`.
#[derive(Args, Debug)]
pub struct AgentsArgs {
    /// Project directory (defaults to the current directory).
    #[arg(long)]
    pub dir: Option<PathBuf>,
}

#[derive(Tabled)]
struct AgentRow {
    #[tabled(rename = "agent")]
    identifier: &'static str,
    #[tabled(rename = "name")]
    name: &'static str,
    #[tabled(rename = "output file")]
    output: String,
    #[tabled(rename = "selected")]
    selected: String,
}

impl AgentsArgs {
    pub fn run(self) -> Result<()> {
        let dir = project_dir(self.dir)?;
        let config = config::load_config(&dir, None).context("failed to load configuration")?;
        let selected = resolve_selected_agents(&config)?;

        let rows: Vec<AgentRow> = AgentKind::all()
            .iter()
            .map(|agent| {
                let output = match config.output_override(agent.identifier()) {
                    Some(path) => path.display().to_string(),
                    None => agent
                        .default_output_path(&dir)
                        .strip_prefix(&dir)
                        .map(|p| p.display().to_string())
                        .unwrap_or_else(|_| agent.default_output_path(&dir).display().to_string()),
                };
                AgentRow {
                    identifier: agent.identifier(),
                    name: agent.display_name(),
                    output,
                    selected: if selected.contains(agent) {
                        "■ yes".green().bold().to_string()
                    } else {
                        "■ no".bright_black().to_string()
                    },
                }
            })
            .collect();

        println!(
            "Ensemble v{} | {} agents | {} selected",
            env!("CARGO_PKG_VERSION"),
            AgentKind::all().len(),
            selected.len(),
        );
        let mut table = Table::new(rows);
        table.with(Style::rounded());
        println!("{table}");
        Ok(())
    }
}
