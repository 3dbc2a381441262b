//! Agent selection — three precedence tiers over loaded configuration.
//!
//! Tier precedence (first non-empty tier wins, lower tiers are ignored):
//! 1. CLI `--agents` filters — validated, then matched by identifier or
//!    display-name substring.
//! 2. `default_agents` from config — same validation; a per-agent
//!    `enabled` boolean overrides list membership in either direction.
//! 3. Neither present — every agent not explicitly disabled.

use ensemble_core::LoadedConfig;
use ensemble_rules::AgentKind;

use crate::error::{unknown_agents, SyncError};

/// A lower-cased filter matches an agent by exact identifier or by
/// substring of the lower-cased display name ("co" matches both
/// "GitHub Copilot" and "Codex CLI").
fn filter_matches(filter_lower: &str, agent: AgentKind) -> bool {
    agent.identifier() == filter_lower
        || agent.display_name().to_lowercase().contains(filter_lower)
}

/// Validate that every filter matches at least one agent.
///
/// Returns the lower-cased filters on success. On failure nothing is
/// selected: the error names exactly the unmatched filters, plus every
/// valid identifier.
fn validate_filters(filters: &[String]) -> Result<Vec<String>, SyncError> {
    let lowered: Vec<String> = filters.iter().map(|f| f.to_lowercase()).collect();
    let unknown: Vec<String> = filters
        .iter()
        .zip(&lowered)
        .filter(|(_, low)| !AgentKind::all().iter().any(|a| filter_matches(low, *a)))
        .map(|(original, _)| original.clone())
        .collect();
    if unknown.is_empty() {
        Ok(lowered)
    } else {
        Err(unknown_agents(unknown))
    }
}

/// Agents matching any of the given filters, in registry order, each at
/// most once. Fails without selecting anything if any filter is unknown.
///
/// Shared by tier-1 selection and by revert's explicit agent targeting.
pub fn select_by_filters(filters: &[String]) -> Result<Vec<AgentKind>, SyncError> {
    let lowered = validate_filters(filters)?;
    Ok(AgentKind::all()
        .iter()
        .copied()
        .filter(|agent| lowered.iter().any(|f| filter_matches(f, *agent)))
        .collect())
}

/// Compute the ordered set of agents to process from the loaded config.
///
/// Pure: no side effects, registry order preserved. The only failure mode
/// is a user-supplied name matching no agent ([`SyncError::UnknownAgents`]).
pub fn resolve_selected_agents(config: &LoadedConfig) -> Result<Vec<AgentKind>, SyncError> {
    // Tier 1: CLI filters.
    if let Some(filters) = non_empty(config.cli_agents.as_deref()) {
        return select_by_filters(filters);
    }

    // Tier 2: default-agent list, with per-agent enabled overrides. An
    // explicit `enabled: true` force-includes an agent absent from the
    // list; `enabled: false` excludes one present in it.
    if let Some(defaults) = non_empty(config.default_agents.as_deref()) {
        let lowered = validate_filters(defaults)?;
        return Ok(AgentKind::all()
            .iter()
            .copied()
            .filter(|agent| match config.enabled_override(agent.identifier()) {
                Some(enabled) => enabled,
                None => lowered.iter().any(|f| filter_matches(f, *agent)),
            })
            .collect());
    }

    // Tier 3: everything not explicitly opted out.
    Ok(AgentKind::all()
        .iter()
        .copied()
        .filter(|agent| config.enabled_override(agent.identifier()) != Some(false))
        .collect())
}

fn non_empty(list: Option<&[String]>) -> Option<&[String]> {
    list.filter(|l| !l.is_empty())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use ensemble_core::AgentSettings;
    use rstest::rstest;
    use std::collections::BTreeMap;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn config(
        cli: Option<&[&str]>,
        defaults: Option<&[&str]>,
        agents: &[(&str, Option<bool>)],
    ) -> LoadedConfig {
        let mut map = BTreeMap::new();
        for (id, enabled) in agents {
            map.insert(
                id.to_string(),
                AgentSettings {
                    enabled: *enabled,
                    output_path: None,
                },
            );
        }
        LoadedConfig {
            cli_agents: cli.map(strings),
            default_agents: defaults.map(strings),
            agents: map,
        }
    }

    fn ids(agents: &[AgentKind]) -> Vec<&'static str> {
        agents.iter().map(|a| a.identifier()).collect()
    }

    // --- Tier 1 -----------------------------------------------------------

    #[test]
    fn cli_exact_identifiers_select_exactly_those_agents() {
        let cfg = config(Some(&["claude", "codex"]), None, &[]);
        let selected = resolve_selected_agents(&cfg).expect("select");
        assert_eq!(ids(&selected), vec!["claude", "codex"]);
    }

    #[test]
    fn cli_filters_are_case_insensitive() {
        let cfg = config(Some(&["CLAUDE"]), None, &[]);
        let selected = resolve_selected_agents(&cfg).expect("select");
        assert_eq!(ids(&selected), vec!["claude"]);
    }

    #[test]
    fn substring_filter_can_match_multiple_agents() {
        // "co" is a substring of "Claude Code", "GitHub Copilot" and
        // "Codex CLI" — permissive matching is intentional.
        let cfg = config(Some(&["co"]), None, &[]);
        let selected = resolve_selected_agents(&cfg).expect("select");
        assert!(selected.contains(&AgentKind::Copilot));
        assert!(selected.contains(&AgentKind::Codex));
        assert!(selected.contains(&AgentKind::Claude));
    }

    #[test]
    fn cli_selection_preserves_registry_order_and_dedups() {
        // Both filters match Claude; it must appear once, in registry order.
        let cfg = config(Some(&["codex", "claude", "claude code"]), None, &[]);
        let selected = resolve_selected_agents(&cfg).expect("select");
        assert_eq!(ids(&selected), vec!["claude", "codex"]);
    }

    #[test]
    fn cli_tier_wins_over_defaults_and_overrides() {
        // Tier 1 present: default list and enabled flags are ignored entirely.
        let cfg = config(
            Some(&["claude"]),
            Some(&["gemini"]),
            &[("claude", Some(false)), ("cline", Some(true))],
        );
        let selected = resolve_selected_agents(&cfg).expect("select");
        assert_eq!(ids(&selected), vec!["claude"]);
    }

    #[test]
    fn unknown_cli_filter_fails_with_exact_unmatched_list() {
        let cfg = config(Some(&["claude", "nosuch", "zzz"]), None, &[]);
        let err = resolve_selected_agents(&cfg).unwrap_err();
        match err {
            SyncError::UnknownAgents { unknown, valid } => {
                assert_eq!(unknown, strings(&["nosuch", "zzz"]));
                assert_eq!(valid.len(), AgentKind::all().len());
                assert!(valid.contains(&"claude".to_string()));
            }
            other => panic!("expected UnknownAgents, got {other:?}"),
        }
    }

    #[test]
    fn unknown_filter_error_message_lists_names_and_valid_set() {
        let cfg = config(Some(&["nosuch"]), None, &[]);
        let msg = resolve_selected_agents(&cfg).unwrap_err().to_string();
        assert!(msg.contains("nosuch"));
        assert!(msg.contains("valid agents are"));
        assert!(msg.contains("claude"));
        assert!(msg.contains("antigravity"));
    }

    // --- Tier 2 -----------------------------------------------------------

    #[test]
    fn default_list_selects_members() {
        let cfg = config(None, Some(&["claude", "gemini"]), &[]);
        let selected = resolve_selected_agents(&cfg).expect("select");
        assert_eq!(ids(&selected), vec!["claude", "gemini"]);
    }

    #[test]
    fn enabled_false_excludes_agent_listed_in_defaults() {
        let cfg = config(None, Some(&["claude", "gemini"]), &[("claude", Some(false))]);
        let selected = resolve_selected_agents(&cfg).expect("select");
        assert_eq!(ids(&selected), vec!["gemini"]);
    }

    #[test]
    fn enabled_true_included_even_if_not_listed() {
        // The asymmetric force-include: enabled=true beats list absence.
        let cfg = config(None, Some(&["gemini"]), &[("cline", Some(true))]);
        let selected = resolve_selected_agents(&cfg).expect("select");
        assert_eq!(ids(&selected), vec!["gemini", "cline"]);
    }

    #[test]
    fn unknown_default_entry_fails_whole_selection() {
        let cfg = config(None, Some(&["claude", "ghost"]), &[("cline", Some(true))]);
        let err = resolve_selected_agents(&cfg).unwrap_err();
        match err {
            SyncError::UnknownAgents { unknown, .. } => {
                assert_eq!(unknown, strings(&["ghost"]));
            }
            other => panic!("expected UnknownAgents, got {other:?}"),
        }
    }

    #[test]
    fn empty_cli_list_falls_through_to_defaults() {
        let cfg = config(Some(&[]), Some(&["codex"]), &[]);
        let selected = resolve_selected_agents(&cfg).expect("select");
        assert_eq!(ids(&selected), vec!["codex"]);
    }

    // --- Tier 3 -----------------------------------------------------------

    #[test]
    fn no_filters_selects_all_agents() {
        let cfg = config(None, None, &[]);
        let selected = resolve_selected_agents(&cfg).expect("select");
        assert_eq!(selected, AgentKind::all().to_vec());
    }

    #[rstest]
    #[case(Some(true))]
    #[case(None)]
    fn fallback_includes_absent_or_true(#[case] enabled: Option<bool>) {
        let cfg = config(None, None, &[("windsurf", enabled)]);
        let selected = resolve_selected_agents(&cfg).expect("select");
        assert!(selected.contains(&AgentKind::Windsurf));
    }

    #[test]
    fn fallback_excludes_only_explicitly_disabled() {
        let cfg = config(None, None, &[("cursor", Some(false)), ("gemini", Some(false))]);
        let selected = resolve_selected_agents(&cfg).expect("select");
        assert!(!selected.contains(&AgentKind::Cursor));
        assert!(!selected.contains(&AgentKind::Gemini));
        assert_eq!(selected.len(), AgentKind::all().len() - 2);
    }

    #[test]
    fn empty_default_list_falls_through_to_fallback() {
        let cfg = config(None, Some(&[]), &[("cursor", Some(false))]);
        let selected = resolve_selected_agents(&cfg).expect("select");
        assert!(!selected.contains(&AgentKind::Cursor));
        assert_eq!(selected.len(), AgentKind::all().len() - 1);
    }

    // --- select_by_filters (revert targeting) -----------------------------

    #[test]
    fn select_by_filters_validates_before_selecting() {
        let err = select_by_filters(&strings(&["claude", "ghost"])).unwrap_err();
        assert!(matches!(err, SyncError::UnknownAgents { .. }));
    }
}
