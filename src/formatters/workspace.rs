//! Workspace indicator widget

use aether_bar_core::WidgetFormatter;
use aether_bar_types::{
    number_of, Fragment, IconTheme, MetricKey, Record, SlotConfig, SystemState, WidgetKind,
};
use log::debug;
use serde_json::Value;

/// Substring that occurs once per workspace in a debug-formatted list
pub const WORKSPACE_COUNT_MARKER: &str = "monitor_id";

/// Upper bound on the number of rendered workspace indicators
pub const MAX_WORKSPACES: usize = 64;

/// 1-based index of the active workspace, if it can be read
pub fn active_workspace(value: Option<&Value>) -> Option<usize> {
    let id = match value? {
        Value::Number(_) => number_of(value),
        Value::Object(fields) => number_of(fields.get("id")),
        Value::String(text) => match Record::parse(text) {
            Ok(record) => record.get("id")?.trim().parse::<f64>().ok()?,
            Err(e) => {
                debug!("Unreadable workspace summary: {}", e);
                return None;
            }
        },
        _ => return None,
    };
    (id >= 1.0 && id.fract() == 0.0).then_some(id as usize)
}

/// Number of workspaces described by a workspace-list value, capped at
/// [`MAX_WORKSPACES`]
pub fn workspace_count(value: Option<&Value>) -> usize {
    let count = match value {
        Some(Value::Array(items)) => items.len(),
        Some(Value::Number(_)) => number_of(value).max(0.0) as usize,
        Some(Value::String(text)) => text.matches(WORKSPACE_COUNT_MARKER).count(),
        _ => 0,
    };
    if count > MAX_WORKSPACES {
        debug!("Workspace count {} capped at {}", count, MAX_WORKSPACES);
    }
    count.min(MAX_WORKSPACES)
}

pub struct WorkspaceFormatter {
    active: String,
    inactive: String,
}

impl WorkspaceFormatter {
    pub fn new(theme: &IconTheme) -> Self {
        Self {
            active: theme.workspace_active.clone(),
            inactive: theme.workspace_inactive.clone(),
        }
    }
}

impl WidgetFormatter for WorkspaceFormatter {
    fn kind(&self) -> WidgetKind {
        WidgetKind::Workspace
    }

    fn triggers(&self) -> &'static [MetricKey] {
        &[MetricKey::Workspace, MetricKey::WorkspaceList]
    }

    fn format(&self, state: &SystemState, _slot: &SlotConfig) -> Fragment {
        let active = active_workspace(state.get(MetricKey::Workspace));
        let count = workspace_count(state.get(MetricKey::WorkspaceList));

        (1..=count).fold(Fragment::new("workspaces"), |fragment, index| {
            let fragment = if Some(index) == active {
                fragment.symbol(
                    self.active.as_str(),
                    ["active", "material-symbols-outlined"],
                )
            } else {
                fragment.symbol(
                    self.inactive.as_str(),
                    ["notActive", "material-symbols-outlined"],
                )
            };
            fragment.text(" ")
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aether_bar_types::Part;
    use serde_json::json;

    fn list(n: usize) -> String {
        (1..=n)
            .map(|i| format!("Workspace {{ id: {}, monitor_id: 0, windows: 2 }}", i))
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn render(state: &SystemState) -> Fragment {
        WorkspaceFormatter::new(&IconTheme::default()).format(state, &SlotConfig::default())
    }

    fn symbols(fragment: &Fragment) -> Vec<(&str, bool)> {
        fragment
            .parts
            .iter()
            .filter_map(|part| match part {
                Part::Symbol { name, classes } => {
                    Some((name.as_str(), classes.iter().any(|c| c == "active")))
                }
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_four_workspaces_second_active() {
        let mut state = SystemState::new();
        state.set(
            MetricKey::Workspace,
            Value::from("Workspace { id: 2, monitor_id: 0, focused: true }"),
        );
        state.set(MetricKey::WorkspaceList, Value::from(list(4)));

        let fragment = render(&state);
        let symbols = symbols(&fragment);
        assert_eq!(symbols.len(), 4);
        assert_eq!(
            symbols,
            vec![
                ("fiber_manual_record", false),
                ("mode_standby", true),
                ("fiber_manual_record", false),
                ("fiber_manual_record", false),
            ]
        );
        assert_eq!(fragment.class, "workspaces");
    }

    #[test]
    fn test_structured_values() {
        assert_eq!(active_workspace(Some(&json!({ "id": 3 }))), Some(3));
        assert_eq!(active_workspace(Some(&json!(1))), Some(1));
        assert_eq!(workspace_count(Some(&json!([{}, {}, {}]))), 3);
        assert_eq!(workspace_count(Some(&json!(5))), 5);
    }

    #[test]
    fn test_unreadable_active_index_renders_all_inactive() {
        let mut state = SystemState::new();
        state.set(MetricKey::Workspace, Value::from("garbage {"));
        state.set(MetricKey::WorkspaceList, Value::from(list(2)));

        let fragment = render(&state);
        assert!(symbols(&fragment).iter().all(|(_, active)| !active));
        assert_eq!(symbols(&fragment).len(), 2);
    }

    #[test]
    fn test_empty_list_renders_nothing() {
        let state = SystemState::with_defaults();
        let fragment = render(&state);
        assert!(fragment.parts.is_empty());
    }

    #[test]
    fn test_huge_workspace_count_is_capped() {
        assert_eq!(workspace_count(Some(&json!(1e12))), MAX_WORKSPACES);
        assert_eq!(workspace_count(Some(&json!(MAX_WORKSPACES + 1))), MAX_WORKSPACES);
        assert_eq!(workspace_count(Some(&json!(-3))), 0);

        let mut state = SystemState::new();
        state.set(MetricKey::WorkspaceList, json!(1e12));
        assert_eq!(symbols(&render(&state)).len(), MAX_WORKSPACES);
    }
}
