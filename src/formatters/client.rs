//! Active client (focused window) widget

use aether_bar_core::WidgetFormatter;
use aether_bar_types::{
    Fragment, IconTheme, MetricKey, Record, RecordError, SlotConfig, SystemState, WidgetKind,
};
use log::warn;
use serde_json::Value;

/// Title and class of the focused client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientSummary {
    pub title: String,
    pub class: String,
}

impl ClientSummary {
    /// Read a client from a structured object or a debug-formatted record
    pub fn from_value(value: Option<&Value>) -> Result<Self, RecordError> {
        match value {
            Some(Value::Object(fields)) => {
                let field = |name: &str| {
                    fields
                        .get(name)
                        .map(|v| v.as_str().map(str::to_string).unwrap_or_else(|| v.to_string()))
                        .ok_or_else(|| RecordError::MissingField(name.to_string()))
                };
                Ok(Self {
                    title: field("title")?,
                    class: field("class")?,
                })
            }
            Some(Value::String(text)) => {
                let record = Record::parse(text)?;
                Ok(Self {
                    title: record.require("title")?.trim().to_string(),
                    class: record.require("class")?.trim().to_string(),
                })
            }
            _ => Err(RecordError::MissingField("title".to_string())),
        }
    }
}

pub struct ClientFormatter;

impl ClientFormatter {
    pub fn new(_theme: &IconTheme) -> Self {
        Self
    }
}

impl WidgetFormatter for ClientFormatter {
    fn kind(&self) -> WidgetKind {
        WidgetKind::ActiveClient
    }

    fn triggers(&self) -> &'static [MetricKey] {
        &[MetricKey::Client]
    }

    fn format(&self, state: &SystemState, _slot: &SlotConfig) -> Fragment {
        match ClientSummary::from_value(state.get(MetricKey::Client)) {
            Ok(client) => {
                Fragment::new("activeWindow").text(format!("{} | {}", client.title, client.class))
            }
            Err(e) => {
                warn!("Unreadable client summary: {}", e);
                Fragment::placeholder("activeWindow")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn render(value: Value) -> Fragment {
        let mut state = SystemState::new();
        state.set(MetricKey::Client, value);
        ClientFormatter::new(&IconTheme::default()).format(&state, &SlotConfig::default())
    }

    #[test]
    fn test_debug_record() {
        let fragment = render(Value::from(
            r#"Client { id: 9, initial_title: "bash", title: "cargo test", class: "Alacritty", instance: "Alacritty", pid: 77 }"#,
        ));
        assert_eq!(fragment.class, "activeWindow");
        assert_eq!(fragment.plain_text(), "cargo test | Alacritty");
    }

    #[test]
    fn test_structured_object() {
        let fragment = render(json!({ "title": "Inbox", "class": "thunderbird" }));
        assert_eq!(fragment.plain_text(), "Inbox | thunderbird");
    }

    #[test]
    fn test_missing_field_renders_placeholder() {
        let fragment = render(Value::from("Client { id: 1, pid: 2 }"));
        assert_eq!(fragment.plain_text(), "?");

        let fragment = render(Value::from(17));
        assert_eq!(fragment.plain_text(), "?");
    }

    #[test]
    fn test_default_client_renders_separator_only() {
        let state = SystemState::with_defaults();
        let fragment =
            ClientFormatter::new(&IconTheme::default()).format(&state, &SlotConfig::default());
        assert_eq!(fragment.plain_text(), " | ");
    }
}
