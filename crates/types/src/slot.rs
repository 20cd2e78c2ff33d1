//! Slot layout configuration.
//!
//! A bar layout is an ordered mapping from slot name to [`SlotConfig`].
//! Iteration order of the mapping is the on-screen order within a region.

use indexmap::IndexMap;
use log::warn;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;

/// One of the three bar regions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    Left,
    Center,
    #[default]
    Right,
}

impl Position {
    /// All regions in display order
    pub const ALL: [Position; 3] = [Position::Left, Position::Center, Position::Right];

    /// Resolve a position name case-insensitively; anything unknown is `Right`
    pub fn parse(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "left" => Position::Left,
            "center" => Position::Center,
            _ => Position::Right,
        }
    }

    /// Identifier of the region node in the render tree
    pub fn region_id(&self) -> &'static str {
        match self {
            Position::Left => "left",
            Position::Center => "center",
            Position::Right => "right",
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.region_id())
    }
}

impl<'de> Deserialize<'de> for Position {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // Any JSON shape is accepted; non-strings fall back to the default region.
        let value = Value::deserialize(deserializer)?;
        Ok(value.as_str().map(Position::parse).unwrap_or_default())
    }
}

/// The fixed catalog of widgets the bar knows how to render
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WidgetKind {
    Clock,
    Battery,
    Network,
    Audio,
    Brightness,
    Cpu,
    Memory,
    Disk,
    ActiveClient,
    Workspace,
}

impl WidgetKind {
    /// Derive a widget kind from a conventional slot name
    pub fn from_slot_name(name: &str) -> Option<Self> {
        let kind = match name {
            "clock" => WidgetKind::Clock,
            "battery" => WidgetKind::Battery,
            "network" => WidgetKind::Network,
            "volume" | "audio" => WidgetKind::Audio,
            "brightness" => WidgetKind::Brightness,
            "cpu" => WidgetKind::Cpu,
            "memory" | "ram" => WidgetKind::Memory,
            "disk" => WidgetKind::Disk,
            "activeWindow" | "active_window" | "client" => WidgetKind::ActiveClient,
            "workspace" | "workspaces" => WidgetKind::Workspace,
            _ => return None,
        };
        Some(kind)
    }
}

/// Configuration of a single slot
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SlotConfig {
    /// Region the slot is mounted in
    #[serde(default)]
    pub position: Position,
    /// Widget-specific format string (e.g. a clock template)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    /// Explicit widget kind; derived from the slot name when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub widget: Option<WidgetKind>,
}

impl SlotConfig {
    pub fn at(position: Position) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    /// Widget kind for a slot with the given name
    pub fn widget_kind(&self, name: &str) -> Option<WidgetKind> {
        self.widget.or_else(|| WidgetKind::from_slot_name(name))
    }
}

/// Ordered slot configuration for the whole bar
pub type BarLayout = IndexMap<String, SlotConfig>;

/// Parse a layout leniently from JSON.
///
/// Entries that are not objects are skipped, and an entry whose fields fail
/// to deserialize falls back to the fields that did parse.
pub fn parse_layout(value: &Value) -> BarLayout {
    let mut layout = BarLayout::new();
    let Some(entries) = value.as_object() else {
        if !value.is_null() {
            warn!("Slot configuration is not an object, ignoring it");
        }
        return layout;
    };

    for (name, entry) in entries {
        let Some(fields) = entry.as_object() else {
            warn!("Slot '{}' is not an object, skipping", name);
            continue;
        };
        let slot = match serde_json::from_value::<SlotConfig>(entry.clone()) {
            Ok(slot) => slot,
            Err(e) => {
                warn!("Slot '{}' has invalid fields ({}), keeping position only", name, e);
                SlotConfig {
                    position: fields
                        .get("position")
                        .and_then(Value::as_str)
                        .map(Position::parse)
                        .unwrap_or_default(),
                    format: fields.get("format").and_then(Value::as_str).map(String::from),
                    widget: None,
                }
            }
        };
        layout.insert(name.clone(), slot);
    }

    layout
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_position_parse_is_case_insensitive() {
        assert_eq!(Position::parse("LEFT"), Position::Left);
        assert_eq!(Position::parse("Center"), Position::Center);
        assert_eq!(Position::parse("right"), Position::Right);
        assert_eq!(Position::parse("top"), Position::Right);
        assert_eq!(Position::parse(""), Position::Right);
    }

    #[test]
    fn test_slot_position_defaults_to_right() {
        let slot: SlotConfig = serde_json::from_value(json!({})).unwrap();
        assert_eq!(slot.position, Position::Right);

        let slot: SlotConfig = serde_json::from_value(json!({ "position": 42 })).unwrap();
        assert_eq!(slot.position, Position::Right);
    }

    #[test]
    fn test_parse_layout_keeps_order_and_skips_non_objects() {
        let layout = parse_layout(&json!({
            "workspace": { "position": "left" },
            "broken": "not a slot",
            "clock": { "position": "CENTER", "format": "{hh:mm}" },
            "battery": null,
            "cpu": {}
        }));

        let names: Vec<&str> = layout.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["workspace", "clock", "cpu"]);
        assert_eq!(layout["clock"].position, Position::Center);
        assert_eq!(layout["clock"].format.as_deref(), Some("{hh:mm}"));
        assert_eq!(layout["cpu"].position, Position::Right);
    }

    #[test]
    fn test_parse_layout_tolerates_bad_widget_field() {
        let layout = parse_layout(&json!({
            "clock": { "position": "left", "widget": "teleporter" }
        }));
        assert_eq!(layout["clock"].position, Position::Left);
        assert_eq!(layout["clock"].widget, None);
    }

    #[test]
    fn test_widget_kind_from_name_and_override() {
        assert_eq!(WidgetKind::from_slot_name("volume"), Some(WidgetKind::Audio));
        assert_eq!(WidgetKind::from_slot_name("activeWindow"), Some(WidgetKind::ActiveClient));
        assert_eq!(WidgetKind::from_slot_name("weather"), None);

        let slot = SlotConfig {
            widget: Some(WidgetKind::Clock),
            ..SlotConfig::default()
        };
        assert_eq!(slot.widget_kind("utc_clock"), Some(WidgetKind::Clock));
    }
}
