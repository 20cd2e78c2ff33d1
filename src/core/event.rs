//! Events delivered to the dispatcher

use aether_bar_types::{parse_layout, BarLayout};
use serde_json::{Map, Value};

/// Inbound event
#[derive(Debug, Clone, PartialEq)]
pub enum BarEvent {
    /// New slot configuration; triggers a layout rebuild
    Config(BarLayout),
    /// Metric snapshot or delta, possibly wrapped in an envelope field
    Update(Map<String, Value>),
}

impl BarEvent {
    /// Interpret an inbound JSON message.
    ///
    /// `{"type": "config", "config": {...}}` is a configuration event; any
    /// other object is an update. Non-objects yield `None`.
    pub fn from_message(message: Value) -> Option<Self> {
        let Value::Object(mut fields) = message else {
            return None;
        };

        if fields.get("type").and_then(Value::as_str) == Some("config") {
            let layout = fields
                .remove("config")
                .or_else(|| fields.remove("detail"))
                .unwrap_or(Value::Null);
            return Some(BarEvent::Config(parse_layout(&layout)));
        }

        Some(BarEvent::Update(fields))
    }

    /// Update event carrying a single metric
    pub fn metric(name: &str, value: impl Into<Value>) -> Self {
        let mut fields = Map::new();
        fields.insert(name.to_string(), value.into());
        BarEvent::Update(fields)
    }

    pub fn is_update(&self) -> bool {
        matches!(self, BarEvent::Update(_))
    }
}

/// The effective update inside a payload.
///
/// Payloads nested one level under `envelope` are unwrapped; flat payloads
/// are used as they are.
pub fn unwrap_envelope<'a>(
    payload: &'a Map<String, Value>,
    envelope: &str,
) -> &'a Map<String, Value> {
    match payload.get(envelope) {
        Some(Value::Object(inner)) => inner,
        _ => payload,
    }
}
