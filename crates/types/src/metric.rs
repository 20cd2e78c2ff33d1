//! Metric keys, the system state snapshot, and partial updates.

use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::{BTreeSet, HashMap};
use std::fmt;

/// Fixed vocabulary of metric keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MetricKey {
    #[serde(rename = "audio_level")]
    AudioLevel,
    #[serde(rename = "audio_status")]
    AudioStatus,
    #[serde(rename = "net_status")]
    NetStatus,
    #[serde(rename = "net_signal_strength")]
    NetSignal,
    #[serde(rename = "brightness")]
    Brightness,
    #[serde(rename = "disk_usage")]
    DiskUsage,
    #[serde(rename = "cpu_usage")]
    CpuUsage,
    #[serde(rename = "ram_usage")]
    RamUsage,
    #[serde(rename = "time")]
    Time,
    #[serde(rename = "workspace")]
    Workspace,
    #[serde(rename = "workspaces")]
    WorkspaceList,
    #[serde(rename = "client")]
    Client,
    #[serde(rename = "bat_capacity")]
    BatteryLevel,
    #[serde(rename = "bat_status")]
    BatteryStatus,
}

impl MetricKey {
    pub const ALL: [MetricKey; 14] = [
        MetricKey::AudioLevel,
        MetricKey::AudioStatus,
        MetricKey::NetStatus,
        MetricKey::NetSignal,
        MetricKey::Brightness,
        MetricKey::DiskUsage,
        MetricKey::CpuUsage,
        MetricKey::RamUsage,
        MetricKey::Time,
        MetricKey::Workspace,
        MetricKey::WorkspaceList,
        MetricKey::Client,
        MetricKey::BatteryLevel,
        MetricKey::BatteryStatus,
    ];

    /// Canonical name of the key on the wire
    pub fn wire_name(&self) -> &'static str {
        match self {
            MetricKey::AudioLevel => "audio_level",
            MetricKey::AudioStatus => "audio_status",
            MetricKey::NetStatus => "net_status",
            MetricKey::NetSignal => "net_signal_strength",
            MetricKey::Brightness => "brightness",
            MetricKey::DiskUsage => "disk_usage",
            MetricKey::CpuUsage => "cpu_usage",
            MetricKey::RamUsage => "ram_usage",
            MetricKey::Time => "time",
            MetricKey::Workspace => "workspace",
            MetricKey::WorkspaceList => "workspaces",
            MetricKey::Client => "client",
            MetricKey::BatteryLevel => "bat_capacity",
            MetricKey::BatteryStatus => "bat_status",
        }
    }

    pub fn from_wire_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|key| key.wire_name() == name)
    }
}

impl fmt::Display for MetricKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

/// Coerce a metric value to a number.
///
/// Numbers pass through, numeric strings (optionally ending in `%`) are
/// parsed, booleans map to 0/1, and everything else is 0.
pub fn number_of(value: Option<&Value>) -> f64 {
    match value {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => s
            .trim()
            .trim_end_matches('%')
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|n| n.is_finite())
            .unwrap_or(0.0),
        Some(Value::Bool(b)) => f64::from(u8::from(*b)),
        _ => 0.0,
    }
}

/// Render a metric value as display text; strings are used verbatim
pub fn display_value(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}

/// Last known value of every metric
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SystemState {
    values: HashMap<MetricKey, Value>,
}

impl SystemState {
    /// Empty state
    pub fn new() -> Self {
        Self::default()
    }

    /// State seeded with the values a bar shows before the first update
    pub fn with_defaults() -> Self {
        let mut values = HashMap::new();
        for key in [
            MetricKey::AudioLevel,
            MetricKey::AudioStatus,
            MetricKey::NetStatus,
            MetricKey::NetSignal,
            MetricKey::Brightness,
            MetricKey::DiskUsage,
            MetricKey::CpuUsage,
            MetricKey::RamUsage,
        ] {
            values.insert(key, Value::from(0));
        }
        values.insert(
            MetricKey::Workspace,
            Value::from("Workspace { id: 1, monitor_id: 0, focused: true }"),
        );
        values.insert(MetricKey::WorkspaceList, Value::from(""));
        values.insert(
            MetricKey::Client,
            Value::from(
                r#"Client { id: 0, initial_title: "", title: "", class: "", instance: "", pid: 0 }"#,
            ),
        );
        values.insert(MetricKey::BatteryLevel, Value::from(100));
        values.insert(MetricKey::BatteryStatus, Value::from(1));
        Self { values }
    }

    pub fn get(&self, key: MetricKey) -> Option<&Value> {
        self.values.get(&key)
    }

    /// Numeric view of a metric, see [`number_of`]
    pub fn number(&self, key: MetricKey) -> f64 {
        number_of(self.get(key))
    }

    /// Display view of a metric, see [`display_value`]
    pub fn text(&self, key: MetricKey) -> String {
        display_value(self.get(key))
    }

    /// Overwrite one key, returning the previous value
    pub fn set(&mut self, key: MetricKey, value: Value) -> Option<Value> {
        self.values.insert(key, value)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// A subset of metrics arriving from the transport
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PartialUpdate {
    entries: Vec<(MetricKey, Value)>,
}

impl PartialUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entry; a repeated key keeps the later value
    pub fn insert(&mut self, key: MetricKey, value: Value) {
        if let Some(slot) = self.entries.iter_mut().find(|(k, _)| *k == key) {
            slot.1 = value;
        } else {
            self.entries.push((key, value));
        }
    }

    pub fn with(mut self, key: MetricKey, value: impl Into<Value>) -> Self {
        self.insert(key, value.into());
        self
    }

    /// Keys present in this update
    pub fn keys(&self) -> BTreeSet<MetricKey> {
        self.entries.iter().map(|(k, _)| *k).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

impl IntoIterator for PartialUpdate {
    type Item = (MetricKey, Value);
    type IntoIter = std::vec::IntoIter<(MetricKey, Value)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// Maps wire key names onto the canonical metric vocabulary.
///
/// Canonical names always resolve; aliases cover bar variants that name
/// the same metric differently.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeyAdapter {
    aliases: HashMap<String, MetricKey>,
}

impl KeyAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_alias(mut self, wire_name: impl Into<String>, key: MetricKey) -> Self {
        self.aliases.insert(wire_name.into(), key);
        self
    }

    pub fn resolve(&self, name: &str) -> Option<MetricKey> {
        self.aliases
            .get(name)
            .copied()
            .or_else(|| MetricKey::from_wire_name(name))
    }

    /// Convert a raw JSON object into a typed update, dropping unknown keys
    pub fn adapt(&self, raw: &Map<String, Value>) -> PartialUpdate {
        let mut update = PartialUpdate::new();
        for (name, value) in raw {
            match self.resolve(name) {
                Some(key) => update.insert(key, value.clone()),
                None => debug!("Ignoring unknown metric key '{}'", name),
            }
        }
        update
    }
}
