//! Network widget

use super::percent_text;
use aether_bar_core::WidgetFormatter;
use aether_bar_types::{
    BreakpointTable, Fragment, IconTheme, MetricKey, SlotConfig, SystemState, WidgetKind,
};
use serde_json::Value;

/// Connection state derived from the network status metric
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Link {
    Offline,
    Wifi,
    Wired,
}

impl Link {
    /// Interpret a network status value.
    ///
    /// Numeric producers send -1 for offline and 1 for wifi; anything else
    /// online is a wired link.
    pub fn from_status(value: Option<&Value>) -> Self {
        match value {
            Some(Value::Number(n)) => match n.as_f64() {
                Some(v) if v == -1.0 => Link::Offline,
                Some(v) if v == 1.0 => Link::Wifi,
                _ => Link::Wired,
            },
            Some(Value::Bool(false)) => Link::Offline,
            Some(Value::String(s)) => match s.trim().to_ascii_lowercase().as_str() {
                "offline" | "disconnected" | "-1" => Link::Offline,
                "wifi" | "wireless" | "1" => Link::Wifi,
                _ => Link::Wired,
            },
            _ => Link::Wired,
        }
    }
}

fn is_numeric(value: Option<&Value>) -> bool {
    match value {
        Some(Value::Number(_)) => true,
        Some(Value::String(s)) => s
            .trim()
            .trim_end_matches('%')
            .trim()
            .parse::<f64>()
            .is_ok_and(f64::is_finite),
        _ => false,
    }
}

pub struct NetworkFormatter {
    wifi: BreakpointTable,
    wired: String,
    offline: String,
}

impl NetworkFormatter {
    pub fn new(theme: &IconTheme) -> Self {
        Self {
            wifi: theme.network_wifi.clone(),
            wired: theme.network_wired.clone(),
            offline: theme.network_offline.clone(),
        }
    }
}

impl WidgetFormatter for NetworkFormatter {
    fn kind(&self) -> WidgetKind {
        WidgetKind::Network
    }

    fn triggers(&self) -> &'static [MetricKey] {
        &[MetricKey::NetStatus, MetricKey::NetSignal]
    }

    fn format(&self, state: &SystemState, _slot: &SlotConfig) -> Fragment {
        let signal = state.get(MetricKey::NetSignal);
        let (icon, link_class) = match Link::from_status(state.get(MetricKey::NetStatus)) {
            Link::Offline => {
                return Fragment::new("network")
                    .icon(self.offline.as_str(), ["networkIcon", "wifi", "icon"]);
            }
            Link::Wifi => (
                self.wifi.select(state.number(MetricKey::NetSignal)),
                "wifi",
            ),
            Link::Wired => (self.wired.as_str(), "lan"),
        };

        let fragment = Fragment::new("network").icon(icon, ["networkIcon", link_class, "icon"]);
        if is_numeric(signal) {
            fragment.text(format!("{}%", percent_text(signal)))
        } else {
            fragment
        }
    }
}
