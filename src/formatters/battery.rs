//! Battery widget

use super::percent_text;
use aether_bar_core::WidgetFormatter;
use aether_bar_types::{
    BreakpointTable, Fragment, IconTheme, MetricKey, SlotConfig, SystemState, WidgetKind,
};
use serde_json::Value;

/// Interpret a battery status value as "charging"
pub fn is_charging(value: Option<&Value>) -> bool {
    match value {
        Some(Value::Number(n)) => n.as_f64() == Some(1.0),
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) => {
            let s = s.trim();
            s.eq_ignore_ascii_case("charging") || s == "1"
        }
        _ => false,
    }
}

pub struct BatteryFormatter {
    discharging: BreakpointTable,
    charging: BreakpointTable,
}

impl BatteryFormatter {
    pub fn new(theme: &IconTheme) -> Self {
        Self {
            discharging: theme.battery.clone(),
            charging: theme.battery_charging.clone(),
        }
    }
}

impl WidgetFormatter for BatteryFormatter {
    fn kind(&self) -> WidgetKind {
        WidgetKind::Battery
    }

    fn triggers(&self) -> &'static [MetricKey] {
        &[MetricKey::BatteryLevel, MetricKey::BatteryStatus]
    }

    fn format(&self, state: &SystemState, _slot: &SlotConfig) -> Fragment {
        let level = state.number(MetricKey::BatteryLevel);
        let (table, state_class) = if is_charging(state.get(MetricKey::BatteryStatus)) {
            (&self.charging, "charging")
        } else {
            (&self.discharging, "discharging")
        };

        Fragment::new("battery")
            .icon(table.select(level), ["batteryIcon", "icon", state_class])
            .text(format!(" {}%", percent_text(state.get(MetricKey::BatteryLevel))))
    }
}
