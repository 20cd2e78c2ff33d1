//! Screen brightness widget

use super::percent_text;
use aether_bar_core::WidgetFormatter;
use aether_bar_types::{
    BreakpointTable, Fragment, IconTheme, MetricKey, SlotConfig, SystemState, WidgetKind,
};
use serde_json::Value;

/// Leading integer of a percentage value (`"45.7%"` is 45); anything else is 0
pub fn parse_percent(value: Option<&Value>) -> i64 {
    match value {
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f.trunc() as i64))
            .unwrap_or(0),
        Some(Value::String(s)) => {
            let s = s.replace('%', "");
            let s = s.trim_start();
            let (sign, digits) = match s.strip_prefix('-') {
                Some(rest) => (-1, rest),
                None => (1, s.strip_prefix('+').unwrap_or(s)),
            };
            let end = digits
                .find(|c: char| !c.is_ascii_digit())
                .unwrap_or(digits.len());
            digits[..end].parse::<i64>().map(|n| sign * n).unwrap_or(0)
        }
        _ => 0,
    }
}

pub struct BrightnessFormatter {
    levels: BreakpointTable,
}

impl BrightnessFormatter {
    pub fn new(theme: &IconTheme) -> Self {
        Self {
            levels: theme.brightness.clone(),
        }
    }
}

impl WidgetFormatter for BrightnessFormatter {
    fn kind(&self) -> WidgetKind {
        WidgetKind::Brightness
    }

    fn triggers(&self) -> &'static [MetricKey] {
        &[MetricKey::Brightness]
    }

    fn format(&self, state: &SystemState, _slot: &SlotConfig) -> Fragment {
        let raw = state.get(MetricKey::Brightness);
        let level = parse_percent(raw) as f64;

        Fragment::new("brightness")
            .icon(self.levels.select(level), ["brightnessIcon", "icon"])
            .text(format!(" {}%", percent_text(raw)))
    }
}
