//! Clock widget

use super::clock_pattern::{ClockTemplate, ClockTime};
use aether_bar_core::WidgetFormatter;
use aether_bar_types::{Fragment, IconTheme, MetricKey, SlotConfig, SystemState, WidgetKind};
use serde_json::Value;

/// Template used when the slot has no `format`
pub const DEFAULT_CLOCK_TEMPLATE: &str = "{HH:mm:ss}";

pub struct ClockFormatter {
    icon: String,
}

impl ClockFormatter {
    pub fn new(theme: &IconTheme) -> Self {
        Self {
            icon: theme.clock.clone(),
        }
    }

    /// Time from the state, or the local wall clock if none is usable
    fn current_time(state: &SystemState) -> ClockTime {
        state
            .get(MetricKey::Time)
            .and_then(Value::as_str)
            .and_then(ClockTime::parse)
            .unwrap_or_else(ClockTime::now)
    }
}

impl WidgetFormatter for ClockFormatter {
    fn kind(&self) -> WidgetKind {
        WidgetKind::Clock
    }

    fn triggers(&self) -> &'static [MetricKey] {
        &[MetricKey::Time]
    }

    fn format(&self, state: &SystemState, slot: &SlotConfig) -> Fragment {
        let template =
            ClockTemplate::parse(slot.format.as_deref().unwrap_or(DEFAULT_CLOCK_TEMPLATE));
        let text = template.render(Self::current_time(state));
        Fragment::new("clock")
            .icon(self.icon.as_str(), ["clockIcon", "icon"])
            .text(text)
    }
}
