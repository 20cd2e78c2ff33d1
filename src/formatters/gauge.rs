//! CPU, memory, and disk usage gauges
//!
//! Usage values arrive already formatted, so gauges render them verbatim.

use super::percent_text;
use aether_bar_core::WidgetFormatter;
use aether_bar_types::{Fragment, IconTheme, MetricKey, SlotConfig, SystemState, WidgetKind};

pub struct GaugeFormatter {
    kind: WidgetKind,
    key: MetricKey,
    class: &'static str,
    icon: String,
}

impl GaugeFormatter {
    pub fn cpu(theme: &IconTheme) -> Self {
        Self {
            kind: WidgetKind::Cpu,
            key: MetricKey::CpuUsage,
            class: "cpu",
            icon: theme.cpu.clone(),
        }
    }

    pub fn memory(theme: &IconTheme) -> Self {
        Self {
            kind: WidgetKind::Memory,
            key: MetricKey::RamUsage,
            class: "memory",
            icon: theme.memory.clone(),
        }
    }

    pub fn disk(theme: &IconTheme) -> Self {
        Self {
            kind: WidgetKind::Disk,
            key: MetricKey::DiskUsage,
            class: "disk",
            icon: theme.disk.clone(),
        }
    }
}

impl WidgetFormatter for GaugeFormatter {
    fn kind(&self) -> WidgetKind {
        self.kind
    }

    fn triggers(&self) -> &'static [MetricKey] {
        match self.key {
            MetricKey::CpuUsage => &[MetricKey::CpuUsage],
            MetricKey::RamUsage => &[MetricKey::RamUsage],
            _ => &[MetricKey::DiskUsage],
        }
    }

    fn format(&self, state: &SystemState, _slot: &SlotConfig) -> Fragment {
        let icon_class = format!("{}Icon", self.class);
        Fragment::new(self.class)
            .icon(self.icon.as_str(), [icon_class.as_str(), "icon"])
            .text(format!("{}%", percent_text(state.get(self.key))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn test_usage_is_rendered_verbatim() {
        let mut state = SystemState::new();
        state.set(MetricKey::CpuUsage, Value::from("12.34"));
        state.set(MetricKey::RamUsage, Value::from(48));

        let theme = IconTheme::default();
        let cpu = GaugeFormatter::cpu(&theme).format(&state, &SlotConfig::default());
        assert_eq!(cpu.class, "cpu");
        assert_eq!(cpu.icon_names(), vec!["cpu"]);
        assert_eq!(cpu.plain_text(), "12.34%");

        let memory = GaugeFormatter::memory(&theme).format(&state, &SlotConfig::default());
        assert_eq!(memory.plain_text(), "48%");
    }

    #[test]
    fn test_each_gauge_has_its_own_trigger() {
        let theme = IconTheme::default();
        assert_eq!(GaugeFormatter::cpu(&theme).triggers(), &[MetricKey::CpuUsage]);
        assert_eq!(GaugeFormatter::memory(&theme).triggers(), &[MetricKey::RamUsage]);
        assert_eq!(GaugeFormatter::disk(&theme).triggers(), &[MetricKey::DiskUsage]);
        assert_eq!(GaugeFormatter::disk(&theme).kind(), WidgetKind::Disk);
    }
}
