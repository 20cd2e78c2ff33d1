//! Widget formatter trait

use aether_bar_types::{Fragment, MetricKey, SlotConfig, SystemState, WidgetKind};
use std::collections::BTreeSet;

/// Trait for all widget formatters
///
/// Formatters turn the current system state into a display fragment for
/// one slot. They are pure reads: a formatter never mutates the state, and
/// it only runs when one of its trigger keys was present in an update.
pub trait WidgetFormatter {
    /// Widget kind this formatter renders
    fn kind(&self) -> WidgetKind;

    /// Metric keys that cause this formatter to re-run
    fn triggers(&self) -> &'static [MetricKey];

    /// Render the fragment for a slot
    fn format(&self, state: &SystemState, slot: &SlotConfig) -> Fragment;

    /// Check whether any trigger key is among the changed keys
    fn is_triggered_by(&self, changed: &BTreeSet<MetricKey>) -> bool {
        self.triggers().iter().any(|key| changed.contains(key))
    }
}

/// Type-erased formatter for dynamic dispatch
pub type BoxedFormatter = Box<dyn WidgetFormatter>;

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed;

    impl WidgetFormatter for Fixed {
        fn kind(&self) -> WidgetKind {
            WidgetKind::Cpu
        }

        fn triggers(&self) -> &'static [MetricKey] {
            &[MetricKey::CpuUsage]
        }

        fn format(&self, _state: &SystemState, _slot: &SlotConfig) -> Fragment {
            Fragment::new("cpu")
        }
    }

    #[test]
    fn test_is_triggered_by() {
        let formatter = Fixed;
        let mut changed = BTreeSet::new();
        changed.insert(MetricKey::RamUsage);
        assert!(!formatter.is_triggered_by(&changed));
        changed.insert(MetricKey::CpuUsage);
        assert!(formatter.is_triggered_by(&changed));
    }
}
