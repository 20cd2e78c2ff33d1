//! Audio volume widget

use super::percent_text;
use aether_bar_core::WidgetFormatter;
use aether_bar_types::{
    BreakpointTable, Fragment, IconTheme, MetricKey, SlotConfig, SystemState, WidgetKind,
};
use serde_json::Value;

/// Interpret an audio status value as "muted"
pub fn is_muted(value: Option<&Value>) -> bool {
    match value {
        Some(Value::Number(n)) => n.as_f64() == Some(0.0),
        Some(Value::Bool(b)) => !*b,
        Some(Value::String(s)) => {
            let s = s.trim();
            s.eq_ignore_ascii_case("muted") || s.eq_ignore_ascii_case("off") || s == "0"
        }
        _ => false,
    }
}

pub struct AudioFormatter {
    levels: BreakpointTable,
    muted: String,
}

impl AudioFormatter {
    pub fn new(theme: &IconTheme) -> Self {
        Self {
            levels: theme.audio.clone(),
            muted: theme.audio_muted.clone(),
        }
    }
}

impl WidgetFormatter for AudioFormatter {
    fn kind(&self) -> WidgetKind {
        WidgetKind::Audio
    }

    fn triggers(&self) -> &'static [MetricKey] {
        &[MetricKey::AudioLevel, MetricKey::AudioStatus]
    }

    fn format(&self, state: &SystemState, _slot: &SlotConfig) -> Fragment {
        let level = state.number(MetricKey::AudioLevel);
        let fragment = Fragment::new("volume");

        if level == 0.0 || is_muted(state.get(MetricKey::AudioStatus)) {
            return fragment.icon(self.muted.as_str(), ["volumeIcon", "icon"]);
        }

        fragment
            .icon(self.levels.select(level), ["volumeIcon", "icon"])
            .text(format!(" {}%", percent_text(state.get(MetricKey::AudioLevel))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(level: Value, status: Value) -> Fragment {
        let mut state = SystemState::new();
        state.set(MetricKey::AudioLevel, level);
        state.set(MetricKey::AudioStatus, status);
        AudioFormatter::new(&IconTheme::default()).format(&state, &SlotConfig::default())
    }

    #[test]
    fn test_muted_has_no_percentage() {
        let fragment = render(Value::from(50), Value::from(0));
        assert_eq!(fragment.icon_names(), vec!["volume_off"]);
        assert_eq!(fragment.plain_text(), "");
    }

    #[test]
    fn test_zero_level_counts_as_muted() {
        let fragment = render(Value::from(0), Value::from(1));
        assert_eq!(fragment.icon_names(), vec!["volume_off"]);
    }

    #[test]
    fn test_level_bands() {
        assert_eq!(render(Value::from(33), Value::from(1)).icon_names(), vec!["volume_mute"]);
        assert_eq!(render(Value::from(34), Value::from(1)).icon_names(), vec!["volume_down"]);
        assert_eq!(render(Value::from(66), Value::from(1)).icon_names(), vec!["volume_down"]);
        assert_eq!(render(Value::from(67), Value::from(1)).icon_names(), vec!["volume_up"]);
        assert_eq!(render(Value::from(67), Value::from(1)).plain_text(), " 67%");
    }

    #[test]
    fn test_mute_interpretation() {
        assert!(is_muted(Some(&Value::from(false))));
        assert!(is_muted(Some(&Value::from("Muted"))));
        assert!(!is_muted(Some(&Value::from(true))));
        assert!(!is_muted(None));
    }
}
