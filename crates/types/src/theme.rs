//! Icon policy for every widget, expressed as data.

use crate::breakpoint::{Band, BreakpointTable};
use serde::{Deserialize, Serialize};

fn table(pairs: &[(f64, &str)], fallback: &str) -> BreakpointTable {
    BreakpointTable::sorted(
        pairs
            .iter()
            .map(|(below, label)| Band::new(*below, *label))
            .collect(),
        fallback,
    )
}

/// Icon names and threshold tables used by the widget formatters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IconTheme {
    /// Battery level while discharging
    pub battery: BreakpointTable,
    /// Battery level while charging
    pub battery_charging: BreakpointTable,
    /// Wifi signal strength
    pub network_wifi: BreakpointTable,
    pub network_wired: String,
    pub network_offline: String,
    /// Audio level when not muted
    pub audio: BreakpointTable,
    pub audio_muted: String,
    pub brightness: BreakpointTable,
    pub clock: String,
    pub cpu: String,
    pub memory: String,
    pub disk: String,
    pub workspace_active: String,
    pub workspace_inactive: String,
}

impl Default for IconTheme {
    fn default() -> Self {
        Self {
            battery: table(
                &[
                    (13.0, "battery_android_0"),
                    (26.0, "battery_android_1"),
                    (38.0, "battery_android_2"),
                    (50.0, "battery_android_3"),
                    (63.0, "battery_android_4"),
                    (75.0, "battery_android_5"),
                    (88.0, "battery_android_6"),
                ],
                "battery_android_full",
            ),
            battery_charging: BreakpointTable::constant("battery_android_bolt"),
            network_wifi: table(
                &[
                    (10.0, "signal_wifi_0_bar"),
                    (25.0, "network_wifi_1_bar"),
                    (50.0, "network_wifi_2_bar"),
                    (75.0, "network_wifi_3_bar"),
                    (90.0, "network_wifi"),
                ],
                "signal_wifi_4_bar",
            ),
            network_wired: "lan".to_string(),
            network_offline: "signal_wifi_off".to_string(),
            // Integer levels up to 33 and 66 inclusive
            audio: table(&[(34.0, "volume_mute"), (67.0, "volume_down")], "volume_up"),
            audio_muted: "volume_off".to_string(),
            brightness: table(
                &[(33.0, "brightness_low"), (66.0, "brightness_medium")],
                "brightness_high",
            ),
            clock: "clock".to_string(),
            cpu: "cpu".to_string(),
            memory: "memory".to_string(),
            disk: "disk".to_string(),
            workspace_active: "mode_standby".to_string(),
            workspace_inactive: "fiber_manual_record".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_battery_bands() {
        let theme = IconTheme::default();
        assert_eq!(theme.battery.bands().len(), 7);
        assert_eq!(theme.battery.select(12.0), "battery_android_0");
        assert_eq!(theme.battery.select(13.0), "battery_android_1");
        assert_eq!(theme.battery.select(87.0), "battery_android_6");
        assert_eq!(theme.battery.select(88.0), "battery_android_full");
    }

    #[test]
    fn test_partial_theme_keeps_defaults() {
        let theme: IconTheme = serde_json::from_str(
            r#"{ "brightness": { "bands": [{ "below": 50, "label": "dim" }], "fallback": "bright" } }"#,
        )
        .unwrap();
        assert_eq!(theme.brightness.select(10.0), "dim");
        assert_eq!(theme.audio_muted, "volume_off");
        assert_eq!(theme.network_wifi.bands().len(), 5);
    }
}
