//! Built-in slot layout and text glyphs

use serde_json::{json, Value};
use std::collections::HashMap;

/// Slot layout used when no configuration file provides one
pub fn default_slots() -> Value {
    json!({
        "workspace": { "position": "left" },
        "activeWindow": { "position": "left" },
        "clock": { "position": "center", "format": "{HH:mm:ss}" },
        "network": { "position": "right" },
        "volume": { "position": "right" },
        "brightness": { "position": "right" },
        "cpu": { "position": "right" },
        "memory": { "position": "right" },
        "disk": { "position": "right" },
        "battery": { "position": "right" }
    })
}

/// Text glyphs for the icon and symbol names of the default theme
pub fn default_glyphs() -> HashMap<String, String> {
    [
        ("clock", "◷ "),
        ("battery_android_0", "▁"),
        ("battery_android_1", "▂"),
        ("battery_android_2", "▃"),
        ("battery_android_3", "▄"),
        ("battery_android_4", "▅"),
        ("battery_android_5", "▆"),
        ("battery_android_6", "▇"),
        ("battery_android_full", "█"),
        ("battery_android_bolt", "⚡"),
        ("signal_wifi_0_bar", "◌ "),
        ("network_wifi_1_bar", "◔ "),
        ("network_wifi_2_bar", "◑ "),
        ("network_wifi_3_bar", "◕ "),
        ("network_wifi", "● "),
        ("signal_wifi_4_bar", "● "),
        ("signal_wifi_off", "✕"),
        ("lan", "⇅"),
        ("volume_off", "🔇"),
        ("volume_mute", "🔈"),
        ("volume_down", "🔉"),
        ("volume_up", "🔊"),
        ("brightness_low", "☼"),
        ("brightness_medium", "☼"),
        ("brightness_high", "☀"),
        ("cpu", "cpu "),
        ("memory", "mem "),
        ("disk", "disk "),
        ("mode_standby", "◉"),
        ("fiber_manual_record", "○"),
    ]
    .into_iter()
    .map(|(name, glyph)| (name.to_string(), glyph.to_string()))
    .collect()
}
