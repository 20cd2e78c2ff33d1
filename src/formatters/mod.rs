//! Built-in widget formatters
//!
//! This module contains one formatter per widget kind in the bar's fixed
//! catalog. Each formatter is a pure function of the system state and its
//! slot configuration; icon choices come from the
//! [`IconTheme`](aether_bar_types::IconTheme) tables.

mod audio;
mod battery;
mod brightness;
mod client;
mod clock;
pub mod clock_pattern;
mod gauge;
mod network;
mod workspace;

pub use audio::{is_muted, AudioFormatter};
pub use battery::{is_charging, BatteryFormatter};
pub use brightness::{parse_percent, BrightnessFormatter};
pub use client::{ClientFormatter, ClientSummary};
pub use clock::{ClockFormatter, DEFAULT_CLOCK_TEMPLATE};
pub use clock_pattern::{ClockTemplate, ClockTime};
pub use gauge::GaugeFormatter;
pub use network::{Link, NetworkFormatter};
pub use workspace::{active_workspace, workspace_count, WorkspaceFormatter};

use aether_bar_core::Registry;
use aether_bar_types::{display_value, WidgetKind};
use serde_json::Value;

/// Display text of a percentage metric without a trailing `%`
pub(crate) fn percent_text(value: Option<&Value>) -> String {
    let text = display_value(value);
    match text.trim_end().strip_suffix('%') {
        Some(stripped) => stripped.to_string(),
        None => text,
    }
}

/// Register all built-in formatters with a registry
pub fn register_all(registry: &mut Registry) {
    registry.register(WidgetKind::Clock, |theme| Box::new(ClockFormatter::new(theme)));
    registry.register(WidgetKind::Battery, |theme| Box::new(BatteryFormatter::new(theme)));
    registry.register(WidgetKind::Network, |theme| Box::new(NetworkFormatter::new(theme)));
    registry.register(WidgetKind::Audio, |theme| Box::new(AudioFormatter::new(theme)));
    registry.register(WidgetKind::Brightness, |theme| {
        Box::new(BrightnessFormatter::new(theme))
    });
    registry.register(WidgetKind::Cpu, |theme| Box::new(GaugeFormatter::cpu(theme)));
    registry.register(WidgetKind::Memory, |theme| Box::new(GaugeFormatter::memory(theme)));
    registry.register(WidgetKind::Disk, |theme| Box::new(GaugeFormatter::disk(theme)));
    registry.register(WidgetKind::ActiveClient, |theme| Box::new(ClientFormatter::new(theme)));
    registry.register(WidgetKind::Workspace, |theme| {
        Box::new(WorkspaceFormatter::new(theme))
    });
}

/// Registry with every built-in formatter
pub fn builtin_registry() -> Registry {
    let mut registry = Registry::new();
    register_all(&mut registry);
    registry
}
