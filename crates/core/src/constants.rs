//! Shared constants for the engine

use std::time::Duration;

/// Minimum spacing between update requests in request/response mode
pub const DEFAULT_REQUEST_INTERVAL: Duration = Duration::from_millis(100);

/// Interval of the local clock ticker
pub const CLOCK_TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Field that wraps the effective update in nested payloads
pub const DEFAULT_ENVELOPE_FIELD: &str = "datapack";

/// Prefix of slot node identifiers
pub const SLOT_ID_PREFIX: &str = "slot-";

/// Style class of separator nodes
pub const SEPARATOR_CLASS: &str = "spacer";
