//! aether-bar-types: Shared data types for the AetherBar status bar.
//!
//! This crate contains pure data types (slot configuration, metric keys,
//! threshold tables, display fragments) shared by the engine crates. Nothing
//! here touches a render target or a transport.

pub mod breakpoint;
pub mod fragment;
pub mod metric;
pub mod record;
pub mod slot;
pub mod theme;

// Re-export commonly used types at the crate root for convenience
pub use breakpoint::{Band, BreakpointError, BreakpointTable};
pub use fragment::{Fragment, Part};
pub use metric::{display_value, number_of, KeyAdapter, MetricKey, PartialUpdate, SystemState};
pub use record::{extract_field, Record, RecordError};
pub use slot::{parse_layout, BarLayout, Position, SlotConfig, WidgetKind};
pub use theme::IconTheme;
