//! aether-bar-core: Core traits and registry for the AetherBar status bar.
//!
//! This crate contains the seams of the engine: the render target contract,
//! the widget formatter trait, the formatter registry, and shared constants.

pub mod constants;
mod formatter;
mod registry;
mod render_target;

pub use constants::{
    CLOCK_TICK_INTERVAL, DEFAULT_ENVELOPE_FIELD, DEFAULT_REQUEST_INTERVAL, SEPARATOR_CLASS,
    SLOT_ID_PREFIX,
};
pub use formatter::{BoxedFormatter, WidgetFormatter};
pub use registry::{FormatterFactory, Registry};
pub use render_target::{slot_identifier, NodeId, NodeKind, RenderTarget};

// Re-export types used in trait signatures for convenience
pub use aether_bar_types::{Fragment, IconTheme, MetricKey, SlotConfig, SystemState, WidgetKind};
