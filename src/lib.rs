//! aether-bar: a live desktop status bar engine
//!
//! This library provides:
//! - Slot layout building and partial-update dispatch over a render target
//! - Widget formatters, including the clock pattern language
//! - Configuration management
//! - Transports for the metrics collector and the event loop
//! - An in-memory render tree with text and markup output

pub mod config;
pub mod core;
pub mod formatters;
pub mod render;
pub mod transport;

// Re-export commonly used types
pub use config::AppConfig;
pub use core::{BarContext, BarEvent, Dispatcher};
pub use render::NodeTree;
