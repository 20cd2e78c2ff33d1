//! Configuration management

mod defaults;
mod settings;
#[cfg(feature = "watch")]
mod watch;

pub use defaults::{default_glyphs, default_slots};
pub use settings::{AppConfig, TransportConfig};
#[cfg(feature = "watch")]
pub use watch::watch_config;
