//! Registry of widget formatters

use crate::formatter::BoxedFormatter;
use aether_bar_types::{IconTheme, WidgetKind};
use anyhow::{anyhow, Result};
use log::debug;
use std::collections::HashMap;

/// Function that creates a formatter for the given icon theme
pub type FormatterFactory = fn(&IconTheme) -> BoxedFormatter;

/// Registry of formatter factories, keyed by widget kind
///
/// The registry is an explicit value owned by the application context
/// rather than a process-wide static, so tests can build their own.
pub struct Registry {
    formatters: HashMap<WidgetKind, FormatterFactory>,
}

impl Registry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            formatters: HashMap::new(),
        }
    }

    /// Register a formatter factory, replacing any previous one for the kind
    pub fn register(&mut self, kind: WidgetKind, factory: FormatterFactory) {
        debug!("Registered formatter for {:?}", kind);
        self.formatters.insert(kind, factory);
    }

    /// Create a formatter by widget kind
    pub fn create(&self, kind: WidgetKind, theme: &IconTheme) -> Result<BoxedFormatter> {
        let factory = self
            .formatters
            .get(&kind)
            .ok_or_else(|| anyhow!("No formatter registered for {:?}", kind))?;
        Ok(factory(theme))
    }

    pub fn contains(&self, kind: WidgetKind) -> bool {
        self.formatters.contains_key(&kind)
    }

    /// List all registered widget kinds
    pub fn kinds(&self) -> Vec<WidgetKind> {
        self.formatters.keys().copied().collect()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}
