//! Update dispatcher
//!
//! Applies configuration events through the layout builder, merges metric
//! updates into the state store, and re-renders the widgets whose trigger
//! keys were present in the update.

use super::event::{unwrap_envelope, BarEvent};
use super::layout::LayoutBuilder;
use super::state_store::StateStore;
use crate::formatters;
use aether_bar_core::{BoxedFormatter, NodeId, Registry, RenderTarget, DEFAULT_ENVELOPE_FIELD};
use aether_bar_types::{
    BarLayout, IconTheme, KeyAdapter, MetricKey, PartialUpdate, SlotConfig, SystemState,
};
use log::{debug, info, trace};
use serde_json::{Map, Value};
use std::collections::BTreeSet;

/// Lifecycle of the dispatcher
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatcherState {
    /// Constructed, transport not yet connected
    Idle,
    /// Transport connected, no layout applied yet
    AwaitingConfig,
    /// Layout applied; processing updates
    Active,
}

/// Static collaborators of the dispatcher
pub struct BarContext {
    pub theme: IconTheme,
    pub adapter: KeyAdapter,
    pub registry: Registry,
    /// Field that wraps nested update payloads
    pub envelope: String,
}

impl BarContext {
    pub fn new(theme: IconTheme, adapter: KeyAdapter) -> Self {
        Self {
            theme,
            adapter,
            registry: formatters::builtin_registry(),
            envelope: DEFAULT_ENVELOPE_FIELD.to_string(),
        }
    }

    pub fn with_envelope(mut self, envelope: impl Into<String>) -> Self {
        self.envelope = envelope.into();
        self
    }
}

impl Default for BarContext {
    fn default() -> Self {
        Self::new(IconTheme::default(), KeyAdapter::default())
    }
}

/// A slot bound to its formatter
struct MountedWidget {
    name: String,
    node: NodeId,
    config: SlotConfig,
    formatter: Option<BoxedFormatter>,
}

/// Drives a render target from configuration and update events
pub struct Dispatcher<T: RenderTarget> {
    target: T,
    context: BarContext,
    store: StateStore,
    builder: LayoutBuilder,
    layout: BarLayout,
    widgets: Vec<MountedWidget>,
    status: DispatcherState,
}

impl<T: RenderTarget> Dispatcher<T> {
    /// Create a dispatcher with the startup default state
    pub fn new(target: T, context: BarContext) -> Self {
        Self {
            target,
            context,
            store: StateStore::with_defaults(),
            builder: LayoutBuilder::new(),
            layout: BarLayout::new(),
            widgets: Vec::new(),
            status: DispatcherState::Idle,
        }
    }

    /// Replace the initial state
    pub fn with_state(mut self, state: SystemState) -> Self {
        self.store = StateStore::new(state);
        self
    }

    pub fn status(&self) -> DispatcherState {
        self.status
    }

    pub fn target(&self) -> &T {
        &self.target
    }

    pub fn state(&self) -> &SystemState {
        self.store.state()
    }

    pub fn layout(&self) -> &BarLayout {
        &self.layout
    }

    /// Names of the mounted slots in configuration order
    pub fn mounted_slots(&self) -> Vec<&str> {
        self.widgets.iter().map(|w| w.name.as_str()).collect()
    }

    /// Mark the transport as connected
    pub fn start(&mut self) {
        if self.status == DispatcherState::Idle {
            self.status = DispatcherState::AwaitingConfig;
        }
    }

    /// Process one event
    pub fn handle_event(&mut self, event: BarEvent) {
        match event {
            BarEvent::Config(layout) => {
                self.apply_config(layout);
            }
            BarEvent::Update(payload) => {
                self.handle_update(&payload);
            }
        }
    }

    /// Rebuild the layout and render every mounted slot from cached state.
    ///
    /// Returns the number of mounted slots.
    pub fn apply_config(&mut self, layout: BarLayout) -> usize {
        let built = self.builder.build(&mut self.target, &layout);

        self.widgets = built
            .slots
            .into_values()
            .map(|slot| {
                let config = layout.get(&slot.name).cloned().unwrap_or_default();
                let formatter = config.widget_kind(&slot.name).and_then(|kind| {
                    self.context
                        .registry
                        .create(kind, &self.context.theme)
                        .map_err(|e| debug!("Slot '{}' has no formatter: {}", slot.name, e))
                        .ok()
                });
                if formatter.is_none() {
                    debug!("Slot '{}' is mounted without a widget", slot.name);
                }
                MountedWidget {
                    name: slot.name,
                    node: slot.node,
                    config,
                    formatter,
                }
            })
            .collect();

        self.layout = layout;
        self.status = DispatcherState::Active;
        info!("Applied configuration with {} slots", self.widgets.len());

        self.render(None);
        self.widgets.len()
    }

    /// Merge a raw payload and re-render affected widgets.
    ///
    /// Returns the keys present in the effective update.
    pub fn handle_update(&mut self, payload: &Map<String, Value>) -> BTreeSet<MetricKey> {
        let inner = unwrap_envelope(payload, &self.context.envelope);
        let update = self.context.adapter.adapt(inner);
        self.apply_update(update)
    }

    /// Merge a typed update and re-render affected widgets
    pub fn apply_update(&mut self, update: PartialUpdate) -> BTreeSet<MetricKey> {
        let changed = self.store.merge(update);
        if !changed.is_empty() {
            let rendered = self.render(Some(&changed));
            trace!("Update with {} keys re-rendered {} slots", changed.len(), rendered);
        }
        changed
    }

    /// Render widgets triggered by `changed`, or all widgets for `None`
    fn render(&mut self, changed: Option<&BTreeSet<MetricKey>>) -> usize {
        let state = self.store.state();
        let mut rendered = 0;
        for widget in &self.widgets {
            let Some(formatter) = &widget.formatter else {
                continue;
            };
            if changed.is_some_and(|keys| !formatter.is_triggered_by(keys)) {
                continue;
            }
            let fragment = formatter.format(state, &widget.config);
            self.target.set_content(widget.node, &fragment);
            rendered += 1;
        }
        rendered
    }
}
