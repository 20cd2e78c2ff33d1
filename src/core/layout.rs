//! Slot layout builder

use aether_bar_core::{NodeId, NodeKind, RenderTarget};
use aether_bar_types::{BarLayout, Position};
use indexmap::IndexMap;
use log::{debug, info};
use std::collections::HashMap;

/// A mounted slot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slot {
    pub name: String,
    pub node: NodeId,
    pub position: Position,
}

/// Result of a layout build
#[derive(Debug, Clone, Default)]
pub struct BuiltLayout {
    /// Region nodes that were available
    pub regions: HashMap<Position, NodeId>,
    /// Mounted slots in configuration order
    pub slots: IndexMap<String, Slot>,
}

impl BuiltLayout {
    /// Names of the slots mounted in a region, in display order
    pub fn slots_in(&self, position: Position) -> Vec<&str> {
        self.slots
            .values()
            .filter(|slot| slot.position == position)
            .map(|slot| slot.name.as_str())
            .collect()
    }
}

/// Builds the slot tree from a bar layout.
///
/// The builder remembers every node it mounted, so a rebuild removes the
/// previous slots and separators before mounting new ones.
#[derive(Debug, Default)]
pub struct LayoutBuilder {
    mounted: Vec<NodeId>,
}

impl LayoutBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove every slot and separator this builder mounted
    pub fn clear<T: RenderTarget>(&mut self, target: &mut T) {
        for node in self.mounted.drain(..) {
            target.remove_node(node);
        }
    }

    /// Rebuild all regions from `layout`
    pub fn build<T: RenderTarget>(&mut self, target: &mut T, layout: &BarLayout) -> BuiltLayout {
        self.clear(target);

        let mut built = BuiltLayout::default();
        for position in Position::ALL {
            if let Some(node) = target.node_by_id(position.region_id()) {
                built.regions.insert(position, node);
            }
        }

        let mut counts: HashMap<Position, usize> = HashMap::new();
        for (name, config) in layout {
            let position = config.position;
            let Some(&region) = built.regions.get(&position) else {
                debug!("Region '{}' not available, skipping slot '{}'", position, name);
                continue;
            };

            let count = counts.entry(position).or_default();
            if *count > 0 {
                let separator = target.create_node(NodeKind::Separator);
                target.append_child(region, separator);
                self.mounted.push(separator);
            }

            let node = target.create_node(NodeKind::slot(name.as_str()));
            target.append_child(region, node);
            self.mounted.push(node);
            *count += 1;

            built.slots.insert(
                name.clone(),
                Slot {
                    name: name.clone(),
                    node,
                    position,
                },
            );
        }

        info!(
            "Layout built: {} slots (left {}, center {}, right {})",
            built.slots.len(),
            counts.get(&Position::Left).copied().unwrap_or(0),
            counts.get(&Position::Center).copied().unwrap_or(0),
            counts.get(&Position::Right).copied().unwrap_or(0),
        );
        built
    }
}
