//! Plain-text rendering of a node tree for terminals and status-line consumers

use super::NodeTree;
use aether_bar_core::NodeKind;
use aether_bar_types::{Fragment, Part, Position};
use std::collections::HashMap;

/// Text placed between adjacent slots
const SEPARATOR_TEXT: &str = "  ";

/// Text placed between the three regions
const REGION_SEPARATOR: &str = " | ";

/// Render one fragment as text.
///
/// Icons and symbols are looked up in `glyphs`; names without a glyph are
/// omitted.
pub fn fragment_text(fragment: &Fragment, glyphs: &HashMap<String, String>) -> String {
    let mut out = String::new();
    for part in &fragment.parts {
        match part {
            Part::Icon { name, .. } | Part::Symbol { name, .. } => {
                if let Some(glyph) = glyphs.get(name) {
                    out.push_str(glyph);
                }
            }
            Part::Text { text } => out.push_str(text),
        }
    }
    out
}

impl NodeTree {
    /// Text of one region, slots in order with separators between them
    pub fn region_text(&self, position: Position, glyphs: &HashMap<String, String>) -> String {
        let Some(region) = self.region(position) else {
            return String::new();
        };

        let mut out = String::new();
        for child in self.children(region) {
            match self.kind(*child) {
                Some(NodeKind::Separator) => out.push_str(SEPARATOR_TEXT),
                Some(NodeKind::Slot { .. }) => {
                    if let Some(fragment) = self.content(*child) {
                        out.push_str(&fragment_text(fragment, glyphs));
                    }
                }
                _ => {}
            }
        }
        out
    }

    /// Whole bar as a single line: left, center, and right regions
    pub fn render_text(&self, glyphs: &HashMap<String, String>) -> String {
        Position::ALL
            .iter()
            .map(|position| self.region_text(*position, glyphs))
            .collect::<Vec<_>>()
            .join(REGION_SEPARATOR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aether_bar_core::RenderTarget;

    fn glyphs() -> HashMap<String, String> {
        HashMap::from([("clock".to_string(), "C".to_string())])
    }

    #[test]
    fn test_fragment_text_maps_glyphs() {
        let fragment = Fragment::new("clock")
            .icon("clock", ["clockIcon", "icon"])
            .icon("unknown", ["icon"])
            .text(" 12:00:00");
        assert_eq!(fragment_text(&fragment, &glyphs()), "C 12:00:00");
    }

    #[test]
    fn test_render_text_joins_regions() {
        let mut tree = NodeTree::with_regions();
        let left = tree.region(Position::Left).unwrap();
        let a = tree.create_node(NodeKind::slot("a"));
        let sep = tree.create_node(NodeKind::Separator);
        let b = tree.create_node(NodeKind::slot("b"));
        tree.append_child(left, a);
        tree.append_child(left, sep);
        tree.append_child(left, b);
        tree.set_content(a, &Fragment::new("x").text("1"));
        tree.set_content(b, &Fragment::new("y").text("2"));

        assert_eq!(tree.render_text(&HashMap::new()), "1  2 |  | ");
    }
}
