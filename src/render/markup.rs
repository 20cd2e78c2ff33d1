//! HTML markup rendering of a node tree

use super::NodeTree;
use aether_bar_core::NodeKind;
use aether_bar_types::{Fragment, Part, Position};
use indexmap::IndexMap;

/// Directory icon assets are referenced from
pub const ICON_DIR: &str = "svg";

/// Escape text for use in element content and quoted attributes
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Render a fragment as an HTML container.
///
/// Icons become `<img>` elements pointing at `{icon_dir}/{name}.svg`,
/// symbols become `<span>` glyph text.
pub fn fragment_markup(fragment: &Fragment, icon_dir: &str) -> String {
    let mut out = format!("<div class='{}'>", escape_html(&fragment.class));
    for part in &fragment.parts {
        match part {
            Part::Icon { name, classes } => out.push_str(&format!(
                "<img src='{}/{}.svg' class='{}'>",
                escape_html(icon_dir),
                escape_html(name),
                escape_html(&classes.join(" "))
            )),
            Part::Symbol { name, classes } => out.push_str(&format!(
                "<span class='{}'>{}</span>",
                escape_html(&classes.join(" ")),
                escape_html(name)
            )),
            Part::Text { text } => out.push_str(&escape_html(text)),
        }
    }
    out.push_str("</div>");
    out
}

impl NodeTree {
    /// Markup for the children of one region
    pub fn region_markup(&self, position: Position, icon_dir: &str) -> String {
        let Some(region) = self.region(position) else {
            return String::new();
        };

        let mut out = String::new();
        for child in self.children(region) {
            let Some(kind) = self.kind(*child) else {
                continue;
            };
            let classes = escape_html(&self.classes(*child).join(" "));
            match kind {
                NodeKind::Slot { .. } => {
                    let id = kind.identifier().unwrap_or_default();
                    let inner = self
                        .content(*child)
                        .map(|fragment| fragment_markup(fragment, icon_dir))
                        .unwrap_or_default();
                    out.push_str(&format!(
                        "<div id='{}' class='{}'>{}</div>",
                        escape_html(&id),
                        classes,
                        inner
                    ));
                }
                NodeKind::Separator => out.push_str(&format!("<div class='{}'></div>", classes)),
                NodeKind::Region(_) => {}
            }
        }
        out
    }

    /// Markup of every region keyed by region identifier, icons under `svg/`
    pub fn render_markup(&self) -> IndexMap<String, String> {
        self.render_markup_with(ICON_DIR)
    }

    pub fn render_markup_with(&self, icon_dir: &str) -> IndexMap<String, String> {
        Position::ALL
            .iter()
            .map(|position| {
                (
                    position.region_id().to_string(),
                    self.region_markup(*position, icon_dir),
                )
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aether_bar_core::RenderTarget;

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("<a & 'b'>"), "&lt;a &amp; &#39;b&#39;&gt;");
    }

    #[test]
    fn test_fragment_markup_shape() {
        let fragment = Fragment::new("workspace")
            .symbol("radio_button_checked", ["active", "material-symbols-outlined"])
            .text(" ");
        assert_eq!(
            fragment_markup(&fragment, "svg"),
            "<div class='workspace'><span class='active material-symbols-outlined'>radio_button_checked</span> </div>"
        );

        let icon = Fragment::new("cpu").icon("cpu", ["cpuIcon"]).text("5%");
        assert_eq!(
            fragment_markup(&icon, "svg"),
            "<div class='cpu'><img src='svg/cpu.svg' class='cpuIcon'>5%</div>"
        );
    }

    #[test]
    fn test_render_markup_slots_and_separators() {
        let mut tree = NodeTree::with_regions();
        let right = tree.region(Position::Right).unwrap();
        let a = tree.create_node(NodeKind::slot("cpu"));
        let sep = tree.create_node(NodeKind::Separator);
        tree.append_child(right, a);
        tree.append_child(right, sep);
        tree.set_content(a, &Fragment::new("cpu").text("<1>"));

        let markup = tree.render_markup();
        assert_eq!(markup["left"], "");
        assert_eq!(
            markup["right"],
            "<div id='slot-cpu' class='slot slot-cpu'><div class='cpu'>&lt;1&gt;</div></div><div class='spacer'></div>"
        );
    }
}
