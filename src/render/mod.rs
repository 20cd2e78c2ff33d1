//! Render targets: an in-memory node tree with text and markup output

mod markup;
mod text;
mod tree;

pub use markup::{escape_html, fragment_markup, ICON_DIR};
pub use text::fragment_text;
pub use tree::NodeTree;
