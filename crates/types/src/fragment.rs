//! Display fragments produced by widget formatters.

use serde::{Deserialize, Serialize};

/// One piece of a fragment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "part", rename_all = "snake_case")]
pub enum Part {
    /// An icon asset, referenced by name
    Icon { name: String, classes: Vec<String> },
    /// A font glyph, referenced by symbol name
    Symbol { name: String, classes: Vec<String> },
    /// Plain text
    Text { text: String },
}

/// Rendered content of a single slot
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Fragment {
    /// Style class of the fragment container
    pub class: String,
    pub parts: Vec<Part>,
}

impl Fragment {
    pub fn new(class: impl Into<String>) -> Self {
        Self {
            class: class.into(),
            parts: Vec::new(),
        }
    }

    /// Fragment shown when a widget's input cannot be interpreted
    pub fn placeholder(class: impl Into<String>) -> Self {
        Self::new(class).text("?")
    }

    pub fn icon<I, S>(mut self, name: impl Into<String>, classes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.parts.push(Part::Icon {
            name: name.into(),
            classes: classes.into_iter().map(Into::into).collect(),
        });
        self
    }

    pub fn symbol<I, S>(mut self, name: impl Into<String>, classes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.parts.push(Part::Symbol {
            name: name.into(),
            classes: classes.into_iter().map(Into::into).collect(),
        });
        self
    }

    /// Append text; empty strings are skipped
    pub fn text(mut self, text: impl Into<String>) -> Self {
        let text = text.into();
        if !text.is_empty() {
            self.parts.push(Part::Text { text });
        }
        self
    }

    /// Concatenated text parts, ignoring icons and symbols
    pub fn plain_text(&self) -> String {
        self.parts
            .iter()
            .filter_map(|part| match part {
                Part::Text { text } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Names of all icons in the fragment
    pub fn icon_names(&self) -> Vec<&str> {
        self.parts
            .iter()
            .filter_map(|part| match part {
                Part::Icon { name, .. } => Some(name.as_str()),
                _ => None,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_skips_empty_text() {
        let fragment = Fragment::new("volume")
            .icon("volume_off", ["volumeIcon", "icon"])
            .text("");
        assert_eq!(fragment.parts.len(), 1);
        assert_eq!(fragment.icon_names(), vec!["volume_off"]);
        assert_eq!(fragment.plain_text(), "");
    }

    #[test]
    fn test_placeholder() {
        let fragment = Fragment::placeholder("activeWindow");
        assert_eq!(fragment.class, "activeWindow");
        assert_eq!(fragment.plain_text(), "?");
    }
}
