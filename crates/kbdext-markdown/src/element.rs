//! Markup nodes produced by inline patterns.

use std::fmt::Write;

use crate::util::{escape_attribute, escape_html};

/// A single inline markup node: tag, ordered attributes and opaque text.
///
/// The text is never parsed again for markup. It is escaped on output,
/// exactly like any other text node in the document.
///
/// # Example
///
/// ```
/// use kbdext_markdown::Element;
///
/// let element = Element::new("kbd")
///     .with_attribute("class", "key")
///     .with_text("Ctrl");
///
/// assert_eq!(element.to_html(), r#"<kbd class="key">Ctrl</kbd>"#);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Element {
    tag: String,
    attributes: Vec<(String, String)>,
    text: String,
}

impl Element {
    /// Create an empty element with the given tag name.
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attributes: Vec::new(),
            text: String::new(),
        }
    }

    /// Set an attribute, returning the element.
    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(name, value);
        self
    }

    /// Set the text content, returning the element.
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Set an attribute. An existing attribute with the same name is overwritten
    /// in place, keeping its original position.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.attributes.iter_mut().find(|(n, _)| *n == name) {
            Some((_, existing)) => *existing = value,
            None => self.attributes.push((name, value)),
        }
    }

    /// Get an attribute value.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Tag name.
    #[must_use]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Text content.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Attributes in insertion order.
    pub fn attributes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    /// Serialize the element as HTML into `out`.
    pub fn write_html(&self, out: &mut String) {
        write!(out, "<{}", self.tag).unwrap();
        for (name, value) in &self.attributes {
            write!(out, r#" {name}="{}""#, escape_attribute(value)).unwrap();
        }
        write!(out, ">{}</{}>", escape_html(&self.text), self.tag).unwrap();
    }

    /// Serialize the element as an HTML string.
    #[must_use]
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }
}
