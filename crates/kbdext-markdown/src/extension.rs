//! Extension trait.

use crate::markdown::Markdown;

/// A bundle of registrations applied to a [`Markdown`] converter.
///
/// Extensions are configured when they are constructed and only read their
/// configuration afterwards. Attaching an extension registers its inline
/// patterns; registry names are unique, so attaching the same extension twice
/// leaves the converter unchanged.
///
/// # Example
///
/// ```
/// use kbdext_markdown::{Element, Extension, InlinePattern, Markdown};
/// use regex::{Captures, Regex};
///
/// struct Highlight(Regex);
///
/// impl InlinePattern for Highlight {
///     fn regex(&self) -> &Regex {
///         &self.0
///     }
///
///     fn handle_match(&self, captures: &Captures<'_>) -> Option<Element> {
///         Some(Element::new("mark").with_text(&captures[1]))
///     }
/// }
///
/// struct HighlightExtension;
///
/// impl Extension for HighlightExtension {
///     fn extend(&self, md: &mut Markdown) {
///         let pattern = Highlight(Regex::new(r"==(.+?)==").unwrap());
///         md.inline_patterns_mut().register(Box::new(pattern), "highlight", 150);
///     }
/// }
///
/// let md = Markdown::new().with_extension(&HighlightExtension);
/// assert_eq!(md.convert("==hi=="), "<p><mark>hi</mark></p>");
/// ```
pub trait Extension {
    /// Attach this extension to `md`.
    fn extend(&self, md: &mut Markdown);
}
