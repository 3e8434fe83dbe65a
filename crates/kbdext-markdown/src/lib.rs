//! Markdown to HTML converter with pluggable inline patterns.
//!
//! This crate provides a [`Markdown`] converter built on pulldown-cmark that
//! extensions can hook into.
//!
//! # Architecture
//!
//! Conversion is split between the parser and a small set of extension points:
//! - [`InlinePattern`]s registered in a priority-ordered [`Registry`] rewrite
//!   the source of each block's inline content into [`Element`] nodes before
//!   pulldown-cmark sees it, leaving a placeholder per node
//! - pulldown-cmark parses block and inline structure of the rewritten source
//! - the renderer writes HTML and swaps placeholders for the nodes
//! - [`Extension`]s bundle the registration of one or more patterns
//!
//! Patterns take precedence over all built-in inline syntax: text between
//! their delimiters is never parsed as emphasis, code or HTML. Code blocks and
//! HTML blocks are never pattern-processed.
//!
//! # Example
//!
//! ```
//! use kbdext_markdown::{Element, InlinePattern, Markdown};
//! use regex::{Captures, Regex};
//!
//! struct Mark(Regex);
//!
//! impl InlinePattern for Mark {
//!     fn regex(&self) -> &Regex {
//!         &self.0
//!     }
//!
//!     fn handle_match(&self, captures: &Captures<'_>) -> Option<Element> {
//!         Some(Element::new("mark").with_text(&captures[1]))
//!     }
//! }
//!
//! let mut md = Markdown::new();
//! md.inline_patterns_mut()
//!     .register(Box::new(Mark(Regex::new(r"==(.+?)==").unwrap())), "mark", 100);
//!
//! assert_eq!(md.convert("A ==marked== word"), "<p>A <mark>marked</mark> word</p>");
//! ```

mod element;
mod extension;
mod inline;
mod markdown;
mod preprocess;
mod registry;
mod renderer;
mod util;

pub use element::Element;
pub use extension::Extension;
pub use inline::{InlinePattern, InlinePatterns, apply_patterns};
pub use markdown::{Markdown, markdown};
pub use registry::Registry;
pub use util::{escape_attribute, escape_html};
