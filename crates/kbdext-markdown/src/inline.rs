//! Inline pattern trait and the text rewriting pass that applies it.
//!
//! Inline patterns match spans inside the inline content of a block and turn
//! each match into a single [`Element`]. The converter applies them to the raw
//! source before parsing and keeps the elements in a [`Stash`] until the HTML
//! is written.

use std::fmt::Write;

use regex::{Captures, Regex};

use crate::element::Element;
use crate::registry::Registry;
use crate::util::{escape_attribute, escape_html};

/// Handler for a span of inline text matched by a regular expression.
///
/// The converter runs every registered pattern over the source text of each
/// block's inline content, highest priority first, before any Markdown inline
/// syntax is interpreted. The returned [`Element`] replaces the whole match,
/// so emphasis markers, backticks or backslashes inside it stay literal.
///
/// # Thread Safety
///
/// Patterns are `Send + Sync` so a configured [`Markdown`](crate::Markdown)
/// can be shared between threads. `handle_match` takes `&self`; patterns hold
/// configuration, not per-document state.
///
/// # Example
///
/// ```
/// use kbdext_markdown::{Element, InlinePattern};
/// use regex::{Captures, Regex};
///
/// struct Abbr(Regex);
///
/// impl InlinePattern for Abbr {
///     fn regex(&self) -> &Regex {
///         &self.0
///     }
///
///     fn handle_match(&self, captures: &Captures<'_>) -> Option<Element> {
///         Some(Element::new("abbr").with_text(&captures[1]))
///     }
/// }
/// ```
pub trait InlinePattern: Send + Sync {
    /// Expression matched against inline text.
    fn regex(&self) -> &Regex;

    /// Build the replacement node for a match.
    ///
    /// Returning `None` declines the match: the matched text stays in place
    /// and is left for lower priority patterns.
    fn handle_match(&self, captures: &Captures<'_>) -> Option<Element>;
}

/// Registry of inline patterns, as held by [`Markdown`](crate::Markdown).
pub type InlinePatterns = Registry<Box<dyn InlinePattern>>;

/// Start of a placeholder standing in for a stashed element.
const PLACEHOLDER_START: char = '\u{2}';
/// End of a placeholder.
const PLACEHOLDER_END: char = '\u{3}';

/// Piece of an inline run: text still open to matching, or a finished node.
#[derive(Debug)]
enum Segment {
    Text(String),
    Node(Element),
}

/// Where expanded text ends up in the output.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Context {
    /// Element content: text is escaped, elements are serialized.
    Text,
    /// Attribute value: elements contribute only their text.
    Attribute,
    /// Raw HTML: text is copied as is, elements are serialized.
    Raw,
}

impl Context {
    fn write_text(self, text: &str, out: &mut String) {
        match self {
            Self::Text => out.push_str(&escape_html(text)),
            Self::Attribute => out.push_str(&escape_attribute(text)),
            Self::Raw => out.push_str(text),
        }
    }

    fn write_element(self, element: &Element, out: &mut String) {
        match self {
            Self::Text | Self::Raw => element.write_html(out),
            Self::Attribute => out.push_str(&escape_attribute(element.text())),
        }
    }
}

/// Elements produced before parsing, referenced from the source by placeholder.
///
/// A placeholder is `\u{2}<index>\u{3}`. pulldown-cmark treats it as plain
/// text, so it survives parsing wherever the match was: paragraphs, emphasis,
/// code spans, link titles.
#[derive(Debug, Default)]
pub(crate) struct Stash {
    elements: Vec<Element>,
}

impl Stash {
    /// Store `element` and write its placeholder to `out`.
    pub(crate) fn push(&mut self, element: Element, out: &mut String) {
        write!(out, "{PLACEHOLDER_START}{}{PLACEHOLDER_END}", self.elements.len()).unwrap();
        self.elements.push(element);
    }

    pub(crate) fn len(&self) -> usize {
        self.elements.len()
    }

    /// Write `text` to `out`, replacing placeholders with their elements.
    ///
    /// Anything that looks like a placeholder but names no stashed element is
    /// kept as text.
    pub(crate) fn expand(&self, text: &str, context: Context, out: &mut String) {
        let mut rest = text;
        while let Some(start) = rest.find(PLACEHOLDER_START) {
            let after = &rest[start + PLACEHOLDER_START.len_utf8()..];
            let found = after.find(PLACEHOLDER_END).and_then(|end| {
                let index: usize = after[..end].parse().ok()?;
                Some((self.elements.get(index)?, end))
            });
            match found {
                Some((element, end)) => {
                    context.write_text(&rest[..start], out);
                    context.write_element(element, out);
                    rest = &after[end + PLACEHOLDER_END.len_utf8()..];
                }
                None => {
                    context.write_text(&rest[..start + PLACEHOLDER_START.len_utf8()], out);
                    rest = after;
                }
            }
        }
        context.write_text(rest, out);
    }
}

/// Rewrite a run of inline text with every pattern in `patterns`, returning HTML.
///
/// Patterns run in registry order. Each one scans only the text segments left
/// unmatched by earlier patterns and replaces leftmost, non-overlapping
/// matches. Nodes produced by earlier patterns are opaque to later ones, so a
/// node's text is never parsed again. Unmatched text is HTML-escaped.
///
/// # Example
///
/// ```
/// use kbdext_markdown::{InlinePatterns, apply_patterns};
///
/// let patterns = InlinePatterns::new();
/// assert_eq!(apply_patterns("a < b", &patterns), "a &lt; b");
/// ```
pub fn apply_patterns(text: &str, patterns: &InlinePatterns) -> String {
    let mut out = String::with_capacity(text.len());
    for segment in match_segments(text, patterns) {
        match segment {
            Segment::Text(text) => out.push_str(&escape_html(&text)),
            Segment::Node(element) => element.write_html(&mut out),
        }
    }
    out
}

/// Same matching as [`apply_patterns`], but leaves unmatched text as written
/// and stashes each node behind a placeholder.
pub(crate) fn substitute_patterns(
    text: &str,
    patterns: &InlinePatterns,
    stash: &mut Stash,
) -> String {
    let mut out = String::with_capacity(text.len());
    for segment in match_segments(text, patterns) {
        match segment {
            Segment::Text(text) => out.push_str(&text),
            Segment::Node(element) => stash.push(element, &mut out),
        }
    }
    out
}

fn match_segments(text: &str, patterns: &InlinePatterns) -> Vec<Segment> {
    let mut segments = vec![Segment::Text(text.to_owned())];

    for pattern in patterns.iter() {
        segments = segments
            .into_iter()
            .flat_map(|segment| match segment {
                Segment::Text(text) => split_matches(&**pattern, text),
                node @ Segment::Node(_) => vec![node],
            })
            .collect();
    }
    segments
}

/// Split `text` around the matches of a single pattern.
fn split_matches(pattern: &dyn InlinePattern, text: String) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut last = 0;

    for captures in pattern.regex().captures_iter(&text) {
        let Some(whole) = captures.get(0) else {
            continue;
        };
        let Some(element) = pattern.handle_match(&captures) else {
            tracing::trace!(span = whole.as_str(), "Inline pattern declined match");
            continue;
        };
        if whole.start() > last {
            segments.push(Segment::Text(text[last..whole.start()].to_owned()));
        }
        segments.push(Segment::Node(element));
        last = whole.end();
    }

    if last == 0 && segments.is_empty() {
        return vec![Segment::Text(text)];
    }
    if last < text.len() {
        segments.push(Segment::Text(text[last..].to_owned()));
    }
    segments
}
