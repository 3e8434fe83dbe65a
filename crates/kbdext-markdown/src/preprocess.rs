//! Source rewriting ahead of pulldown-cmark.
//!
//! Inline patterns run over the markdown source of each block's inline
//! content before the document is parsed for rendering, so delimiters and the
//! text between them are matched exactly as written. Every match is replaced
//! by a [`Stash`] placeholder, which pulldown-cmark passes through as plain
//! text. Code blocks, HTML blocks and the gaps between blocks are copied
//! unchanged.
//!
//! A first parse only locates the inline content. Matching is confined to one
//! block at a time: a span never crosses a paragraph, heading or table cell
//! boundary.

use std::borrow::Cow;
use std::ops::Range;

use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd};

use crate::inline::{InlinePatterns, Stash, substitute_patterns};

/// Apply `patterns` to the inline content of `source`, stashing the elements.
///
/// Returns the source unchanged when no pattern is registered.
pub(crate) fn preprocess<'a>(
    source: &'a str,
    options: Options,
    patterns: &InlinePatterns,
    stash: &mut Stash,
) -> Cow<'a, str> {
    if patterns.is_empty() {
        return Cow::Borrowed(source);
    }

    let regions = inline_regions(source, options);
    let mut output = String::with_capacity(source.len());
    let mut last = 0;

    for region in &regions {
        if region.start < last {
            continue;
        }
        output.push_str(&source[last..region.start]);
        output.push_str(&substitute_patterns(&source[region.clone()], patterns, stash));
        last = region.end;
    }
    output.push_str(&source[last..]);

    tracing::trace!(
        regions = regions.len(),
        elements = stash.len(),
        "Applied inline patterns"
    );
    Cow::Owned(output)
}

/// Byte ranges of inline content, one per leaf block, in document order.
///
/// A range runs from the first to the last inline event of a block, so it
/// covers emphasis markers, code spans and inline HTML between them.
fn inline_regions(source: &str, options: Options) -> Vec<Range<usize>> {
    let mut regions = Vec::new();
    let mut current: Option<Range<usize>> = None;
    let mut in_code_block = false;

    for (event, range) in Parser::new_ext(source, options).into_offset_iter() {
        let inline = match &event {
            Event::Start(Tag::CodeBlock(_)) => {
                in_code_block = true;
                false
            }
            Event::End(TagEnd::CodeBlock) => {
                in_code_block = false;
                false
            }
            Event::Text(_) => !in_code_block,
            Event::Code(_)
            | Event::InlineHtml(_)
            | Event::InlineMath(_)
            | Event::FootnoteReference(_)
            | Event::SoftBreak
            | Event::HardBreak => true,
            Event::Start(tag) => is_inline_tag(tag),
            Event::End(tag) => is_inline_tag_end(*tag),
            Event::Html(_) | Event::DisplayMath(_) | Event::Rule | Event::TaskListMarker(_) => {
                false
            }
        };

        if inline {
            current = Some(match current.take() {
                Some(run) => run.start.min(range.start)..run.end.max(range.end),
                None => range,
            });
        } else if let Some(run) = current.take() {
            regions.push(run);
        }
    }
    regions.extend(current);
    regions
}

fn is_inline_tag(tag: &Tag<'_>) -> bool {
    matches!(
        tag,
        Tag::Emphasis
            | Tag::Strong
            | Tag::Strikethrough
            | Tag::Superscript
            | Tag::Subscript
            | Tag::Link { .. }
            | Tag::Image { .. }
    )
}

fn is_inline_tag_end(tag: TagEnd) -> bool {
    matches!(
        tag,
        TagEnd::Emphasis
            | TagEnd::Strong
            | TagEnd::Strikethrough
            | TagEnd::Superscript
            | TagEnd::Subscript
            | TagEnd::Link
            | TagEnd::Image
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Element, InlinePattern};
    use pretty_assertions::assert_eq;
    use regex::{Captures, Regex};

    struct Kbd(Regex);

    impl InlinePattern for Kbd {
        fn regex(&self) -> &Regex {
            &self.0
        }

        fn handle_match(&self, captures: &Captures<'_>) -> Option<Element> {
            Some(Element::new("kbd").with_text(&captures[2]))
        }
    }

    fn kbd_patterns() -> InlinePatterns {
        let mut patterns = InlinePatterns::new();
        patterns.register(
            Box::new(Kbd(Regex::new(r"(?s)(\[\[)(.*?)(\]\])").unwrap())),
            "kbd",
            201,
        );
        patterns
    }

    fn regions(source: &str) -> Vec<&str> {
        inline_regions(source, Options::ENABLE_TABLES)
            .into_iter()
            .map(|range| &source[range])
            .collect()
    }

    #[test]
    fn test_regions_cover_inline_markup() {
        assert_eq!(regions("a *b* `c`\nd"), ["a *b* `c`\nd"]);
    }

    #[test]
    fn test_regions_split_per_block() {
        assert_eq!(regions("# One\n\ntwo\n\n- three"), ["One", "two", "three"]);
    }

    #[test]
    fn test_regions_skip_code_blocks() {
        assert_eq!(regions("a\n\n```\n[[x]]\n```\n\n    [[y]]\n\nb"), ["a", "b"]);
    }

    #[test]
    fn test_regions_skip_html_blocks() {
        assert_eq!(regions("<div>\n[[x]]\n</div>\n\nb"), ["b"]);
    }

    #[test]
    fn test_regions_split_table_cells() {
        assert_eq!(regions("| a | b |\n|---|---|\n| c | d |"), ["a", "b", "c", "d"]);
    }

    #[test]
    fn test_preprocess_without_patterns_borrows() {
        let mut stash = Stash::default();
        let source = "[[a]]";
        let output = preprocess(source, Options::empty(), &InlinePatterns::new(), &mut stash);

        assert!(matches!(output, Cow::Borrowed(_)));
        assert_eq!(stash.len(), 0);
    }

    #[test]
    fn test_preprocess_replaces_matches_with_placeholders() {
        let mut stash = Stash::default();
        let source = "[[a *b*]]\n\n```\n[[c]]\n```\n";
        let output = preprocess(source, Options::empty(), &kbd_patterns(), &mut stash);

        assert_eq!(output, "\u{2}0\u{3}\n\n```\n[[c]]\n```\n");
        assert_eq!(stash.len(), 1);
    }

    #[test]
    fn test_preprocess_does_not_match_across_blocks() {
        let mut stash = Stash::default();
        let source = "[[a\n\nb]]";
        let output = preprocess(source, Options::empty(), &kbd_patterns(), &mut stash);

        assert_eq!(output, source);
    }
}
