//! HTML renderer over pulldown-cmark events.
//!
//! Inline pattern matches arrive as placeholders inside text, code spans,
//! inline HTML and link or image attributes. The renderer expands them from
//! the [`Stash`]: to element HTML in content, to plain text in attributes.

use std::fmt::Write;

use pulldown_cmark::{Alignment, CodeBlockKind, Event, HeadingLevel, Tag, TagEnd};

use crate::inline::{Context, Stash};
use crate::util::{escape_attribute, escape_html};

/// Table rendering state.
#[derive(Debug, Default)]
struct TableState {
    alignments: Vec<Alignment>,
    in_head: bool,
    cell_index: usize,
}

impl TableState {
    fn cell_tag(&self) -> &'static str {
        if self.in_head { "th" } else { "td" }
    }

    fn alignment_style(&self) -> &'static str {
        match self.alignments.get(self.cell_index) {
            Some(Alignment::Left) => r#" style="text-align: left""#,
            Some(Alignment::Center) => r#" style="text-align: center""#,
            Some(Alignment::Right) => r#" style="text-align: right""#,
            Some(Alignment::None) | None => "",
        }
    }
}

/// Image currently collecting its alt text.
#[derive(Debug)]
struct PendingImage {
    src: String,
    title: String,
    alt: String,
}

/// Renders a pulldown-cmark event stream to compact HTML.
pub(crate) struct HtmlRenderer<'s> {
    output: String,
    stash: &'s Stash,
    /// Inline text not yet written.
    pending_text: String,
    in_code_block: bool,
    images: Vec<PendingImage>,
    table: TableState,
}

impl<'s> HtmlRenderer<'s> {
    pub(crate) fn new(stash: &'s Stash, capacity: usize) -> Self {
        Self {
            output: String::with_capacity(capacity),
            stash,
            pending_text: String::new(),
            in_code_block: false,
            images: Vec::new(),
            table: TableState::default(),
        }
    }

    /// Render all events and return the HTML.
    pub(crate) fn render<'a, I>(mut self, events: I) -> String
    where
        I: Iterator<Item = Event<'a>>,
    {
        for event in events {
            self.process_event(event);
        }
        self.flush_text();
        self.output
    }

    fn process_event(&mut self, event: Event<'_>) {
        match event {
            Event::Text(text) => self.text(&text),
            Event::SoftBreak => self.soft_break(),
            other => {
                self.flush_text();
                match other {
                    Event::Start(tag) => self.start_tag(tag),
                    Event::End(tag) => self.end_tag(tag),
                    Event::Code(code) => self.inline_code(&code),
                    Event::Html(html) | Event::InlineHtml(html) => self.raw_html(&html),
                    Event::HardBreak => self.push_inline("<br>"),
                    Event::Rule => self.output.push_str("<hr>"),
                    Event::TaskListMarker(checked) => self.task_list_marker(checked),
                    Event::Text(_)
                    | Event::SoftBreak
                    | Event::FootnoteReference(_)
                    | Event::InlineMath(_)
                    | Event::DisplayMath(_) => {
                        // Not supported
                    }
                }
            }
        }
    }

    /// Write buffered inline text, expanding placeholders.
    fn flush_text(&mut self) {
        if self.pending_text.is_empty() {
            return;
        }
        let text = std::mem::take(&mut self.pending_text);
        self.stash.expand(&text, Context::Text, &mut self.output);
    }

    /// Escape an attribute value, expanding placeholders to their text.
    fn attribute(&self, value: &str) -> String {
        let mut out = String::with_capacity(value.len());
        self.stash.expand(value, Context::Attribute, &mut out);
        out
    }

    fn text(&mut self, text: &str) {
        if let Some(image) = self.images.last_mut() {
            image.alt.push_str(text);
        } else if self.in_code_block {
            self.output.push_str(&escape_html(text));
        } else {
            self.pending_text.push_str(text);
        }
    }

    fn soft_break(&mut self) {
        if let Some(image) = self.images.last_mut() {
            image.alt.push(' ');
        } else {
            self.pending_text.push('\n');
        }
    }

    fn inline_code(&mut self, code: &str) {
        if let Some(image) = self.images.last_mut() {
            image.alt.push_str(code);
        } else {
            self.output.push_str("<code>");
            self.stash.expand(code, Context::Text, &mut self.output);
            self.output.push_str("</code>");
        }
    }

    fn raw_html(&mut self, html: &str) {
        if self.images.is_empty() {
            self.stash.expand(html, Context::Raw, &mut self.output);
        }
    }

    /// Push inline markup unless an image is collecting plain alt text.
    fn push_inline(&mut self, content: &str) {
        if self.images.is_empty() {
            self.output.push_str(content);
        }
    }

    fn task_list_marker(&mut self, checked: bool) {
        if checked {
            self.output
                .push_str(r#"<input type="checkbox" disabled checked> "#);
        } else {
            self.output.push_str(r#"<input type="checkbox" disabled> "#);
        }
    }

    fn start_tag(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Paragraph => self.output.push_str("<p>"),
            Tag::Heading { level, id, .. } => {
                let level = heading_level_to_num(level);
                match id {
                    Some(id) => {
                        let id = self.attribute(&id);
                        write!(self.output, r#"<h{level} id="{id}">"#).unwrap();
                    }
                    None => write!(self.output, "<h{level}>").unwrap(),
                }
            }
            Tag::BlockQuote(_) => self.output.push_str("<blockquote>"),
            Tag::CodeBlock(kind) => {
                self.in_code_block = true;
                match kind {
                    CodeBlockKind::Fenced(info) => {
                        let lang = info.split_whitespace().next().unwrap_or_default();
                        if lang.is_empty() {
                            self.output.push_str("<pre><code>");
                        } else {
                            write!(
                                self.output,
                                r#"<pre><code class="language-{}">"#,
                                escape_attribute(lang)
                            )
                            .unwrap();
                        }
                    }
                    CodeBlockKind::Indented => self.output.push_str("<pre><code>"),
                }
            }
            Tag::List(Some(1)) => self.output.push_str("<ol>"),
            Tag::List(Some(start)) => write!(self.output, r#"<ol start="{start}">"#).unwrap(),
            Tag::List(None) => self.output.push_str("<ul>"),
            Tag::Item => self.output.push_str("<li>"),
            Tag::DefinitionList => self.output.push_str("<dl>"),
            Tag::DefinitionListTitle => self.output.push_str("<dt>"),
            Tag::DefinitionListDefinition => self.output.push_str("<dd>"),
            Tag::Table(alignments) => {
                self.table = TableState {
                    alignments,
                    ..TableState::default()
                };
                self.output.push_str("<table>");
            }
            Tag::TableHead => {
                self.table.in_head = true;
                self.table.cell_index = 0;
                self.output.push_str("<thead><tr>");
            }
            Tag::TableRow => {
                self.table.cell_index = 0;
                self.output.push_str("<tr>");
            }
            Tag::TableCell => {
                let tag = self.table.cell_tag();
                let align = self.table.alignment_style();
                write!(self.output, "<{tag}{align}>").unwrap();
            }
            Tag::Emphasis => self.push_inline("<em>"),
            Tag::Strong => self.push_inline("<strong>"),
            Tag::Strikethrough => self.push_inline("<del>"),
            Tag::Superscript => self.push_inline("<sup>"),
            Tag::Subscript => self.push_inline("<sub>"),
            Tag::Link {
                dest_url, title, ..
            } => {
                let mut link = format!(r#"<a href="{}""#, self.attribute(&dest_url));
                if !title.is_empty() {
                    write!(link, r#" title="{}""#, self.attribute(&title)).unwrap();
                }
                link.push('>');
                self.push_inline(&link);
            }
            Tag::Image {
                dest_url, title, ..
            } => {
                self.images.push(PendingImage {
                    src: dest_url.into_string(),
                    title: title.into_string(),
                    alt: String::new(),
                });
            }
            Tag::FootnoteDefinition(_) | Tag::HtmlBlock | Tag::MetadataBlock(_) => {}
        }
    }

    fn end_tag(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Paragraph => self.output.push_str("</p>"),
            TagEnd::Heading(level) => {
                write!(self.output, "</h{}>", heading_level_to_num(level)).unwrap();
            }
            TagEnd::BlockQuote(_) => self.output.push_str("</blockquote>"),
            TagEnd::CodeBlock => {
                self.in_code_block = false;
                self.output.push_str("</code></pre>");
            }
            TagEnd::List(ordered) => {
                self.output.push_str(if ordered { "</ol>" } else { "</ul>" });
            }
            TagEnd::Item => self.output.push_str("</li>"),
            TagEnd::DefinitionList => self.output.push_str("</dl>"),
            TagEnd::DefinitionListTitle => self.output.push_str("</dt>"),
            TagEnd::DefinitionListDefinition => self.output.push_str("</dd>"),
            TagEnd::Table => self.output.push_str("</tbody></table>"),
            TagEnd::TableHead => {
                self.table.in_head = false;
                self.output.push_str("</tr></thead><tbody>");
            }
            TagEnd::TableRow => self.output.push_str("</tr>"),
            TagEnd::TableCell => {
                let tag = self.table.cell_tag();
                write!(self.output, "</{tag}>").unwrap();
                self.table.cell_index += 1;
            }
            TagEnd::Emphasis => self.push_inline("</em>"),
            TagEnd::Strong => self.push_inline("</strong>"),
            TagEnd::Strikethrough => self.push_inline("</del>"),
            TagEnd::Superscript => self.push_inline("</sup>"),
            TagEnd::Subscript => self.push_inline("</sub>"),
            TagEnd::Link => self.push_inline("</a>"),
            TagEnd::Image => {
                if let Some(image) = self.images.pop() {
                    self.image(&image);
                }
            }
            TagEnd::FootnoteDefinition | TagEnd::HtmlBlock | TagEnd::MetadataBlock(_) => {}
        }
    }

    fn image(&mut self, image: &PendingImage) {
        let mut html = format!(r#"<img src="{}""#, self.attribute(&image.src));
        if !image.title.is_empty() {
            write!(html, r#" title="{}""#, self.attribute(&image.title)).unwrap();
        }
        write!(html, r#" alt="{}">"#, self.attribute(&image.alt)).unwrap();

        // Nested images contribute only their alt text to the outer one.
        match self.images.last_mut() {
            Some(outer) => outer.alt.push_str(&image.alt),
            None => self.output.push_str(&html),
        }
    }
}

/// Convert heading level enum to number (1-6).
fn heading_level_to_num(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::Element;
    use pretty_assertions::assert_eq;
    use pulldown_cmark::{Options, Parser};

    fn render_html(markdown: &str) -> String {
        let stash = Stash::default();
        let parser = Parser::new_ext(markdown, Options::ENABLE_TABLES);
        HtmlRenderer::new(&stash, markdown.len()).render(parser)
    }

    #[test]
    fn test_html_basic_paragraph() {
        assert_eq!(render_html("Hello, world!"), "<p>Hello, world!</p>");
    }

    #[test]
    fn test_html_paragraphs_are_not_separated() {
        assert_eq!(render_html("One\n\nTwo"), "<p>One</p><p>Two</p>");
    }

    #[test]
    fn test_html_soft_break_kept() {
        assert_eq!(render_html("One\nTwo"), "<p>One\nTwo</p>");
    }

    #[test]
    fn test_html_heading() {
        assert_eq!(render_html("## Section"), "<h2>Section</h2>");
    }

    #[test]
    fn test_html_inline_formatting() {
        assert_eq!(
            render_html("*a* **b** `c<d`"),
            "<p><em>a</em> <strong>b</strong> <code>c&lt;d</code></p>"
        );
    }

    #[test]
    fn test_html_code_block_escaped() {
        assert_eq!(
            render_html("```rust\nlet x = a < b;\n```"),
            r#"<pre><code class="language-rust">let x = a &lt; b;
</code></pre>"#
        );
    }

    #[test]
    fn test_html_lists() {
        assert_eq!(render_html("- a\n- b"), "<ul><li>a</li><li>b</li></ul>");
        assert_eq!(
            render_html("3. a\n4. b"),
            r#"<ol start="3"><li>a</li><li>b</li></ol>"#
        );
    }

    #[test]
    fn test_html_link_and_image() {
        assert_eq!(
            render_html(r#"[docs](https://example.com "Docs") ![a *b*](i.png)"#),
            r#"<p><a href="https://example.com" title="Docs">docs</a> <img src="i.png" alt="a b"></p>"#
        );
    }

    #[test]
    fn test_html_table_alignment() {
        let html = render_html("| a | b |\n|:--|--:|\n| 1 | 2 |");
        assert_eq!(
            html,
            r#"<table><thead><tr><th style="text-align: left">a</th><th style="text-align: right">b</th></tr></thead><tbody><tr><td style="text-align: left">1</td><td style="text-align: right">2</td></tr></tbody></table>"#
        );
    }

    #[test]
    fn test_html_blockquote() {
        assert_eq!(render_html("> quoted"), "<blockquote><p>quoted</p></blockquote>");
    }

    #[test]
    fn test_html_entities_escaped() {
        assert_eq!(render_html("a &amp; b < c"), "<p>a &amp; b &lt; c</p>");
    }

    #[test]
    fn test_html_expands_placeholders() {
        let mut stash = Stash::default();
        let mut placeholder = String::new();
        stash.push(Element::new("kbd").with_text("<k>"), &mut placeholder);

        let source = format!("{placeholder} `{placeholder}` [x](u \"{placeholder}\")");
        let html = HtmlRenderer::new(&stash, source.len()).render(Parser::new(&source));
        assert_eq!(
            html,
            r#"<p><kbd>&lt;k&gt;</kbd> <code><kbd>&lt;k&gt;</kbd></code> <a href="u" title="&lt;k&gt;">x</a></p>"#
        );
    }
}
