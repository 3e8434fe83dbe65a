//! Markdown converter.

use pulldown_cmark::{Options, Parser};

use crate::extension::Extension;
use crate::inline::{InlinePatterns, Stash};
use crate::preprocess::preprocess;
use crate::renderer::HtmlRenderer;

/// Markdown to HTML converter with an inline pattern registry.
///
/// A converter is configured once (GFM flag, extensions) and then only read:
/// [`convert`](Self::convert) takes `&self`, so one converter can serve many
/// documents, including from several threads.
///
/// # Example
///
/// ```
/// use kbdext_markdown::Markdown;
///
/// let md = Markdown::new();
/// assert_eq!(md.convert("Hello *world*"), "<p>Hello <em>world</em></p>");
/// ```
pub struct Markdown {
    inline_patterns: InlinePatterns,
    gfm: bool,
}

impl Default for Markdown {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Markdown {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Markdown")
            .field("inline_patterns", &self.inline_patterns.names().collect::<Vec<_>>())
            .field("gfm", &self.gfm)
            .finish()
    }
}

impl Markdown {
    /// Create a converter with GFM enabled and no inline patterns.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inline_patterns: InlinePatterns::new(),
            gfm: true,
        }
    }

    /// Enable or disable GitHub Flavored Markdown features.
    ///
    /// GFM is enabled by default. When enabled, the parser supports:
    /// - Tables
    /// - Strikethrough (`~~text~~`)
    /// - Task lists (`- [ ] item`)
    #[must_use]
    pub fn with_gfm(mut self, enabled: bool) -> Self {
        self.gfm = enabled;
        self
    }

    /// Attach an extension, returning the converter.
    #[must_use]
    pub fn with_extension<E: Extension + ?Sized>(mut self, extension: &E) -> Self {
        self.register_extension(extension);
        self
    }

    /// Attach an extension.
    pub fn register_extension<E: Extension + ?Sized>(&mut self, extension: &E) {
        extension.extend(self);
    }

    /// Registered inline patterns.
    #[must_use]
    pub fn inline_patterns(&self) -> &InlinePatterns {
        &self.inline_patterns
    }

    /// Mutable access to the inline pattern registry.
    pub fn inline_patterns_mut(&mut self) -> &mut InlinePatterns {
        &mut self.inline_patterns
    }

    /// Get parser options based on GFM configuration.
    #[must_use]
    pub fn parser_options(&self) -> Options {
        if self.gfm {
            Options::ENABLE_TABLES
                | Options::ENABLE_STRIKETHROUGH
                | Options::ENABLE_TASKLISTS
                | Options::ENABLE_GFM
        } else {
            Options::empty()
        }
    }

    /// Convert markdown source to HTML.
    ///
    /// Inline patterns are applied to the source before pulldown-cmark parses
    /// it, so they take precedence over every built-in inline syntax. Code
    /// blocks and HTML blocks are left alone.
    #[must_use]
    pub fn convert(&self, source: &str) -> String {
        let options = self.parser_options();
        let mut stash = Stash::default();
        let source = preprocess(source, options, &self.inline_patterns, &mut stash);
        let parser = Parser::new_ext(&source, options);
        HtmlRenderer::new(&stash, source.len() + source.len() / 4).render(parser)
    }
}

/// Convert `source` with a fresh converter and the given extensions.
///
/// # Example
///
/// ```
/// use kbdext_markdown::markdown;
///
/// assert_eq!(markdown("# Title", &[]), "<h1>Title</h1>");
/// ```
#[must_use]
pub fn markdown(source: &str, extensions: &[&dyn Extension]) -> String {
    let mut md = Markdown::new();
    for extension in extensions {
        md.register_extension(*extension);
    }
    md.convert(source)
}
