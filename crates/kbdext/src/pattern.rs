//! Delimiter styles, the `<kbd>` inline pattern and its element builder.

use std::sync::LazyLock;

use kbdext_markdown::{Element, InlinePattern};
use regex::{Captures, Regex};

/// `[[...]]`; `(?s)` lets a span cross soft line breaks.
static KBD_BRACKETS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)(\[\[)(.*?)(\]\])").unwrap());

/// `{{...}}`
static KBD_BRACES_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)(\{\{)(.*?)(\}\})").unwrap());

/// `((...))`
static KBD_PARENS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)(\(\()(.*?)(\)\))").unwrap());

/// Capture group holding the text between the delimiters.
const INNER_GROUP: usize = 2;

/// One of the three delimiter pairs recognized as keyboard-key markup.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DelimiterStyle {
    /// `[[Enter]]`
    Brackets,
    /// `{{Search}}`
    Braces,
    /// `((File))`
    Parens,
}

impl DelimiterStyle {
    /// All styles, in registration order.
    pub const ALL: [Self; 3] = [Self::Brackets, Self::Braces, Self::Parens];

    /// Opening delimiter.
    #[must_use]
    pub fn open(self) -> &'static str {
        match self {
            Self::Brackets => "[[",
            Self::Braces => "{{",
            Self::Parens => "((",
        }
    }

    /// Closing delimiter.
    #[must_use]
    pub fn close(self) -> &'static str {
        match self {
            Self::Brackets => "]]",
            Self::Braces => "}}",
            Self::Parens => "))",
        }
    }

    /// Name the pattern is registered under.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Brackets => "kbd-brackets",
            Self::Braces => "kbd-braces",
            Self::Parens => "kbd-parens",
        }
    }

    /// Registration priority. Higher values are evaluated first.
    #[must_use]
    pub fn priority(self) -> u32 {
        match self {
            Self::Brackets => 201,
            Self::Braces => 202,
            Self::Parens => 203,
        }
    }

    /// Compiled expression: opening delimiter, lazily matched inner text,
    /// closing delimiter.
    #[must_use]
    pub fn regex(self) -> &'static Regex {
        match self {
            Self::Brackets => &KBD_BRACKETS_RE,
            Self::Braces => &KBD_BRACES_RE,
            Self::Parens => &KBD_PARENS_RE,
        }
    }

    /// Word used in this style's option keys (`enable_<word>`, `<word>_css`).
    pub(crate) fn option_prefix(self) -> &'static str {
        match self {
            Self::Brackets => "brackets",
            Self::Braces => "braces",
            Self::Parens => "parens",
        }
    }
}

/// Build a `<kbd>` element.
///
/// The text is used verbatim. A `class` attribute is set only for a
/// non-empty `css`.
///
/// # Example
///
/// ```
/// use kbdext::kbd_element;
///
/// assert_eq!(kbd_element("Enter", None).to_html(), "<kbd>Enter</kbd>");
/// assert_eq!(
///     kbd_element("Search", Some("button")).to_html(),
///     r#"<kbd class="button">Search</kbd>"#
/// );
/// ```
#[must_use]
pub fn kbd_element(text: &str, css: Option<&str>) -> Element {
    let element = Element::new("kbd").with_text(text);
    match css {
        Some(css) if !css.is_empty() => element.with_attribute("class", css),
        _ => element,
    }
}

/// Inline pattern turning one delimiter style into `<kbd>` elements.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KbdPattern {
    style: DelimiterStyle,
    css: Option<String>,
}

impl KbdPattern {
    /// Create a pattern for `style`. An empty `css` means no class.
    #[must_use]
    pub fn new(style: DelimiterStyle, css: Option<&str>) -> Self {
        Self {
            style,
            css: css.filter(|c| !c.is_empty()).map(ToOwned::to_owned),
        }
    }

    /// Delimiter style matched by this pattern.
    #[must_use]
    pub fn style(&self) -> DelimiterStyle {
        self.style
    }

    /// CSS class attached to produced elements.
    #[must_use]
    pub fn css(&self) -> Option<&str> {
        self.css.as_deref()
    }
}

impl InlinePattern for KbdPattern {
    fn regex(&self) -> &Regex {
        self.style.regex()
    }

    fn handle_match(&self, captures: &Captures<'_>) -> Option<Element> {
        let inner = captures.get(INNER_GROUP)?;
        Some(kbd_element(inner.as_str(), self.css()))
    }
}
