//! HTML escaping shared by the renderer and [`Element`](crate::Element).

use std::borrow::Cow;

/// Escape text content for HTML output.
///
/// Escapes `&`, `<` and `>`. Quotes are left alone since they are only
/// significant inside attribute values.
///
/// # Examples
///
/// ```
/// use kbdext_markdown::escape_html;
///
/// assert_eq!(escape_html("Ctrl+<"), "Ctrl+&lt;");
/// assert_eq!(escape_html("plain"), "plain");
/// ```
pub fn escape_html(text: &str) -> Cow<'_, str> {
    escape(text, false)
}

/// Escape an attribute value for HTML output.
///
/// Same as [`escape_html`] plus `"`.
///
/// # Examples
///
/// ```
/// use kbdext_markdown::escape_attribute;
///
/// assert_eq!(escape_attribute(r#"a "b""#), "a &quot;b&quot;");
/// ```
pub fn escape_attribute(value: &str) -> Cow<'_, str> {
    escape(value, true)
}

fn escape(input: &str, quotes: bool) -> Cow<'_, str> {
    let needs_escape = |c: char| matches!(c, '&' | '<' | '>') || (quotes && c == '"');
    if !input.contains(needs_escape) {
        return Cow::Borrowed(input);
    }

    let mut out = String::with_capacity(input.len() + 8);
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' if quotes => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    Cow::Owned(out)
}
