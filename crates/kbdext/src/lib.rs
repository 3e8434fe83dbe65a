//! Markdown syntax for the HTML `<kbd>` element.
//!
//! Adds three inline delimiter styles to a [`kbdext_markdown::Markdown`]
//! converter, each rewritten to a `<kbd>` element with an optional CSS class:
//!
//! | Style    | Syntax         | Enabled by default |
//! |----------|----------------|--------------------|
//! | Brackets | `[[Enter]]`    | yes                |
//! | Braces   | `{{Search}}`   | no                 |
//! | Parens   | `((File))`     | no                 |
//!
//! The text between the delimiters is used verbatim and is not parsed for
//! further markup. There is no escape for the closing delimiter: a span always
//! ends at the first closing delimiter after its opening one.
//!
//! # Example
//!
//! ```
//! use kbdext::{DelimiterStyle, KbdConfig, make_extension};
//! use kbdext_markdown::markdown;
//!
//! let config = KbdConfig::default()
//!     .with_enabled(DelimiterStyle::Parens, true)
//!     .with_css(DelimiterStyle::Parens, "menu");
//! let html = markdown("Click the ((File)) menu!", &[&make_extension(config)]);
//!
//! assert_eq!(html, r#"<p>Click the <kbd class="menu">File</kbd> menu!</p>"#);
//! ```
//!
//! # Configuration
//!
//! | Key               | Default | Description                                  |
//! |-------------------|---------|----------------------------------------------|
//! | `enable_brackets` | `true`  | Enable bracket syntax.                       |
//! | `brackets_css`    | `""`    | Add custom CSS class for bracket syntax.     |
//! | `enable_braces`   | `false` | Enable curly brace syntax.                   |
//! | `braces_css`      | `""`    | Add custom CSS class for brace syntax.       |
//! | `enable_parens`   | `false` | Enable parenthesis syntax.                   |
//! | `parens_css`      | `""`    | Add custom CSS class for parenthesis syntax. |
//!
//! See [`KbdConfig`] for setting options from key/value pairs or TOML.

mod config;
mod extension;
mod pattern;

pub use config::{ConfigError, KbdConfig, OPTIONS, OptionInfo, OptionValue};
pub use extension::KbdExtension;
pub use pattern::{DelimiterStyle, KbdPattern, kbd_element};

/// Create the extension from its configuration.
///
/// Entry point for hosts that load extensions through a factory function.
#[must_use]
pub fn make_extension(config: KbdConfig) -> KbdExtension {
    KbdExtension::new(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use kbdext_markdown::Markdown;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_make_extension_from_key_values() {
        let mut config = KbdConfig::default();
        config.set_option("brackets_css", "custom-brackets-kbd").unwrap();
        config.set_option("enable_braces", true).unwrap();
        config.set_option("braces_css", "custom-braces-kbd").unwrap();

        let md = Markdown::new().with_extension(&make_extension(config));
        assert_eq!(
            md.convert("Press the [[Enter]] key!\n\nClick the {{Search}} button!"),
            concat!(
                r#"<p>Press the <kbd class="custom-brackets-kbd">Enter</kbd> key!</p>"#,
                r#"<p>Click the <kbd class="custom-braces-kbd">Search</kbd> button!</p>"#
            )
        );
    }

    #[test]
    fn test_make_extension_from_toml() {
        let config = KbdConfig::from_toml_str(
            r#"
[kbd]
enable_parens = true
parens_css = "custom-parens-kbd"
"#,
        )
        .unwrap();

        let md = Markdown::new().with_extension(&make_extension(config));
        assert_eq!(
            md.convert("Click the ((File)) menu!"),
            r#"<p>Click the <kbd class="custom-parens-kbd">File</kbd> menu!</p>"#
        );
    }
}
