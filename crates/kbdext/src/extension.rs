//! Registration of the keyboard-key patterns with a converter.

use kbdext_markdown::{Extension, Markdown};

use crate::config::KbdConfig;
use crate::pattern::{DelimiterStyle, KbdPattern};

/// Keyboard-key markdown extension.
///
/// Registers one [`KbdPattern`] per enabled [`DelimiterStyle`], each under
/// its own name and priority so the three styles never replace one another.
///
/// # Example
///
/// ```
/// use kbdext::{KbdConfig, KbdExtension};
/// use kbdext_markdown::Markdown;
///
/// let config = KbdConfig {
///     enable_braces: true,
///     braces_css: "button".to_owned(),
///     ..KbdConfig::default()
/// };
/// let md = Markdown::new().with_extension(&KbdExtension::new(config));
///
/// assert_eq!(
///     md.convert("Press [[Enter]] then {{OK}}"),
///     r#"<p>Press <kbd>Enter</kbd> then <kbd class="button">OK</kbd></p>"#
/// );
/// ```
#[derive(Clone, Debug, Default)]
pub struct KbdExtension {
    config: KbdConfig,
}

impl KbdExtension {
    /// Create the extension from its configuration.
    #[must_use]
    pub fn new(config: KbdConfig) -> Self {
        Self { config }
    }

    /// Configuration the extension was created with.
    #[must_use]
    pub fn config(&self) -> &KbdConfig {
        &self.config
    }

    /// Patterns for every enabled style, in registration order.
    pub fn patterns(&self) -> impl Iterator<Item = KbdPattern> + '_ {
        DelimiterStyle::ALL
            .into_iter()
            .filter(|&style| self.config.is_enabled(style))
            .map(|style| KbdPattern::new(style, self.config.css(style)))
    }
}

impl From<KbdConfig> for KbdExtension {
    fn from(config: KbdConfig) -> Self {
        Self::new(config)
    }
}

impl Extension for KbdExtension {
    fn extend(&self, md: &mut Markdown) {
        for pattern in self.patterns() {
            let style = pattern.style();
            tracing::debug!(
                name = style.name(),
                priority = style.priority(),
                css = pattern.css().unwrap_or_default(),
                "Registering kbd pattern"
            );
            md.inline_patterns_mut()
                .register(Box::new(pattern), style.name(), style.priority());
        }
    }
}
