//! Extension configuration.
//!
//! Options can be set in code, from key/value pairs (as host configuration
//! files provide them) or from a TOML document:
//!
//! ```toml
//! [kbd]
//! enable_braces = true
//! braces_css = "button"
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::pattern::DelimiterStyle;

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Option key not recognized.
    #[error("Unknown option: {0}")]
    UnknownOption(String),
    /// Option value of the wrong kind.
    #[error("Invalid value for {key}: expected {expected}")]
    InvalidValue {
        /// Option key (e.g., "`braces_css`").
        key: String,
        /// Expected kind of value.
        expected: &'static str,
    },
}

/// Value for [`KbdConfig::set_option`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OptionValue {
    /// Value of an `enable_*` option.
    Bool(bool),
    /// Value of a `*_css` option.
    Str(String),
}

impl From<bool> for OptionValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<&str> for OptionValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_owned())
    }
}

impl From<String> for OptionValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

/// Description of a single configuration option.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OptionInfo {
    /// Option key.
    pub key: &'static str,
    /// Default value as written in configuration files.
    pub default: &'static str,
    /// Human readable description.
    pub description: &'static str,
}

/// All recognized options with their defaults.
pub const OPTIONS: &[OptionInfo] = &[
    OptionInfo {
        key: "enable_brackets",
        default: "true",
        description: "Enable bracket syntax.",
    },
    OptionInfo {
        key: "brackets_css",
        default: "",
        description: "Add custom CSS class for bracket syntax.",
    },
    OptionInfo {
        key: "enable_braces",
        default: "false",
        description: "Enable curly brace syntax.",
    },
    OptionInfo {
        key: "braces_css",
        default: "",
        description: "Add custom CSS class for brace syntax.",
    },
    OptionInfo {
        key: "enable_parens",
        default: "false",
        description: "Enable parenthesis syntax.",
    },
    OptionInfo {
        key: "parens_css",
        default: "",
        description: "Add custom CSS class for parenthesis syntax.",
    },
];

/// Keyboard-key extension configuration.
///
/// One enable flag and one CSS class per [`DelimiterStyle`]. Only bracket
/// syntax is enabled by default; no style has a class by default.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
#[allow(clippy::struct_excessive_bools)]
pub struct KbdConfig {
    /// Enable `[[...]]` syntax.
    pub enable_brackets: bool,
    /// CSS class for `[[...]]` elements.
    pub brackets_css: String,
    /// Enable `{{...}}` syntax.
    pub enable_braces: bool,
    /// CSS class for `{{...}}` elements.
    pub braces_css: String,
    /// Enable `((...))` syntax.
    pub enable_parens: bool,
    /// CSS class for `((...))` elements.
    pub parens_css: String,
}

impl Default for KbdConfig {
    fn default() -> Self {
        Self {
            enable_brackets: true,
            brackets_css: String::new(),
            enable_braces: false,
            braces_css: String::new(),
            enable_parens: false,
            parens_css: String::new(),
        }
    }
}

impl KbdConfig {
    /// Whether `style` is enabled.
    #[must_use]
    pub fn is_enabled(&self, style: DelimiterStyle) -> bool {
        match style {
            DelimiterStyle::Brackets => self.enable_brackets,
            DelimiterStyle::Braces => self.enable_braces,
            DelimiterStyle::Parens => self.enable_parens,
        }
    }

    /// CSS class for `style`, `None` when unset or empty.
    #[must_use]
    pub fn css(&self, style: DelimiterStyle) -> Option<&str> {
        let css = match style {
            DelimiterStyle::Brackets => &self.brackets_css,
            DelimiterStyle::Braces => &self.braces_css,
            DelimiterStyle::Parens => &self.parens_css,
        };
        (!css.is_empty()).then_some(css.as_str())
    }

    /// Enable or disable `style`.
    #[must_use]
    pub fn with_enabled(mut self, style: DelimiterStyle, enabled: bool) -> Self {
        *self.enabled_mut(style) = enabled;
        self
    }

    /// Set the CSS class for `style`.
    #[must_use]
    pub fn with_css(mut self, style: DelimiterStyle, css: impl Into<String>) -> Self {
        *self.css_mut(style) = css.into();
        self
    }

    /// Set a single option by key.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::UnknownOption` for keys not listed in [`OPTIONS`]
    /// and `ConfigError::InvalidValue` when an `enable_*` key gets a string or
    /// a `*_css` key gets a boolean.
    pub fn set_option(
        &mut self,
        key: &str,
        value: impl Into<OptionValue>,
    ) -> Result<(), ConfigError> {
        let (style, is_flag) = parse_key(key)?;
        match (value.into(), is_flag) {
            (OptionValue::Bool(enabled), true) => *self.enabled_mut(style) = enabled,
            (OptionValue::Str(css), false) => *self.css_mut(style) = css,
            (_, is_flag) => {
                return Err(ConfigError::InvalidValue {
                    key: key.to_owned(),
                    expected: if is_flag { "a boolean" } else { "a string" },
                });
            }
        }
        Ok(())
    }

    /// Parse configuration from a TOML document.
    ///
    /// Options are read from a `[kbd]` table when present, otherwise from the
    /// top level of the document.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Parse` for invalid TOML, unknown keys or values
    /// of the wrong type.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let mut table: toml::Table = toml::from_str(content)?;
        let value = match table.remove("kbd") {
            Some(kbd @ toml::Value::Table(_)) => kbd,
            Some(other) => {
                table.insert("kbd".to_owned(), other);
                toml::Value::Table(table)
            }
            None => toml::Value::Table(table),
        };
        let config: Self = value.try_into()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if the file doesn't exist, can't be read or fails to parse.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!(path = %path.display(), "Loaded kbd configuration");
        Ok(config)
    }

    fn enabled_mut(&mut self, style: DelimiterStyle) -> &mut bool {
        match style {
            DelimiterStyle::Brackets => &mut self.enable_brackets,
            DelimiterStyle::Braces => &mut self.enable_braces,
            DelimiterStyle::Parens => &mut self.enable_parens,
        }
    }

    fn css_mut(&mut self, style: DelimiterStyle) -> &mut String {
        match style {
            DelimiterStyle::Brackets => &mut self.brackets_css,
            DelimiterStyle::Braces => &mut self.braces_css,
            DelimiterStyle::Parens => &mut self.parens_css,
        }
    }
}

/// Split an option key into its style and whether it is an `enable_*` flag.
fn parse_key(key: &str) -> Result<(DelimiterStyle, bool), ConfigError> {
    let (style, is_flag) = if let Some(style) = key.strip_prefix("enable_") {
        (style, true)
    } else if let Some(style) = key.strip_suffix("_css") {
        (style, false)
    } else {
        return Err(ConfigError::UnknownOption(key.to_owned()));
    };

    let style = DelimiterStyle::ALL
        .into_iter()
        .find(|s| s.option_prefix() == style)
        .ok_or_else(|| ConfigError::UnknownOption(key.to_owned()))?;
    Ok((style, is_flag))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = KbdConfig::default();

        assert!(config.is_enabled(DelimiterStyle::Brackets));
        assert!(!config.is_enabled(DelimiterStyle::Braces));
        assert!(!config.is_enabled(DelimiterStyle::Parens));
        for style in DelimiterStyle::ALL {
            assert_eq!(config.css(style), None);
        }
    }

    #[test]
    fn test_options_table_matches_defaults() {
        let keys: Vec<_> = OPTIONS.iter().map(|o| o.key).collect();
        assert_eq!(
            keys,
            [
                "enable_brackets",
                "brackets_css",
                "enable_braces",
                "braces_css",
                "enable_parens",
                "parens_css"
            ]
        );

        let from_table: KbdConfig = toml::from_str(
            &OPTIONS
                .iter()
                .map(|o| match o.default {
                    "true" | "false" => format!("{} = {}\n", o.key, o.default),
                    other => format!("{} = \"{other}\"\n", o.key),
                })
                .collect::<String>(),
        )
        .unwrap();
        assert_eq!(from_table, KbdConfig::default());
    }

    #[test]
    fn test_builder() {
        let config = KbdConfig::default()
            .with_enabled(DelimiterStyle::Brackets, false)
            .with_enabled(DelimiterStyle::Parens, true)
            .with_css(DelimiterStyle::Parens, "menu");

        assert!(!config.enable_brackets);
        assert!(config.enable_parens);
        assert_eq!(config.css(DelimiterStyle::Parens), Some("menu"));
        assert_eq!(config.parens_css, "menu");
    }

    #[test]
    fn test_empty_css_is_none() {
        let config = KbdConfig::default().with_css(DelimiterStyle::Brackets, "");
        assert_eq!(config.css(DelimiterStyle::Brackets), None);
    }

    #[test]
    fn test_set_option() {
        let mut config = KbdConfig::default();
        config.set_option("enable_braces", true).unwrap();
        config.set_option("braces_css", "custom-braces-kbd").unwrap();
        config.set_option("enable_brackets", false).unwrap();

        assert!(config.enable_braces);
        assert_eq!(config.braces_css, "custom-braces-kbd");
        assert!(!config.enable_brackets);
    }

    #[test]
    fn test_set_option_unknown_key() {
        let mut config = KbdConfig::default();
        for key in ["enable_angles", "angles_css", "brackets", "css", ""] {
            let err = config.set_option(key, true).unwrap_err();
            assert!(
                matches!(err, ConfigError::UnknownOption(ref k) if k == key),
                "Expected ConfigError::UnknownOption, got {err:?}"
            );
        }
    }

    #[test]
    fn test_set_option_wrong_kind() {
        let mut config = KbdConfig::default();

        let err = config.set_option("enable_parens", "yes").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid value for enable_parens: expected a boolean"
        );

        let err = config.set_option("parens_css", true).unwrap_err();
        assert_eq!(err.to_string(), "Invalid value for parens_css: expected a string");

        assert_eq!(config, KbdConfig::default());
    }

    #[test]
    fn test_from_toml_top_level() {
        let config = KbdConfig::from_toml_str(
            r#"
enable_brackets = false
enable_parens = true
parens_css = "menu"
"#,
        )
        .unwrap();

        assert_eq!(
            config,
            KbdConfig {
                enable_brackets: false,
                enable_parens: true,
                parens_css: "menu".to_owned(),
                ..KbdConfig::default()
            }
        );
    }

    #[test]
    fn test_from_toml_kbd_table() {
        let config = KbdConfig::from_toml_str(
            r#"
[kbd]
enable_braces = true
braces_css = "button"
"#,
        )
        .unwrap();

        assert!(config.enable_brackets);
        assert!(config.enable_braces);
        assert_eq!(config.braces_css, "button");
    }

    #[test]
    fn test_from_toml_empty_is_default() {
        assert_eq!(KbdConfig::from_toml_str("").unwrap(), KbdConfig::default());
    }

    #[test]
    fn test_from_toml_unknown_key() {
        let err = KbdConfig::from_toml_str("enable_angles = true").unwrap_err();
        assert!(
            matches!(err, ConfigError::Parse(_)),
            "Expected ConfigError::Parse, got {err:?}"
        );
        assert!(err.to_string().contains("enable_angles"));
    }

    #[test]
    fn test_from_toml_wrong_type() {
        let err = KbdConfig::from_toml_str("enable_braces = \"yes\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[kbd]\nbrackets_css = \"key\"").unwrap();

        let config = KbdConfig::load(file.path()).unwrap();
        assert_eq!(config.css(DelimiterStyle::Brackets), Some("key"));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("kbd.toml");

        let err = KbdConfig::load(&path).unwrap_err();
        assert!(
            matches!(err, ConfigError::NotFound(ref p) if *p == path),
            "Expected ConfigError::NotFound, got {err:?}"
        );
    }
}
