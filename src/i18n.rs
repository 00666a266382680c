//! Static translation tables and locale selection for CLI output.
//!
//! The tables are embedded JSON, loaded once at startup. Lookup falls back
//! from the active locale to English, then to the key itself, so a missing
//! translation never breaks output.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde_json::Value;

/// Supported output locales.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Locale {
    /// English (also the fallback for missing keys).
    #[default]
    En,
    /// Russian.
    Ru,
    /// Chinese.
    Zh,
}

impl Locale {
    /// Returns the stable locale tag.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Ru => "ru",
            Self::Zh => "zh",
        }
    }

    fn table_source(self) -> &'static str {
        match self {
            Self::En => include_str!("../locales/en.json"),
            Self::Ru => include_str!("../locales/ru.json"),
            Self::Zh => include_str!("../locales/zh.json"),
        }
    }
}

impl FromStr for Locale {
    type Err = UnknownLocale;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "en" => Ok(Self::En),
            "ru" => Ok(Self::Ru),
            "zh" => Ok(Self::Zh),
            _ => Err(UnknownLocale {
                requested: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for an unrecognized locale tag.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown locale '{requested}' (supported: en, ru, zh)")]
pub struct UnknownLocale {
    /// The tag that failed to parse.
    pub requested: String,
}

/// Loaded message tables with an active locale and the English fallback.
#[derive(Debug, Clone)]
pub struct Catalog {
    locale: Locale,
    active: HashMap<String, String>,
    fallback: HashMap<String, String>,
}

impl Catalog {
    /// Loads the embedded tables and selects `locale` as active.
    #[must_use]
    pub fn new(locale: Locale) -> Self {
        Self {
            locale,
            active: load_table(locale),
            fallback: load_table(Locale::En),
        }
    }

    /// Returns the active locale.
    #[must_use]
    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// Looks up a message key: active locale, else English, else the key.
    #[must_use]
    pub fn text<'a>(&'a self, key: &'a str) -> &'a str {
        self.active
            .get(key)
            .or_else(|| self.fallback.get(key))
            .map_or(key, String::as_str)
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new(Locale::En)
    }
}

/// Parses an embedded table; only string values are kept.
///
/// The tables are compile-time data, so a parse failure can only come from
/// an edit to the bundled JSON; it degrades to fallback lookups rather than
/// aborting startup.
fn load_table(locale: Locale) -> HashMap<String, String> {
    let parsed: Value = serde_json::from_str(locale.table_source()).unwrap_or_default();
    let Value::Object(entries) = parsed else {
        return HashMap::new();
    };
    entries
        .into_iter()
        .filter_map(|(key, value)| match value {
            Value::String(text) => Some((key, text)),
            _ => None,
        })
        .collect()
}
