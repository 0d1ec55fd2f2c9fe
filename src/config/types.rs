//! Configuration types and defaults for siteconf.
//!
//! This module defines the enums, locale records and prerender settings
//! that make up a loaded `Config`.

use crate::error::{ConfigError, Result};
use serde::{Deserialize, Serialize};

/// URL routing strategy for locales.
///
/// Values the i18n module may introduce later are kept verbatim in
/// `Other` so a config written for a newer module still loads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(from = "String", into = "String")]
pub enum Strategy {
    /// No locale ever gets a URL prefix.
    NoPrefix,
    /// Every locale except the default gets a prefix (default).
    #[default]
    PrefixExceptDefault,
    /// Every locale gets a prefix.
    Prefix,
    /// Every locale gets a prefix; the default is also served unprefixed.
    PrefixAndDefault,
    /// A strategy this crate does not know about.
    Other(String),
}

impl Strategy {
    /// Parse a strategy from a string. Never fails; unknown values become `Other`.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Self {
        match s {
            "no_prefix" => Self::NoPrefix,
            "prefix_except_default" => Self::PrefixExceptDefault,
            "prefix" => Self::Prefix,
            "prefix_and_default" => Self::PrefixAndDefault,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::NoPrefix => "no_prefix",
            Self::PrefixExceptDefault => "prefix_except_default",
            Self::Prefix => "prefix",
            Self::PrefixAndDefault => "prefix_and_default",
            Self::Other(s) => s,
        }
    }

    /// Whether this is one of the strategies listed above rather than `Other`.
    pub fn is_recognized(&self) -> bool {
        !matches!(self, Self::Other(_))
    }

    /// Whether URLs for a locale carry a `/<code>` prefix under this strategy.
    ///
    /// `Other` strategies are routed like the default strategy.
    pub fn prefixes(&self, is_default_locale: bool) -> bool {
        match self {
            Self::NoPrefix => false,
            Self::Prefix | Self::PrefixAndDefault => true,
            Self::PrefixExceptDefault | Self::Other(_) => !is_default_locale,
        }
    }
}

impl From<String> for Strategy {
    fn from(s: String) -> Self {
        Self::from_str(&s)
    }
}

impl From<Strategy> for String {
    fn from(strategy: Strategy) -> Self {
        strategy.as_str().to_string()
    }
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the loader treats a strategy it does not recognize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StrategyPolicy {
    /// Accept it and log a warning (default).
    #[default]
    Advisory,
    /// Reject it with `ConfigError::UnknownStrategy`.
    Strict,
}

/// Text direction of a locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Ltr,
    Rtl,
    Auto,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ltr => "ltr",
            Self::Rtl => "rtl",
            Self::Auto => "auto",
        }
    }
}

/// A locale the site is served in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Locale {
    /// Short identifier used in URL prefixes and lookups (e.g. `es`).
    pub code: String,

    /// Full language-region tag (e.g. `es-ES`) used for `lang`/`hreflang`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iso: Option<String>,

    /// Human-readable name for language switchers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default)]
    pub dir: Direction,
}

impl Locale {
    /// Create a locale with only a code.
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            iso: None,
            name: None,
            dir: Direction::default(),
        }
    }

    /// Set the ISO tag.
    pub fn with_iso(mut self, iso: impl Into<String>) -> Self {
        self.iso = Some(iso.into());
        self
    }

    /// The value to emit in `hreflang` and `lang` attributes: the ISO tag if
    /// one is set, otherwise the code.
    pub fn hreflang(&self) -> &str {
        self.iso.as_deref().unwrap_or(&self.code)
    }
}

/// A locale as written in the document: a full record or a bare code.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub(crate) enum LocaleEntry {
    Code(String),
    Full(Locale),
}

impl From<LocaleEntry> for Locale {
    fn from(entry: LocaleEntry) -> Self {
        match entry {
            LocaleEntry::Code(code) => Locale::new(code),
            LocaleEntry::Full(locale) => locale,
        }
    }
}

/// Prerender settings (`nitro.prerender`).
///
/// Each `ignore` entry is a path prefix: a route is skipped when it starts
/// with any entry, so `/` excludes every route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PrerenderConfig {
    fail_on_error: bool,
    ignore: Vec<String>,
}

impl PrerenderConfig {
    /// Build prerender settings from raw ignore paths.
    ///
    /// Duplicate paths are collapsed, keeping the first occurrence. An empty
    /// entry would match every route, so it is rejected.
    pub fn new(fail_on_error: bool, ignore: Vec<String>) -> Result<Self> {
        let mut unique: Vec<String> = Vec::with_capacity(ignore.len());
        for (index, path) in ignore.into_iter().enumerate() {
            if path.trim().is_empty() {
                return Err(ConfigError::Shape(format!(
                    "nitro.prerender.ignore[{}]: expected a non-empty path",
                    index
                )));
            }
            if !unique.contains(&path) {
                unique.push(path);
            }
        }

        Ok(Self {
            fail_on_error,
            ignore: unique,
        })
    }

    /// Whether a prerender failure aborts the build.
    pub fn fail_on_error(&self) -> bool {
        self.fail_on_error
    }

    /// Path prefixes excluded from prerendering.
    pub fn ignore(&self) -> &[String] {
        &self.ignore
    }

    /// Whether `path` is excluded from prerendering.
    pub fn is_ignored(&self, path: &str) -> bool {
        self.ignore.iter().any(|prefix| path.starts_with(prefix.as_str()))
    }
}

impl Default for PrerenderConfig {
    fn default() -> Self {
        Self {
            fail_on_error: default_fail_on_error(),
            ignore: Vec::new(),
        }
    }
}

pub(crate) fn default_fail_on_error() -> bool {
    true
}
