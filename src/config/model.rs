//! Config struct definition and accessors.

use super::types::*;
use crate::modules::ModuleRef;
use serde::Serialize;
use url::Url;

/// A loaded, validated site configuration.
///
/// Only [`Loader`](super::Loader) builds one, so every `Config` satisfies the
/// locale and URL invariants. It serializes back to the same camelCase shape
/// it was read from, with defaults filled in.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Config {
    pub(super) modules: Vec<ModuleRef>,
    pub(super) site: SiteConfig,
    pub(super) nitro: NitroConfig,
    pub(super) i18n: I18nConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(super) struct SiteConfig {
    pub(super) url: Url,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(super) struct NitroConfig {
    pub(super) prerender: PrerenderConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct I18nConfig {
    pub(super) base_url: Url,
    pub(super) default_locale: String,
    pub(super) strategy: Strategy,
    pub(super) locales: Vec<Locale>,
}

impl Config {
    // =========================================================================
    // Modules and site
    // =========================================================================

    /// Modules in initialization order.
    pub fn modules(&self) -> &[ModuleRef] {
        &self.modules
    }

    /// Canonical base URL of the site (`site.url`).
    pub fn site_url(&self) -> &Url {
        &self.site.url
    }

    /// Prerender settings (`nitro.prerender`).
    pub fn prerender(&self) -> &PrerenderConfig {
        &self.nitro.prerender
    }

    // =========================================================================
    // i18n
    // =========================================================================

    /// Base URL for locale-aware links (`i18n.baseUrl`, else `site.url`).
    pub fn base_url(&self) -> &Url {
        &self.i18n.base_url
    }

    pub fn strategy(&self) -> &Strategy {
        &self.i18n.strategy
    }

    /// Locales in declaration order.
    pub fn locales(&self) -> &[Locale] {
        &self.i18n.locales
    }

    pub fn locale_codes(&self) -> Vec<&str> {
        self.i18n.locales.iter().map(|l| l.code.as_str()).collect()
    }

    /// Look up a locale by code.
    pub fn locale(&self, code: &str) -> Option<&Locale> {
        self.i18n.locales.iter().find(|l| l.code == code)
    }

    pub fn default_locale_code(&self) -> &str {
        &self.i18n.default_locale
    }

    /// The default locale record.
    pub fn default_locale(&self) -> &Locale {
        // The loader guarantees the default code is present.
        self.locale(&self.i18n.default_locale)
            .unwrap_or(&self.i18n.locales[0])
    }

    /// URL path prefix for a locale under the configured strategy.
    ///
    /// Returns `None` for unprefixed and unknown locales.
    pub fn prefix_for(&self, code: &str) -> Option<String> {
        let locale = self.locale(code)?;
        let is_default = locale.code == self.i18n.default_locale;
        if self.i18n.strategy.prefixes(is_default) {
            Some(format!("/{}", locale.code))
        } else {
            None
        }
    }

    /// Path of `path` as served in the locale `code`.
    ///
    /// Returns `None` for an unknown locale.
    pub fn localized_path(&self, code: &str, path: &str) -> Option<String> {
        self.locale(code)?;
        let path = if path.starts_with('/') {
            path.to_string()
        } else {
            format!("/{}", path)
        };
        Some(match self.prefix_for(code) {
            Some(prefix) if path == "/" => prefix,
            Some(prefix) => format!("{}{}", prefix, path),
            None => path,
        })
    }
}
