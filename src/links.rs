//! Alternate-language link metadata.
//!
//! Builds the `<link rel="alternate" hreflang="…" href="…">` set for a page:
//! one entry per locale plus an `x-default` entry for the default locale.

use crate::config::Config;
use crate::error::{ConfigError, Result};
use serde::Serialize;
use url::Url;

/// `hreflang` value for the fallback entry.
pub const X_DEFAULT: &str = "x-default";

/// A single alternate link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AlternateLink {
    pub hreflang: String,
    pub href: Url,
}

/// Alternate links for `path` across every configured locale.
///
/// Links are absolute, built on `i18n.baseUrl`, and listed in locale order
/// with `x-default` last.
pub fn alternates(config: &Config, path: &str) -> Result<Vec<AlternateLink>> {
    let mut links = Vec::with_capacity(config.locales().len() + 1);

    for locale in config.locales() {
        links.push(AlternateLink {
            hreflang: locale.hreflang().to_string(),
            href: locale_url(config, &locale.code, path)?,
        });
    }

    links.push(AlternateLink {
        hreflang: X_DEFAULT.to_string(),
        href: locale_url(config, config.default_locale_code(), path)?,
    });

    Ok(links)
}

/// Absolute URL of `path` in the locale `code`.
pub fn locale_url(config: &Config, code: &str, path: &str) -> Result<Url> {
    let localized = config
        .localized_path(code, path)
        .ok_or_else(|| ConfigError::UnknownLocale {
            code: code.to_string(),
            known: config.locale_codes().into_iter().map(String::from).collect(),
        })?;

    // `join` replaces the last path segment unless the base ends in `/`.
    let mut base = config.base_url().clone();
    if !base.path().ends_with('/') {
        let directory = format!("{}/", base.path());
        base.set_path(&directory);
    }

    base.join(localized.trim_start_matches('/'))
        .map_err(|e| ConfigError::InvalidUrl {
            field: "i18n.baseUrl",
            value: format!("{}{}", base, localized),
            reason: e.to_string(),
        })
}
