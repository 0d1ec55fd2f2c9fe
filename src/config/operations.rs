//! Config loading, validation, and serialization.
//!
//! Loading is a single pure pass over an untyped document. Sections are
//! decoded one at a time so a shape error can name the field that broke,
//! and the checks run in a fixed order, stopping at the first failure:
//!
//! 1. `modules` (shape, then host resolution)
//! 2. `site.url`, then `i18n.baseUrl`
//! 3. `i18n.locales` (non-empty, codes non-empty and unique, iso tags)
//! 4. `i18n.defaultLocale`
//! 5. `i18n.strategy`
//! 6. `nitro.prerender`

use super::model::{Config, I18nConfig, NitroConfig, SiteConfig};
use super::types::*;
use crate::error::{ConfigError, Result};
use crate::modules::{AcceptAll, ModuleRef, ModuleResolver};
use regex::Regex;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::HashSet;
use std::path::Path;
use std::sync::LazyLock;
use tracing::{debug, info, warn};
use url::Url;

/// Language tag shape: a 2-3 letter language followed by `-` subtags.
static LANGUAGE_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z]{2,3}(-[A-Za-z0-9]{2,8})*$").expect("language tag regex is valid")
});

static ACCEPT_ALL: AcceptAll = AcceptAll;

/// Validating constructor for [`Config`].
///
/// Holds the host's module resolver and the strategy policy. A `Loader` has
/// no mutable state and can be shared between threads when its resolver can.
#[derive(Clone, Copy)]
pub struct Loader<'r> {
    resolver: &'r dyn ModuleResolver,
    strategy_policy: StrategyPolicy,
}

impl Default for Loader<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl Loader<'static> {
    /// A loader that accepts every module and treats unknown strategies as
    /// advisory.
    pub fn new() -> Self {
        Self {
            resolver: &ACCEPT_ALL,
            strategy_policy: StrategyPolicy::default(),
        }
    }
}

impl<'r> Loader<'r> {
    /// Use `resolver` to check module references.
    pub fn with_resolver<'a>(self, resolver: &'a dyn ModuleResolver) -> Loader<'a> {
        Loader {
            resolver,
            strategy_policy: self.strategy_policy,
        }
    }

    pub fn with_strategy_policy(mut self, policy: StrategyPolicy) -> Self {
        self.strategy_policy = policy;
        self
    }

    /// Load config from a YAML or JSON file.
    ///
    /// Files ending in `.json` are read as JSON, anything else as YAML.
    ///
    /// # Returns
    ///
    /// * `Ok(Config)` - Successfully loaded and validated config
    /// * `Err(ConfigError::Io)` - The file could not be read
    /// * `Err(_)` - Parse error or the first validation failure
    pub fn load_file<P: AsRef<Path>>(&self, path: P) -> Result<Config> {
        let path = path.as_ref();
        debug!(path = %path.display(), "reading config file");

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            source: e,
        })?;

        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json {
            self.load_json(&content)
        } else {
            self.load_yaml(&content)
        }
    }

    /// Parse and validate config from a YAML string.
    pub fn load_yaml(&self, yaml: &str) -> Result<Config> {
        let raw: Value = serde_yaml::from_str(yaml).map_err(|e| ConfigError::Parse {
            format: "YAML",
            message: e.to_string(),
        })?;
        self.load(&raw)
    }

    /// Parse and validate config from a JSON string.
    pub fn load_json(&self, json: &str) -> Result<Config> {
        let raw: Value = serde_json::from_str(json).map_err(|e| ConfigError::Parse {
            format: "JSON",
            message: e.to_string(),
        })?;
        self.load(&raw)
    }

    /// Validate an untyped document and build a [`Config`].
    ///
    /// Unknown keys are ignored for forward compatibility. Missing optional
    /// values get their defaults: `nitro.prerender.failOnError` is `true`,
    /// `nitro.prerender.ignore` is empty, `i18n.baseUrl` is `site.url` and
    /// `i18n.strategy` is `prefix_except_default`.
    pub fn load(&self, raw: &Value) -> Result<Config> {
        if !raw.is_object() {
            return Err(ConfigError::Shape(format!(
                "expected a mapping at the document root, got {}",
                kind(raw)
            )));
        }

        let modules = self.check_modules(raw)?;
        let (site_url, base_url) = check_urls(raw)?;
        let i18n =
            mapping(raw, "i18n", "i18n")?.ok_or(ConfigError::MissingField { path: "i18n" })?;
        let locales = check_locales(i18n)?;
        let default_locale = check_default_locale(i18n, &locales)?;
        let strategy = self.check_strategy(i18n)?;
        let prerender = check_prerender(raw)?;

        info!(
            modules = modules.len(),
            locales = locales.len(),
            default_locale = %default_locale,
            strategy = %strategy,
            "configuration loaded"
        );

        Ok(Config {
            modules,
            site: SiteConfig { url: site_url },
            nitro: NitroConfig { prerender },
            i18n: I18nConfig {
                base_url,
                default_locale,
                strategy,
                locales,
            },
        })
    }

    fn check_modules(&self, raw: &Value) -> Result<Vec<ModuleRef>> {
        let value = section(raw, "modules").ok_or(ConfigError::MissingField { path: "modules" })?;
        let entries = value.as_array().ok_or_else(|| {
            ConfigError::Shape(format!("modules: expected a sequence, got {}", kind(value)))
        })?;

        let mut modules = Vec::with_capacity(entries.len());
        let mut seen = HashSet::new();
        for (index, entry) in entries.iter().enumerate() {
            let module: ModuleRef = decode(entry, &format!("modules[{}]", index))?;
            if module.id().trim().is_empty() {
                return Err(ConfigError::ModuleResolution {
                    index,
                    module: module.id().to_string(),
                    reason: "module reference is empty".to_string(),
                });
            }

            self.resolver
                .resolve(&module)
                .map_err(|reason| ConfigError::ModuleResolution {
                    index,
                    module: module.id().to_string(),
                    reason,
                })?;

            if !seen.insert(module.id().to_string()) {
                warn!(module = %module, index, "module listed more than once");
            }
            modules.push(module);
        }

        debug!(count = modules.len(), "modules resolved");
        Ok(modules)
    }

    fn check_strategy(&self, i18n: &Value) -> Result<Strategy> {
        let strategy = match section(i18n, "strategy") {
            Some(value) => decode::<Strategy>(value, "i18n.strategy")?,
            None => Strategy::default(),
        };

        if !strategy.is_recognized() {
            match self.strategy_policy {
                StrategyPolicy::Strict => {
                    return Err(ConfigError::UnknownStrategy {
                        value: strategy.as_str().to_string(),
                    });
                }
                StrategyPolicy::Advisory => {
                    warn!(
                        strategy = %strategy,
                        "unrecognized i18n routing strategy; routing it like prefix_except_default"
                    );
                }
            }
        }

        Ok(strategy)
    }
}

impl Config {
    /// Validate an untyped document with the default [`Loader`].
    pub fn load(raw: &Value) -> Result<Self> {
        Loader::new().load(raw)
    }

    /// Load config from a YAML or JSON file with the default [`Loader`].
    pub fn load_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Loader::new().load_file(path)
    }

    /// Parse config from a YAML string with the default [`Loader`].
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Loader::new().load_yaml(yaml)
    }

    /// Parse config from a JSON string with the default [`Loader`].
    pub fn from_json(json: &str) -> Result<Self> {
        Loader::new().load_json(json)
    }

    /// Serialize config to a YAML string.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| ConfigError::Serialize {
            format: "YAML",
            message: e.to_string(),
        })
    }

    /// Serialize config to a pretty-printed JSON string.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| ConfigError::Serialize {
            format: "JSON",
            message: e.to_string(),
        })
    }
}

fn check_urls(raw: &Value) -> Result<(Url, Url)> {
    let site_url = mapping(raw, "site", "site")?
        .and_then(|site| section(site, "url"))
        .ok_or(ConfigError::MissingField { path: "site.url" })?;
    let site_url = parse_absolute_url("site.url", &decode::<String>(site_url, "site.url")?)?;

    let base_url = mapping(raw, "i18n", "i18n")?.and_then(|i18n| section(i18n, "baseUrl"));
    let base_url = match base_url {
        Some(value) => parse_absolute_url("i18n.baseUrl", &decode::<String>(value, "i18n.baseUrl")?)?,
        None => site_url.clone(),
    };

    debug!(site_url = %site_url, base_url = %base_url, "urls validated");
    Ok((site_url, base_url))
}

fn check_locales(i18n: &Value) -> Result<Vec<Locale>> {
    let value = section(i18n, "locales").ok_or(ConfigError::MissingField {
        path: "i18n.locales",
    })?;
    let entries = value.as_array().ok_or_else(|| {
        ConfigError::Shape(format!(
            "i18n.locales: expected a sequence, got {}",
            kind(value)
        ))
    })?;
    if entries.is_empty() {
        return Err(ConfigError::NoLocales);
    }

    let mut locales = Vec::with_capacity(entries.len());
    let mut codes = HashSet::new();
    for (index, entry) in entries.iter().enumerate() {
        let locale: Locale = decode::<LocaleEntry>(entry, &format!("i18n.locales[{}]", index))?.into();

        if locale.code.trim().is_empty() {
            return Err(ConfigError::EmptyLocaleCode { index });
        }
        if !codes.insert(locale.code.clone()) {
            return Err(ConfigError::DuplicateLocale {
                index,
                code: locale.code,
            });
        }
        if let Some(iso) = &locale.iso {
            if !LANGUAGE_TAG.is_match(iso) {
                return Err(ConfigError::InvalidLocaleIso {
                    index,
                    iso: iso.clone(),
                });
            }
        }
        locales.push(locale);
    }

    debug!(count = locales.len(), "locales validated");
    Ok(locales)
}

fn check_default_locale(i18n: &Value, locales: &[Locale]) -> Result<String> {
    let value = section(i18n, "defaultLocale").ok_or(ConfigError::MissingField {
        path: "i18n.defaultLocale",
    })?;
    let code: String = decode(value, "i18n.defaultLocale")?;

    if locales.iter().any(|l| l.code == code) {
        Ok(code)
    } else {
        Err(ConfigError::UnknownDefaultLocale {
            code,
            known: locales.iter().map(|l| l.code.clone()).collect(),
        })
    }
}

fn check_prerender(raw: &Value) -> Result<PrerenderConfig> {
    let Some(nitro) = mapping(raw, "nitro", "nitro")? else {
        return Ok(PrerenderConfig::default());
    };
    let Some(prerender) = mapping(nitro, "prerender", "nitro.prerender")? else {
        return Ok(PrerenderConfig::default());
    };

    let fail_on_error = match section(prerender, "failOnError") {
        Some(value) => decode(value, "nitro.prerender.failOnError")?,
        None => default_fail_on_error(),
    };
    let ignore: Vec<String> = match section(prerender, "ignore") {
        Some(value) => decode(value, "nitro.prerender.ignore")?,
        None => Vec::new(),
    };

    PrerenderConfig::new(fail_on_error, ignore)
}

/// Get a non-null child of a mapping.
fn section<'a>(value: &'a Value, key: &str) -> Option<&'a Value> {
    value.get(key).filter(|v| !v.is_null())
}

/// Get a non-null child that must itself be a mapping.
fn mapping<'a>(value: &'a Value, key: &str, path: &str) -> Result<Option<&'a Value>> {
    match section(value, key) {
        Some(child) if !child.is_object() => Err(ConfigError::Shape(format!(
            "{}: expected a mapping, got {}",
            path,
            kind(child)
        ))),
        child => Ok(child),
    }
}

/// Decode a sub-document, tagging shape errors with its field path.
fn decode<T: DeserializeOwned>(value: &Value, path: &str) -> Result<T> {
    T::deserialize(value).map_err(|e| ConfigError::Shape(format!("{}: {}", path, e)))
}

fn parse_absolute_url(field: &'static str, value: &str) -> Result<Url> {
    let invalid = |reason: String| ConfigError::InvalidUrl {
        field,
        value: value.to_string(),
        reason,
    };

    let url = Url::parse(value.trim()).map_err(|e| invalid(e.to_string()))?;
    if url.cannot_be_a_base() || url.host().is_none() {
        return Err(invalid("URL has no host".to_string()));
    }
    Ok(url)
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a sequence",
        Value::Object(_) => "a mapping",
    }
}
