//! siteconf: loader and validator for site and i18n routing configuration.
//!
//! A host hands [`Config::load`] (or a configured [`Loader`]) an untyped
//! document declaring its modules, site URL, prerender exclusions and
//! locales. The loader checks it in one pure pass and returns an immutable
//! [`Config`] with typed accessors, or the first rule it broke as a
//! [`ConfigError`].

pub mod config;
pub mod error;
pub mod exit_codes;
pub mod links;
pub mod modules;

pub use config::{Config, Direction, Loader, Locale, PrerenderConfig, Strategy, StrategyPolicy};
pub use error::{ConfigError, Result};
pub use modules::{AcceptAll, KnownModules, ModuleRef, ModuleResolver};
