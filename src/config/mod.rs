//! Site and i18n configuration.
//!
//! A `Config` is built from an untyped YAML/JSON document by a `Loader`,
//! which checks the module list, site URLs, locales, default locale, routing
//! strategy and prerender settings, and fills in defaults for optional
//! fields. Unknown keys are ignored for forward compatibility.

mod model;
mod operations;
pub mod types;


// Re-export public API
pub use model::Config;
pub use operations::Loader;
pub use types::{Direction, Locale, PrerenderConfig, Strategy, StrategyPolicy};
