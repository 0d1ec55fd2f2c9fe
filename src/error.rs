//! Error types for siteconf.
//!
//! Uses thiserror for derive macros. Every message leads with the field path
//! that failed so the host can point the user at the offending line.

use crate::exit_codes;
use thiserror::Error;

/// Main error type for configuration loading.
///
/// Loading is fail-fast: the first violated rule is reported and nothing
/// after it is checked.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("failed to read config file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The document is not valid YAML/JSON.
    #[error("failed to parse config {format}: {message}")]
    Parse {
        format: &'static str,
        message: String,
    },

    /// The normalized config could not be rendered.
    #[error("failed to serialize config to {format}: {message}")]
    Serialize {
        format: &'static str,
        message: String,
    },

    /// The document parsed but a field has the wrong type.
    #[error("invalid config shape: {0}")]
    Shape(String),

    /// A required field is absent.
    #[error("{path}: required field is missing")]
    MissingField { path: &'static str },

    /// The host reported that a module reference cannot be resolved.
    #[error("modules[{index}]: could not resolve module '{module}': {reason}")]
    ModuleResolution {
        index: usize,
        module: String,
        reason: String,
    },

    /// A URL field is not a well-formed absolute URL.
    #[error("{field}: '{value}' is not a valid absolute URL ({reason})")]
    InvalidUrl {
        field: &'static str,
        value: String,
        reason: String,
    },

    /// `i18n.locales` is empty.
    #[error("i18n.locales: expected at least one locale, got none")]
    NoLocales,

    /// A locale entry has an empty `code`.
    #[error("i18n.locales[{index}].code: locale code must be non-empty")]
    EmptyLocaleCode { index: usize },

    /// Two locale entries share a `code`.
    #[error("i18n.locales[{index}].code: duplicate locale code '{code}'")]
    DuplicateLocale { index: usize, code: String },

    /// A locale `iso` value does not look like a language tag.
    #[error(
        "i18n.locales[{index}].iso: '{iso}' is not a language tag (expected e.g. 'en-US')"
    )]
    InvalidLocaleIso { index: usize, iso: String },

    /// `i18n.defaultLocale` is not among the locale codes.
    #[error("i18n.defaultLocale: '{code}' not found among locale codes [{}]", .known.join(", "))]
    UnknownDefaultLocale { code: String, known: Vec<String> },

    /// An accessor was asked about a locale code the config does not define.
    #[error("unknown locale '{code}' (known: [{}])", .known.join(", "))]
    UnknownLocale { code: String, known: Vec<String> },

    /// `i18n.strategy` is not a recognized routing strategy (strict policy only).
    #[error(
        "i18n.strategy: unknown routing strategy '{value}' (expected one of no_prefix, prefix_except_default, prefix, prefix_and_default)"
    )]
    UnknownStrategy { value: String },
}

impl ConfigError {
    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            ConfigError::Io { .. } | ConfigError::Parse { .. } | ConfigError::Serialize { .. } => {
                exit_codes::USER_ERROR
            }
            _ => exit_codes::VALIDATION_FAILURE,
        }
    }

    /// Whether this error is one of the semantic validation failures, as
    /// opposed to an I/O or syntax problem.
    pub fn is_validation(&self) -> bool {
        self.exit_code() == exit_codes::VALIDATION_FAILURE
    }
}

/// Result type alias for siteconf operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_error_has_user_exit_code() {
        let err = ConfigError::Parse {
            format: "YAML",
            message: "bad indent".to_string(),
        };
        assert_eq!(err.exit_code(), exit_codes::USER_ERROR);
        assert!(!err.is_validation());
    }

    #[test]
    fn io_error_has_user_exit_code() {
        let err = ConfigError::Io {
            path: "nuxt.config.yaml".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        };
        assert_eq!(err.exit_code(), exit_codes::USER_ERROR);
        assert!(err.to_string().contains("nuxt.config.yaml"));
    }

    #[test]
    fn validation_errors_have_validation_exit_code() {
        let errors = [
            ConfigError::NoLocales,
            ConfigError::MissingField { path: "site.url" },
            ConfigError::DuplicateLocale {
                index: 1,
                code: "en".to_string(),
            },
            ConfigError::UnknownStrategy {
                value: "by_domain".to_string(),
            },
        ];
        for err in errors {
            assert_eq!(err.exit_code(), exit_codes::VALIDATION_FAILURE);
            assert!(err.is_validation());
        }
    }

    #[test]
    fn unknown_default_locale_lists_known_codes() {
        let err = ConfigError::UnknownDefaultLocale {
            code: "de".to_string(),
            known: vec!["en".to_string(), "es".to_string(), "fr".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "i18n.defaultLocale: 'de' not found among locale codes [en, es, fr]"
        );
    }

    #[test]
    fn invalid_url_names_field_and_value() {
        let err = ConfigError::InvalidUrl {
            field: "site.url",
            value: "nuxtseo.com".to_string(),
            reason: "relative URL without a base".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.starts_with("site.url: 'nuxtseo.com'"));
        assert!(msg.contains("relative URL without a base"));
    }
}
