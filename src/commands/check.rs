//! Implementation of the `siteconf check` command.
//!
//! Validates a config file and prints a one-line summary. With `--module`,
//! module references are resolved against the given package names and the
//! config file's directory.

use crate::cli::CheckArgs;
use siteconf::error::Result;
use siteconf::{KnownModules, Loader, StrategyPolicy};
use std::path::Path;

/// Execute the `siteconf check` command.
pub fn cmd_check(args: &CheckArgs) -> Result<String> {
    let policy = if args.strict_strategy {
        StrategyPolicy::Strict
    } else {
        StrategyPolicy::Advisory
    };
    let loader = Loader::new().with_strategy_policy(policy);

    let config = if args.modules.is_empty() {
        loader.load_file(&args.file)?
    } else {
        let root = args.file.parent().unwrap_or(Path::new("."));
        let known = KnownModules::new(args.modules.iter().cloned()).with_root(root);
        loader.with_resolver(&known).load_file(&args.file)?
    };

    Ok(format!(
        "OK: {} ({} modules, {} locales, default '{}', strategy {})\n",
        args.file.display(),
        config.modules().len(),
        config.locales().len(),
        config.default_locale_code(),
        config.strategy()
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::{FIXTURE, write_fixture};
    use siteconf::ConfigError;
    use siteconf::exit_codes;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn check_reports_summary() {
        let dir = TempDir::new().unwrap();
        let file = write_fixture(&dir, "nuxt.config.yaml", FIXTURE);

        let out = cmd_check(&CheckArgs {
            file,
            strict_strategy: true,
            modules: vec![],
        })
        .unwrap();
        assert!(out.starts_with("OK: "));
        assert!(out.contains("2 modules, 3 locales, default 'en', strategy prefix_except_default"));
    }

    #[test]
    fn check_with_modules_resolves_against_config_dir() {
        let dir = TempDir::new().unwrap();
        let config_dir = dir.path().join("test/fixtures/i18n");
        std::fs::create_dir_all(&config_dir).unwrap();
        std::fs::create_dir_all(dir.path().join("module/src")).unwrap();
        std::fs::write(dir.path().join("module/src/module.ts"), "export {}").unwrap();
        let file = config_dir.join("nuxt.config.yaml");
        std::fs::write(&file, FIXTURE).unwrap();

        let args = CheckArgs {
            file: file.clone(),
            strict_strategy: false,
            modules: vec!["@nuxtjs/i18n".to_string()],
        };
        assert!(cmd_check(&args).is_ok());

        let args = CheckArgs {
            file,
            strict_strategy: false,
            modules: vec!["@nuxtjs/sitemap".to_string()],
        };
        let err = cmd_check(&args).unwrap_err();
        assert!(matches!(err, ConfigError::ModuleResolution { index: 1, .. }));
        assert_eq!(err.exit_code(), exit_codes::VALIDATION_FAILURE);
    }

    #[test]
    fn check_missing_file_is_user_error() {
        let err = cmd_check(&CheckArgs {
            file: PathBuf::from("/nonexistent/nuxt.config.yaml"),
            strict_strategy: false,
            modules: vec![],
        })
        .unwrap_err();
        assert_eq!(err.exit_code(), exit_codes::USER_ERROR);
    }
}
