//! CLI argument parsing for siteconf.
//!
//! Uses clap derive macros for declarative argument definitions.
//! This module defines the command structure; actual implementations
//! are in the `commands` module.

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// siteconf: validate site and i18n routing configuration.
///
/// Reads a YAML or JSON config document declaring modules, the site URL,
/// prerender exclusions and locales, and checks it the way the host
/// framework would before startup.
#[derive(Parser, Debug)]
#[command(name = "siteconf")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Log output format.
    #[arg(long, value_enum, default_value_t = LogFormatArg::Human, global = true)]
    pub log_format: LogFormatArg,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands for siteconf.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Validate a config file.
    ///
    /// Exits 0 when valid, 1 when the file cannot be read or parsed,
    /// and 2 when a validation rule fails.
    Check(CheckArgs),

    /// Print the normalized config with defaults applied.
    Show(ShowArgs),

    /// List configured locales with their URL prefixes.
    Locales(FileArgs),

    /// Print hreflang alternate links for a page.
    Alternates(AlternatesArgs),
}

/// Arguments shared by commands that only read a config file.
#[derive(Parser, Debug)]
pub struct FileArgs {
    /// Path to the config file (.yaml, .yml or .json).
    pub file: PathBuf,
}

/// Arguments for the `check` command.
#[derive(Parser, Debug)]
pub struct CheckArgs {
    /// Path to the config file (.yaml, .yml or .json).
    pub file: PathBuf,

    /// Reject routing strategies siteconf does not recognize.
    #[arg(long)]
    pub strict_strategy: bool,

    /// Installed package modules. When given, package modules not listed
    /// fail to resolve and local modules must exist next to the config file.
    #[arg(long = "module", value_delimiter = ',')]
    pub modules: Vec<String>,
}

/// Arguments for the `show` command.
#[derive(Parser, Debug)]
pub struct ShowArgs {
    /// Path to the config file (.yaml, .yml or .json).
    pub file: PathBuf,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Yaml)]
    pub format: OutputFormat,
}

/// Arguments for the `alternates` command.
#[derive(Parser, Debug)]
pub struct AlternatesArgs {
    /// Path to the config file (.yaml, .yml or .json).
    pub file: PathBuf,

    /// Page path to build links for.
    #[arg(default_value = "/")]
    pub path: String,
}

/// Output format for `show`.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Yaml,
    Json,
}

/// Log output format.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormatArg {
    Human,
    Json,
}

impl Cli {
    /// Parse command line arguments.
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_check() {
        let cli = Cli::try_parse_from(["siteconf", "check", "nuxt.config.yaml"]).unwrap();
        if let Command::Check(args) = cli.command {
            assert_eq!(args.file, PathBuf::from("nuxt.config.yaml"));
            assert!(!args.strict_strategy);
            assert!(args.modules.is_empty());
        } else {
            panic!("Expected Check command");
        }
    }

    #[test]
    fn parse_check_with_modules() {
        let cli = Cli::try_parse_from([
            "siteconf",
            "check",
            "nuxt.config.yaml",
            "--strict-strategy",
            "--module",
            "@nuxtjs/i18n,@nuxtjs/sitemap",
            "--module",
            "nuxt-seo",
        ])
        .unwrap();
        if let Command::Check(args) = cli.command {
            assert!(args.strict_strategy);
            assert_eq!(
                args.modules,
                vec!["@nuxtjs/i18n", "@nuxtjs/sitemap", "nuxt-seo"]
            );
        } else {
            panic!("Expected Check command");
        }
    }

    #[test]
    fn parse_show_json() {
        let cli =
            Cli::try_parse_from(["siteconf", "show", "site.json", "--format", "json"]).unwrap();
        if let Command::Show(args) = cli.command {
            assert_eq!(args.format, OutputFormat::Json);
        } else {
            panic!("Expected Show command");
        }
    }

    #[test]
    fn parse_show_defaults_to_yaml() {
        let cli = Cli::try_parse_from(["siteconf", "show", "site.yaml"]).unwrap();
        if let Command::Show(args) = cli.command {
            assert_eq!(args.format, OutputFormat::Yaml);
        } else {
            panic!("Expected Show command");
        }
    }

    #[test]
    fn parse_alternates_default_path() {
        let cli = Cli::try_parse_from(["siteconf", "alternates", "site.yaml"]).unwrap();
        if let Command::Alternates(args) = cli.command {
            assert_eq!(args.path, "/");
        } else {
            panic!("Expected Alternates command");
        }
    }

    #[test]
    fn parse_global_flags() {
        let cli = Cli::try_parse_from([
            "siteconf",
            "locales",
            "site.yaml",
            "-vv",
            "--log-format",
            "json",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.log_format, LogFormatArg::Json);
        assert!(matches!(cli.command, Command::Locales(_)));
    }

    #[test]
    fn missing_file_is_rejected() {
        assert!(Cli::try_parse_from(["siteconf", "check"]).is_err());
    }
}
