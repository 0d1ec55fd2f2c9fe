//! Implementation of the `siteconf show` command.

use crate::cli::{OutputFormat, ShowArgs};
use siteconf::Config;
use siteconf::error::Result;

/// Execute the `siteconf show` command.
///
/// Prints the normalized config, with defaults filled in, as YAML or JSON.
pub fn cmd_show(args: &ShowArgs) -> Result<String> {
    let config = Config::load_file(&args.file)?;
    match args.format {
        OutputFormat::Yaml => config.to_yaml(),
        OutputFormat::Json => config.to_json().map(|json| json + "\n"),
    }
}
