//! Implementation of the `siteconf locales` command.
//!
//! Prints one row per locale with its iso tag, text direction and the URL
//! prefix the routing strategy gives it.

use crate::cli::FileArgs;
use siteconf::Config;
use siteconf::error::Result;

/// Execute the `siteconf locales` command.
pub fn cmd_locales(args: &FileArgs) -> Result<String> {
    let config = Config::load_file(&args.file)?;
    Ok(render_locales(&config))
}

fn render_locales(config: &Config) -> String {
    let mut out = format!(
        "{:8} {:10} {:5} {}\n",
        "CODE", "ISO", "DIR", "PREFIX"
    );
    for locale in config.locales() {
        let marker = if locale.code == config.default_locale_code() {
            " (default)"
        } else {
            ""
        };
        let prefix = config
            .prefix_for(&locale.code)
            .unwrap_or_else(|| "-".to_string());
        out.push_str(&format!(
            "{:8} {:10} {:5} {}{}\n",
            locale.code,
            locale.iso.as_deref().unwrap_or("-"),
            locale.dir.as_str(),
            prefix,
            marker
        ));
    }
    out
}
