//! Implementation of the `siteconf alternates` command.

use crate::cli::AlternatesArgs;
use siteconf::Config;
use siteconf::error::Result;
use siteconf::links;

/// Execute the `siteconf alternates` command.
///
/// Prints the hreflang alternate links for one page path, `x-default` last.
pub fn cmd_alternates(args: &AlternatesArgs) -> Result<String> {
    let config = Config::load_file(&args.file)?;
    let mut out = String::new();
    for link in links::alternates(&config, &args.path)? {
        out.push_str(&format!("{:12} {}\n", link.hreflang, link.href));
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::{FIXTURE, write_fixture};
    use tempfile::TempDir;

    #[test]
    fn alternates_lists_every_locale_and_x_default() {
        let dir = TempDir::new().unwrap();
        let file = write_fixture(&dir, "nuxt.config.yaml", FIXTURE);

        let out = cmd_alternates(&AlternatesArgs {
            file,
            path: "/blog".to_string(),
        })
        .unwrap();
        assert_eq!(out.lines().count(), 4);
        assert!(out.contains("https://nuxtseo.com/fr/blog"));
        assert!(out.lines().last().unwrap().starts_with("x-default"));
    }
}
