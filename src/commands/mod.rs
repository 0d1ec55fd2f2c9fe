//! Command implementations for siteconf.
//!
//! Each command loads the config file, then renders its report to a
//! `String` so the output can be tested without capturing stdout. This
//! module only routes commands to their handlers.

mod alternates;
mod check;
mod locales;
mod show;

use crate::cli::Command;
use siteconf::error::Result;

/// Dispatch a command to its implementation.
pub fn dispatch(command: Command) -> Result<()> {
    let output = match command {
        Command::Check(args) => check::cmd_check(&args)?,
        Command::Show(args) => show::cmd_show(&args)?,
        Command::Locales(args) => locales::cmd_locales(&args)?,
        Command::Alternates(args) => alternates::cmd_alternates(&args)?,
    };
    print!("{}", output);
    Ok(())
}
