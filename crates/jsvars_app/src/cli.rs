use std::env;
use std::ffi::OsStr;
use std::num::NonZeroUsize;

use clap::{ArgAction, Parser};
use jsvars_core::{ScanSettings, DEFAULT_CONCURRENCY};

use crate::report::Palette;

/// Fetch scripts and list their `var`/`let`/`const` declarations.
///
/// URLs are taken from the arguments, or one per line from standard input
/// when none are given.
#[derive(Debug, Parser)]
#[command(name = "jsvars", version)]
pub struct Cli {
    /// URLs to scan.
    #[arg(value_name = "URLS")]
    pub urls: Vec<String>,

    /// Only report variables with exactly this name.
    #[arg(long = "var", value_name = "NAME")]
    pub var: Option<String>,

    /// Number of concurrent workers.
    #[arg(
        short,
        long,
        env = "JSVARS_CONCURRENCY",
        default_value_t = DEFAULT_CONCURRENCY
    )]
    pub concurrency: NonZeroUsize,

    /// Disable ANSI colors in the report. Any non-empty NO_COLOR disables them too.
    #[arg(long)]
    pub no_color: bool,

    /// Increase log verbosity on stderr (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

/// NO_COLOR convention: set to anything but the empty string means no color.
fn color_disabled(flag: bool, no_color_env: Option<&OsStr>) -> bool {
    flag || no_color_env.is_some_and(|value| !value.is_empty())
}

impl Cli {
    pub fn scan_settings(&self) -> ScanSettings {
        ScanSettings::new(self.concurrency, self.var.clone())
    }

    pub fn palette(&self) -> Palette {
        if color_disabled(self.no_color, env::var_os("NO_COLOR").as_deref()) {
            Palette::plain()
        } else {
            Palette::ansi()
        }
    }
}
