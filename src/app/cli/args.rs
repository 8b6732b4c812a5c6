//! Command-line arguments of the `optbind` inspection tool

use clap::{ArgAction, Parser, ValueEnum};
use std::path::PathBuf;
use strum::IntoEnumIterator;

use crate::core::logging::LogFormat;
use crate::profile::config::load_default_profile;
use crate::profile::{Convention, CustomizationProfile, ProfileResult};

/// How the inspection report is printed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human readable, coloured when the terminal allows
    #[default]
    Text,
    /// One JSON document
    Json,
}

#[derive(Parser, Debug, Clone)]
#[command(name = "optbind")]
#[command(about = "Show how a command line is tokenized and allocated to keys")]
#[command(version, long_version = crate::core::version::long_version())]
#[command(after_help = "Arguments after -- are inspected, e.g. optbind -k name -- --name \"a b\"")]
pub struct Args {
    /// Named lexical convention
    #[arg(
        short = 'c',
        long = "convention",
        value_name = "NAME",
        value_parser = Convention::iter().map(|c| c.to_string()).collect::<Vec<_>>(),
        conflicts_with = "profile"
    )]
    pub convention: Option<String>,

    /// TOML profile file
    #[arg(short = 'p', long = "profile", value_name = "FILE")]
    pub profile: Option<PathBuf>,

    /// Keys to treat as declared (comma-separated or repeated)
    #[arg(short = 'k', long = "key", value_name = "KEYS", value_delimiter = ',', action = ArgAction::Append)]
    pub keys: Vec<String>,

    /// Report format
    #[arg(long = "format", value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Force coloured output
    #[arg(long = "color", conflicts_with = "no_color")]
    pub color: bool,

    /// Disable coloured output
    #[arg(long = "no-color")]
    pub no_color: bool,

    /// Log level
    #[arg(short = 'l', long = "log-level", value_name = "LEVEL", value_parser = ["trace", "debug", "info", "warn", "error", "off"])]
    pub log_level: Option<String>,

    /// Log file path
    #[arg(short = 'f', long = "log-file", value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Log output format
    #[arg(short = 'o', long = "log-format", value_name = "FORMAT", value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,

    /// Arguments to inspect
    #[arg(last = true, value_name = "ARGS")]
    pub inspect: Vec<String>,
}

impl Args {
    /// Profile to inspect with: explicit file, then convention, then the
    /// user's default profile file, then POSIX
    pub fn resolve_profile(&self) -> ProfileResult<CustomizationProfile> {
        if let Some(path) = &self.profile {
            return CustomizationProfile::load(path);
        }
        if let Some(name) = &self.convention {
            return CustomizationProfile::from_name_or_path(name);
        }
        Ok(load_default_profile()?.unwrap_or_default())
    }

    /// Colour when forced, or when stdout is a terminal and not disabled
    pub fn use_color(&self) -> bool {
        use std::io::IsTerminal;

        if self.no_color {
            false
        } else {
            self.color || std::io::stdout().is_terminal()
        }
    }
}
