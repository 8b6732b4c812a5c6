//! Named lexical conventions

use serde::Deserialize;
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

use super::{CustomizationProfile, QuotePair, TextComparison};

/// A small fixed set of well known command line conventions
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, EnumIter, EnumString, AsRefStr, Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Convention {
    /// `--long`, `-s`, `--key=value`, case-sensitive
    Posix,
    /// `/key`, `-key`, `--key`, `/key:value`, case-insensitive
    Windows,
    /// `/key`, `/key:value`, case-insensitive
    Dos,
}

impl Convention {
    pub fn profile(self) -> CustomizationProfile {
        match self {
            Self::Posix => CustomizationProfile::from_parts(
                vec!["--".to_string(), "-".to_string()],
                vec![QuotePair::same('"'), QuotePair::same('\'')],
                '=',
                TextComparison::CaseSensitive,
            ),
            Self::Windows => CustomizationProfile::from_parts(
                vec!["/".to_string(), "--".to_string(), "-".to_string()],
                vec![QuotePair::same('"')],
                ':',
                TextComparison::CaseInsensitive,
            ),
            Self::Dos => CustomizationProfile::from_parts(
                vec!["/".to_string()],
                vec![QuotePair::same('"')],
                ':',
                TextComparison::CaseInsensitive,
            ),
        }
    }
}

impl From<Convention> for CustomizationProfile {
    fn from(convention: Convention) -> Self {
        convention.profile()
    }
}
