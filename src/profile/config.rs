//! TOML profile files
//!
//! A profile file either starts from a named convention and overrides some of
//! its settings, or spells out every setting itself:
//!
//! ```toml
//! convention = "windows"
//! case_sensitive = true
//! ```
//!
//! ```toml
//! prefixes = ["--", "-"]
//! quotes = ['"', ["<", ">"]]
//! assignment = "="
//! case_sensitive = false
//! ```

use serde::Deserialize;
use std::path::{Path, PathBuf};

use super::error::{ProfileError, ProfileResult};
use super::{Convention, CustomizationProfile, ProfileBuilder, TextComparison};

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum QuoteEntry {
    Same(String),
    Pair(String, String),
}

/// Raw contents of a profile file
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProfileConfig {
    convention: Option<Convention>,
    prefixes: Option<Vec<String>>,
    quotes: Option<Vec<QuoteEntry>>,
    assignment: Option<String>,
    case_sensitive: Option<bool>,
}

fn single_char(value: &str) -> Option<char> {
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(ch), None) => Some(ch),
        _ => None,
    }
}

impl ProfileConfig {
    pub fn from_toml_str(contents: &str) -> ProfileResult<Self> {
        toml::from_str(contents).map_err(|e| ProfileError::Parse {
            message: e.to_string(),
        })
    }

    /// Resolve the file contents into a validated profile
    pub fn into_profile(self) -> ProfileResult<CustomizationProfile> {
        let base = self.convention.unwrap_or(Convention::Posix).profile();

        let mut builder = ProfileBuilder::default();

        let prefixes = self
            .prefixes
            .unwrap_or_else(|| base.prefixes().to_vec());
        for prefix in prefixes {
            builder = builder.prefix(prefix);
        }

        match self.quotes {
            Some(entries) => {
                for entry in entries {
                    builder = match entry {
                        QuoteEntry::Same(value) => {
                            let ch = single_char(&value)
                                .ok_or(ProfileError::InvalidQuote { value })?;
                            builder.quote(ch)
                        }
                        QuoteEntry::Pair(open, close) => {
                            let open_ch = single_char(&open)
                                .ok_or(ProfileError::InvalidQuote { value: open })?;
                            let close_ch = single_char(&close)
                                .ok_or(ProfileError::InvalidQuote { value: close })?;
                            builder.quote_pair(open_ch, close_ch)
                        }
                    };
                }
            }
            None => {
                for pair in base.quotes() {
                    builder = builder.quote_pair(pair.open, pair.close);
                }
            }
        }

        let assignment = match self.assignment {
            Some(value) => {
                single_char(&value).ok_or(ProfileError::InvalidAssignment { value })?
            }
            None => base.assignment(),
        };
        builder = builder.assignment(assignment);

        let comparison = match self.case_sensitive {
            Some(true) => TextComparison::CaseSensitive,
            Some(false) => TextComparison::CaseInsensitive,
            None => base.comparison(),
        };

        builder.comparison(comparison).build()
    }
}

impl CustomizationProfile {
    /// Parse a profile from TOML text
    pub fn from_toml_str(contents: &str) -> ProfileResult<Self> {
        ProfileConfig::from_toml_str(contents)?.into_profile()
    }

    /// Load a profile from a TOML file
    pub fn load(path: &Path) -> ProfileResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|source| ProfileError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        log::debug!("Loading profile from {}", path.display());
        Self::from_toml_str(&contents)
    }

    /// Resolve a convention name or fall back to a profile file path
    pub fn from_name_or_path(value: &str) -> ProfileResult<Self> {
        if let Ok(convention) = value.parse::<Convention>() {
            return Ok(convention.profile());
        }
        let path = Path::new(value);
        if path.exists() {
            return Self::load(path);
        }
        Err(ProfileError::UnknownConvention {
            name: value.to_string(),
        })
    }
}

/// Location of the per-user default profile, whether or not it exists
pub fn default_profile_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("optbind").join("profile.toml"))
}

/// Load the per-user default profile if one is present
pub fn load_default_profile() -> ProfileResult<Option<CustomizationProfile>> {
    match default_profile_path() {
        Some(path) if path.exists() => CustomizationProfile::load(&path).map(Some),
        _ => Ok(None),
    }
}
