//! Customization profiles
//!
//! A profile captures the lexical conventions used to read an argument list:
//! which prefixes introduce a key, which characters quote text, which
//! character assigns a value inline and how text is compared. A profile is
//! immutable once built and one profile governs a whole parse session.

pub mod config;
pub mod convention;
pub mod error;


pub use convention::Convention;
pub use error::{ProfileError, ProfileResult};

/// How keys and other text are compared
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize)]
pub enum TextComparison {
    #[default]
    CaseSensitive,
    CaseInsensitive,
}

impl TextComparison {
    pub fn equals(self, a: &str, b: &str) -> bool {
        match self {
            Self::CaseSensitive => a == b,
            Self::CaseInsensitive => a.to_lowercase() == b.to_lowercase(),
        }
    }

    /// Canonical form of `text` used for map lookups under this mode
    pub fn normalize(self, text: &str) -> String {
        match self {
            Self::CaseSensitive => text.to_string(),
            Self::CaseInsensitive => text.to_lowercase(),
        }
    }

    pub fn starts_with(self, text: &str, prefix: &str) -> bool {
        match self {
            Self::CaseSensitive => text.starts_with(prefix),
            Self::CaseInsensitive => text.to_lowercase().starts_with(&prefix.to_lowercase()),
        }
    }
}

/// An opening and closing quote character
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct QuotePair {
    pub open: char,
    pub close: char,
}

impl QuotePair {
    pub fn new(open: char, close: char) -> Self {
        Self { open, close }
    }

    /// A pair whose opening and closing characters are the same
    pub fn same(ch: char) -> Self {
        Self { open: ch, close: ch }
    }
}

/// Lexical conventions for one parse session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomizationProfile {
    /// Sorted longest first so overlapping prefixes match greedily
    prefixes: Vec<String>,
    quotes: Vec<QuotePair>,
    assignment: char,
    comparison: TextComparison,
}

impl Default for CustomizationProfile {
    fn default() -> Self {
        Convention::Posix.profile()
    }
}

impl CustomizationProfile {
    pub fn builder() -> ProfileBuilder {
        ProfileBuilder::default()
    }

    /// Assemble a profile from already validated parts
    pub(crate) fn from_parts(
        mut prefixes: Vec<String>,
        quotes: Vec<QuotePair>,
        assignment: char,
        comparison: TextComparison,
    ) -> Self {
        prefixes.sort_by(|a, b| b.chars().count().cmp(&a.chars().count()));
        Self {
            prefixes,
            quotes,
            assignment,
            comparison,
        }
    }

    pub fn prefixes(&self) -> &[String] {
        &self.prefixes
    }

    pub fn quotes(&self) -> &[QuotePair] {
        &self.quotes
    }

    pub fn assignment(&self) -> char {
        self.assignment
    }

    pub fn comparison(&self) -> TextComparison {
        self.comparison
    }

    /// Longest key prefix that `arg` starts with
    pub fn match_prefix(&self, arg: &str) -> Option<&str> {
        self.prefixes
            .iter()
            .find(|prefix| self.comparison.starts_with(arg, prefix))
            .map(String::as_str)
    }

    pub fn is_quote(&self, ch: char) -> bool {
        self.quotes.iter().any(|q| q.open == ch || q.close == ch)
    }

    /// Closing character for a quoter whose text is `open`
    pub fn closing_quote(&self, open: &str) -> Option<char> {
        self.quotes
            .iter()
            .find(|q| self.comparison.equals(&q.open.to_string(), open))
            .map(|q| q.close)
    }
}

/// Builder that validates a hand assembled profile
#[derive(Debug, Clone, Default)]
pub struct ProfileBuilder {
    prefixes: Vec<String>,
    quotes: Vec<QuotePair>,
    assignment: Option<char>,
    comparison: TextComparison,
}

impl ProfileBuilder {
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefixes.push(prefix.into());
        self
    }

    pub fn quote(mut self, ch: char) -> Self {
        self.quotes.push(QuotePair::same(ch));
        self
    }

    pub fn quote_pair(mut self, open: char, close: char) -> Self {
        self.quotes.push(QuotePair::new(open, close));
        self
    }

    pub fn assignment(mut self, ch: char) -> Self {
        self.assignment = Some(ch);
        self
    }

    pub fn comparison(mut self, comparison: TextComparison) -> Self {
        self.comparison = comparison;
        self
    }

    pub fn case_insensitive(self) -> Self {
        self.comparison(TextComparison::CaseInsensitive)
    }

    pub fn build(self) -> ProfileResult<CustomizationProfile> {
        if self.prefixes.is_empty() {
            return Err(ProfileError::NoPrefixes);
        }

        let mut seen: Vec<&str> = Vec::new();
        for prefix in &self.prefixes {
            if prefix.is_empty() {
                return Err(ProfileError::EmptyPrefix);
            }
            if seen.iter().any(|s| self.comparison.equals(s, prefix)) {
                return Err(ProfileError::DuplicatePrefix {
                    prefix: prefix.clone(),
                });
            }
            seen.push(prefix);
        }

        let assignment = self.assignment.unwrap_or('=');
        let quote_clash = self
            .quotes
            .iter()
            .any(|q| q.open == assignment || q.close == assignment);
        let prefix_clash = self
            .prefixes
            .iter()
            .any(|p| p.starts_with(assignment));
        if quote_clash || prefix_clash {
            return Err(ProfileError::AssignmentConflict { ch: assignment });
        }

        Ok(CustomizationProfile::from_parts(
            self.prefixes,
            self.quotes,
            assignment,
            self.comparison,
        ))
    }
}
