//! Runs the front half of a parse and keeps every intermediate result

use serde::Serialize;

use crate::allocator::{allocate, AllocationResult};
use crate::profile::{CustomizationProfile, TextComparison};
use crate::tokenizer::{tokenize, CleanupPipeline, Token};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileSummary {
    pub prefixes: Vec<String>,
    pub quotes: Vec<String>,
    pub assignment: char,
    pub comparison: TextComparison,
}

impl From<&CustomizationProfile> for ProfileSummary {
    fn from(profile: &CustomizationProfile) -> Self {
        Self {
            prefixes: profile.prefixes().to_vec(),
            quotes: profile
                .quotes()
                .iter()
                .map(|q| format!("{}{}", q.open, q.close))
                .collect(),
            assignment: profile.assignment(),
            comparison: profile.comparison(),
        }
    }
}

/// Tokens, cleanup outcome and allocation of one argument list
#[derive(Debug, Clone, Serialize)]
pub struct Inspection {
    pub profile: ProfileSummary,
    pub arguments: Vec<String>,
    pub raw_tokens: Vec<Token>,
    pub tokens: Vec<Token>,
    pub cleanup_error: Option<String>,
    pub allocation: AllocationResult,
}

impl Inspection {
    /// Nothing went wrong and every key was declared
    pub fn is_clean(&self) -> bool {
        self.cleanup_error.is_none()
            && self.allocation.unknown_keys.is_empty()
            && self.allocation.repeated_keys.is_empty()
    }
}

pub fn inspect(
    arguments: &[String],
    declared_keys: &[String],
    profile: &CustomizationProfile,
) -> Inspection {
    let raw_tokens = tokenize(arguments, profile);
    let mut tokens = raw_tokens.clone();
    let cleanup_error = CleanupPipeline::default()
        .run(&mut tokens, profile)
        .err()
        .map(|e| e.to_string());
    let allocation = allocate(&tokens, declared_keys, profile);

    Inspection {
        profile: ProfileSummary::from(profile),
        arguments: arguments.to_vec(),
        raw_tokens,
        tokens,
        cleanup_error,
        allocation,
    }
}
