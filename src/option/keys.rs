//! Key uniqueness across the options of one parser

use crate::profile::TextComparison;

/// Keys already claimed by declared options
#[derive(Debug, Clone, Default)]
pub struct KeyRegistry {
    comparison: TextComparison,
    claimed: Vec<String>,
}

/// Keys split into the ones granted and the ones refused
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyClaim {
    pub accepted: Vec<String>,
    pub rejected: Vec<(String, String)>,
}

impl KeyRegistry {
    pub fn new(comparison: TextComparison) -> Self {
        Self {
            comparison,
            claimed: Vec::new(),
        }
    }

    pub fn is_claimed(&self, key: &str) -> bool {
        let normalized = self.comparison.normalize(key);
        self.claimed.contains(&normalized)
    }

    /// Claim every key not already taken; refused keys carry a reason
    pub fn claim<S: AsRef<str>>(&mut self, proposed: &[S]) -> KeyClaim {
        let mut claim = KeyClaim::default();
        for key in proposed {
            let key = key.as_ref();
            if key.trim().is_empty() {
                claim
                    .rejected
                    .push((key.to_string(), "key cannot be empty".to_string()));
            } else if key.chars().any(char::is_whitespace) {
                claim
                    .rejected
                    .push((key.to_string(), "key cannot contain whitespace".to_string()));
            } else if self.is_claimed(key) {
                claim
                    .rejected
                    .push((key.to_string(), "key is already in use".to_string()));
            } else {
                self.claimed.push(self.comparison.normalize(key));
                claim.accepted.push(key.to_string());
            }
        }
        claim
    }

    /// Every claimed key, normalized
    pub fn keys(&self) -> &[String] {
        &self.claimed
    }

    pub fn clear(&mut self) {
        self.claimed.clear();
    }
}
