//! Parameter allocation
//!
//! Groups a cleaned token stream into per-key parameter lists. Text seen
//! before the first key lands in the unkeyed entry. Undeclared keys keep
//! their parameters but are also reported as unknown so nothing is lost.


use serde::Serialize;
use std::collections::HashMap;

use crate::profile::{CustomizationProfile, TextComparison};
use crate::tokenizer::{Token, TokenKind};

/// Parameters collected under one key
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AllocationEntry {
    pub key: String,
    pub parameters: Vec<String>,
}

impl AllocationEntry {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            parameters: Vec::new(),
        }
    }
}

/// Outcome of allocating one token stream
#[derive(Debug, Clone, Serialize)]
pub struct AllocationResult {
    /// Keyed entries in first-seen order
    pub entries: Vec<AllocationEntry>,
    pub unknown_keys: Vec<String>,
    /// Keys given more than once; later occurrences are discarded
    pub repeated_keys: Vec<String>,
    pub unkeyed: AllocationEntry,
    #[serde(skip)]
    index: HashMap<String, usize>,
    #[serde(skip)]
    comparison: TextComparison,
}

impl AllocationResult {
    fn new(comparison: TextComparison) -> Self {
        Self {
            entries: Vec::new(),
            unknown_keys: Vec::new(),
            repeated_keys: Vec::new(),
            unkeyed: AllocationEntry::default(),
            index: HashMap::new(),
            comparison,
        }
    }

    /// Entry for `key` under the profile comparison mode
    pub fn entry(&self, key: &str) -> Option<&AllocationEntry> {
        self.index
            .get(&self.comparison.normalize(key))
            .map(|&i| &self.entries[i])
    }

    /// First entry matching any of `keys`, in the order the keys are given
    pub fn find_any<S: AsRef<str>>(&self, keys: &[S]) -> Option<&AllocationEntry> {
        keys.iter().find_map(|k| self.entry(k.as_ref()))
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entry(key).is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty() && self.unkeyed.parameters.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Target {
    Unkeyed,
    Entry(usize),
    Discard,
}

/// Where the current switch key stands; switches only take assigned values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SwitchState {
    Off,
    AwaitingAssignment,
    Assigned,
}

struct Allocator {
    result: AllocationResult,
    declared: Vec<String>,
    switches: Vec<String>,
    target: Target,
    switch: SwitchState,
    pending: Option<String>,
}

impl Allocator {
    /// Push the pending parameter; true when there was one
    fn flush(&mut self) -> bool {
        let Some(parameter) = self.pending.take() else {
            return false;
        };
        match self.target {
            Target::Unkeyed => self.result.unkeyed.parameters.push(parameter),
            Target::Entry(i) => self.result.entries[i].parameters.push(parameter),
            Target::Discard => {
                log::trace!("Discarding parameter '{}' of a repeated key", parameter);
            }
        }
        true
    }

    fn release_switch(&mut self) {
        self.switch = SwitchState::Off;
        self.target = Target::Unkeyed;
    }

    fn append(&mut self, text: &str) {
        if self.switch == SwitchState::AwaitingAssignment {
            self.release_switch();
        }
        match &mut self.pending {
            Some(pending) => pending.push_str(text),
            None => self.pending = Some(text.to_string()),
        }
    }

    fn open_key(&mut self, key: &str) {
        let normalized = self.result.comparison.normalize(key);
        self.switch = if self.switches.contains(&normalized) {
            SwitchState::AwaitingAssignment
        } else {
            SwitchState::Off
        };

        if self.result.index.contains_key(&normalized) {
            log::debug!("Key '{}' given more than once", key);
            self.result.repeated_keys.push(key.to_string());
            self.target = Target::Discard;
            return;
        }

        if !self.declared.contains(&normalized) {
            log::debug!("Key '{}' is not declared", key);
            self.result.unknown_keys.push(key.to_string());
        }

        let position = self.result.entries.len();
        self.result.entries.push(AllocationEntry::new(key));
        self.result.index.insert(normalized, position);
        self.target = Target::Entry(position);
    }
}

/// Allocate `tokens` to the keys they belong to
pub fn allocate<S: AsRef<str>>(
    tokens: &[Token],
    declared_keys: &[S],
    profile: &CustomizationProfile,
) -> AllocationResult {
    allocate_with_switches::<S, &str>(tokens, declared_keys, &[], profile)
}

/// Allocate `tokens`, treating `switch_keys` as keys that take no separate
/// parameters
///
/// A switch only owns a value attached by assignment (`--verbose=false`);
/// text following it as a separate argument is positional and lands in the
/// unkeyed entry.
pub fn allocate_with_switches<S: AsRef<str>, W: AsRef<str>>(
    tokens: &[Token],
    declared_keys: &[S],
    switch_keys: &[W],
    profile: &CustomizationProfile,
) -> AllocationResult {
    let comparison = profile.comparison();
    let mut allocator = Allocator {
        result: AllocationResult::new(comparison),
        declared: declared_keys
            .iter()
            .map(|k| comparison.normalize(k.as_ref()))
            .collect(),
        switches: switch_keys
            .iter()
            .map(|k| comparison.normalize(k.as_ref()))
            .collect(),
        target: Target::Unkeyed,
        switch: SwitchState::Off,
        pending: None,
    };

    // An assignment right after a key (separators aside) just binds the value
    let mut after_key = false;
    let mut i = 0;
    while i < tokens.len() {
        let token = &tokens[i];
        match token.kind {
            TokenKind::KeyPrefix => {
                allocator.flush();
                match tokens.get(i + 1).filter(|t| t.is(TokenKind::Text)) {
                    Some(key) => {
                        allocator.open_key(&key.text);
                        after_key = true;
                        i += 1;
                    }
                    None => {
                        allocator.append(&token.text);
                        after_key = false;
                    }
                }
            }
            TokenKind::Separator => {
                if allocator.flush() && allocator.switch == SwitchState::Assigned {
                    allocator.release_switch();
                }
            }
            TokenKind::Assignment => {
                allocator.flush();
                if after_key {
                    if allocator.switch == SwitchState::AwaitingAssignment {
                        allocator.switch = SwitchState::Assigned;
                    }
                } else {
                    if allocator.switch == SwitchState::AwaitingAssignment {
                        allocator.release_switch();
                    }
                    allocator.result.unkeyed.parameters.push(token.text.clone());
                }
                after_key = false;
            }
            TokenKind::Text | TokenKind::Quoter => {
                allocator.append(&token.text);
                after_key = false;
            }
        }
        i += 1;
    }
    allocator.flush();

    let result = allocator.result;
    log::debug!(
        "Allocated {} keyed entries, {} unkeyed parameters, {} unknown keys",
        result.entries.len(),
        result.unkeyed.parameters.len(),
        result.unknown_keys.len()
    );
    result
}
