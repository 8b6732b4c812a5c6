//! Structured error records accumulated during a parse

use serde::Serialize;
use std::fmt;
use strum_macros::{AsRefStr, Display, EnumIter};

/// Stage that produced an error record
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, EnumIter, AsRefStr, Display,
)]
pub enum Phase {
    Tokenizing,
    Initializing,
    Allocating,
    Converting,
    Validating,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorRecord {
    pub phase: Phase,
    pub key: Option<String>,
    pub message: String,
}

impl fmt::Display for ErrorRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.key {
            Some(key) => write!(f, "[{}] {}: {}", self.phase, key, self.message),
            None => write!(f, "[{}] {}", self.phase, self.message),
        }
    }
}

/// Ordered error records of one parse session
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct ErrorLog {
    records: Vec<ErrorRecord>,
}

impl ErrorLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, phase: Phase, key: Option<&str>, message: impl Into<String>) {
        let record = ErrorRecord {
            phase,
            key: key.map(str::to_string),
            message: message.into(),
        };
        log::debug!("{}", record);
        self.records.push(record);
    }

    pub fn push(&mut self, record: ErrorRecord) {
        self.records.push(record);
    }

    pub fn records(&self) -> &[ErrorRecord] {
        &self.records
    }

    pub fn iter(&self) -> impl Iterator<Item = &ErrorRecord> {
        self.records.iter()
    }

    pub fn in_phase(&self, phase: Phase) -> impl Iterator<Item = &ErrorRecord> {
        self.records.iter().filter(move |r| r.phase == phase)
    }

    pub fn for_key<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a ErrorRecord> {
        self.records
            .iter()
            .filter(move |r| r.key.as_deref() == Some(key))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }
}

impl<'a> IntoIterator for &'a ErrorLog {
    type Item = &'a ErrorRecord;
    type IntoIter = std::slice::Iter<'a, ErrorRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
