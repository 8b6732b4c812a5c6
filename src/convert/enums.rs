//! Name based enum conversion

use std::marker::PhantomData;
use strum::IntoEnumIterator;

use super::TextConverter;
use crate::profile::TextComparison;

/// Converts member names of a `strum` enum back into members
#[derive(Debug)]
pub struct EnumConverter<E> {
    comparison: TextComparison,
    _members: PhantomData<fn() -> E>,
}

impl<E> EnumConverter<E> {
    pub fn new(comparison: TextComparison) -> Self {
        Self {
            comparison,
            _members: PhantomData,
        }
    }
}

impl<E: IntoEnumIterator + AsRef<str>> TextConverter<E> for EnumConverter<E> {
    fn convert(&self, text: &str) -> Result<E, String> {
        let trimmed = text.trim();
        E::iter()
            .find(|member| self.comparison.equals(member.as_ref(), trimmed))
            .ok_or_else(|| {
                let names: Vec<String> = E::iter().map(|m| m.as_ref().to_string()).collect();
                format!("expected one of: {}", names.join(", "))
            })
    }
}
