//! Composite mapping result
//!
//! A set of outcome flags. `SUCCESS` is the empty set; any flag means the
//! parse must be reported as failed.

use serde::{Serialize, Serializer};
use std::fmt;
use std::ops::{BitOr, BitOrAssign};

#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct MappingResult(u16);

const NAMES: &[(MappingResult, &str)] = &[
    (MappingResult::UNBOUND, "Unbound"),
    (MappingResult::UNSUPPORTED_MULTIPLICITY, "UnsupportedMultiplicity"),
    (MappingResult::NO_KEY_FOUND, "NoKeyFound"),
    (MappingResult::CONVERSION_FAILED, "ConversionFailed"),
    (MappingResult::VALIDATION_FAILED, "ValidationFailed"),
    (MappingResult::TOO_FEW_PARAMETERS, "TooFewParameters"),
    (MappingResult::TOO_MANY_PARAMETERS, "TooManyParameters"),
    (MappingResult::MISSING_REQUIRED, "MissingRequired"),
    (MappingResult::HELP_REQUESTED, "HelpRequested"),
    (MappingResult::UNKNOWN, "Unknown"),
];

impl MappingResult {
    pub const SUCCESS: Self = Self(0);
    pub const UNBOUND: Self = Self(1);
    pub const UNSUPPORTED_MULTIPLICITY: Self = Self(1 << 1);
    pub const NO_KEY_FOUND: Self = Self(1 << 2);
    pub const CONVERSION_FAILED: Self = Self(1 << 3);
    pub const VALIDATION_FAILED: Self = Self(1 << 4);
    pub const TOO_FEW_PARAMETERS: Self = Self(1 << 5);
    pub const TOO_MANY_PARAMETERS: Self = Self(1 << 6);
    pub const MISSING_REQUIRED: Self = Self(1 << 7);
    pub const HELP_REQUESTED: Self = Self(1 << 8);
    pub const UNKNOWN: Self = Self(1 << 9);

    pub const fn bits(self) -> u16 {
        self.0
    }

    pub const fn is_success(self) -> bool {
        self.0 == 0
    }

    /// True when every flag of `other` is set
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub const fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }

    pub const fn combine(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    pub const fn without(self, other: Self) -> Self {
        Self(self.0 & !other.0)
    }

    pub fn insert(&mut self, other: Self) {
        self.0 |= other.0;
    }

    /// Names of the flags that are set, lowest bit first
    pub fn names(self) -> Vec<&'static str> {
        NAMES
            .iter()
            .filter(|(flag, _)| self.contains(*flag))
            .map(|(_, name)| *name)
            .collect()
    }
}

impl BitOr for MappingResult {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.combine(rhs)
    }
}

impl BitOrAssign for MappingResult {
    fn bitor_assign(&mut self, rhs: Self) {
        self.insert(rhs);
    }
}

impl fmt::Display for MappingResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_success() {
            write!(f, "Success")
        } else {
            write!(f, "{}", self.names().join(" | "))
        }
    }
}

impl fmt::Debug for MappingResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MappingResult({})", self)
    }
}

impl Serialize for MappingResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.names())
    }
}
