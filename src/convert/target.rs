//! Bindable target types
//!
//! Rust has no runtime reflection, so every type that can receive converted
//! text declares its shape statically: [`Convertible`] for the element type a
//! single string converts to, and [`BindTarget`] for the member type that
//! receives one or many converted elements.

use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::hash::Hash;
use std::path::PathBuf;
use std::sync::Arc;

use super::error::ConversionError;
use super::{ConverterRegistry, TextConverter};

/// Cardinality classification of a bound member
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Multiplicity {
    SingleValue,
    String,
    Array,
    List,
    Unsupported,
}

/// The shape conversion produces for a member
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TargetShape {
    Scalar,
    Array,
    List,
}

impl Multiplicity {
    pub fn shape(self) -> Option<TargetShape> {
        match self {
            Self::SingleValue | Self::String => Some(TargetShape::Scalar),
            Self::Array => Some(TargetShape::Array),
            Self::List => Some(TargetShape::List),
            Self::Unsupported => None,
        }
    }

    pub fn is_collection(self) -> bool {
        matches!(self, Self::Array | Self::List)
    }
}

/// A type a single string converts to
pub trait Convertible: Clone + 'static {
    /// Find the converter for this type
    fn resolve(
        registry: &mut ConverterRegistry,
    ) -> Result<Arc<dyn TextConverter<Self>>, ConversionError> {
        registry.resolve::<Self>()
    }

    /// Presence of a key alone is the value
    fn is_switch() -> bool {
        false
    }
}

/// A member type that receives converted elements
pub trait BindTarget: Clone + 'static {
    type Element: Convertible;

    const MULTIPLICITY: Multiplicity;

    /// Build the member value; `None` when the element count does not fit
    fn from_elements(elements: Vec<Self::Element>) -> Option<Self>;

    /// Value for an empty or absent scalar, or a collection with no elements
    fn empty() -> Self;

    fn type_name() -> &'static str {
        std::any::type_name::<Self>()
    }
}

/// Combines several converted values into one
pub trait Concatenate: Sized {
    fn concatenate(values: Vec<Self>) -> Self;
}

/// Implement [`BindTarget`] as a single value for types that are their own element
#[macro_export]
macro_rules! scalar_target {
    ($($t:ty),+ $(,)?) => {
        $(
            impl $crate::convert::BindTarget for $t {
                type Element = $t;

                const MULTIPLICITY: $crate::convert::Multiplicity =
                    $crate::convert::Multiplicity::SingleValue;

                fn from_elements(mut elements: Vec<$t>) -> Option<Self> {
                    if elements.len() == 1 {
                        elements.pop()
                    } else {
                        None
                    }
                }

                fn empty() -> Self {
                    <$t as Default>::default()
                }
            }
        )+
    };
}

/// Make a `strum` enum bindable by member name
///
/// The type must derive `EnumIter`, `AsRefStr`, `Clone` and `Default`.
#[macro_export]
macro_rules! enum_target {
    ($($t:ty),+ $(,)?) => {
        $(
            impl $crate::convert::Convertible for $t {
                fn resolve(
                    registry: &mut $crate::convert::ConverterRegistry,
                ) -> Result<
                    std::sync::Arc<dyn $crate::convert::TextConverter<Self>>,
                    $crate::convert::ConversionError,
                > {
                    registry.resolve_enum::<$t>()
                }
            }

            $crate::scalar_target!($t);
        )+
    };
}

macro_rules! convertible {
    ($($t:ty),+ $(,)?) => {
        $( impl Convertible for $t {} )+
    };
}

convertible!(
    i8,
    i16,
    i32,
    i64,
    i128,
    isize,
    u8,
    u16,
    u32,
    u64,
    u128,
    usize,
    f32,
    f64,
    char,
    String,
    PathBuf,
    std::time::Duration,
    chrono::Duration,
    chrono::NaiveDate,
    chrono::NaiveTime,
    chrono::NaiveDateTime,
    chrono::DateTime<chrono::Utc>,
    chrono::DateTime<chrono::FixedOffset>,
);

impl Convertible for bool {
    fn is_switch() -> bool {
        true
    }
}

scalar_target!(
    bool,
    i8,
    i16,
    i32,
    i64,
    i128,
    isize,
    u8,
    u16,
    u32,
    u64,
    u128,
    usize,
    f32,
    f64,
    char,
    PathBuf,
    std::time::Duration,
    chrono::Duration,
    chrono::NaiveDate,
    chrono::NaiveTime,
    chrono::NaiveDateTime,
    chrono::DateTime<chrono::Utc>,
    chrono::DateTime<chrono::FixedOffset>,
);

impl BindTarget for String {
    type Element = String;

    const MULTIPLICITY: Multiplicity = Multiplicity::String;

    fn from_elements(mut elements: Vec<String>) -> Option<Self> {
        if elements.len() == 1 {
            elements.pop()
        } else {
            None
        }
    }

    fn empty() -> Self {
        String::new()
    }
}

/// An optional scalar; an empty or absent value is `None`
impl<T: BindTarget<Element = T> + Convertible> BindTarget for Option<T> {
    type Element = T;

    const MULTIPLICITY: Multiplicity = T::MULTIPLICITY;

    fn from_elements(elements: Vec<T>) -> Option<Self> {
        T::from_elements(elements).map(Some)
    }

    fn empty() -> Self {
        None
    }
}

impl<T: Convertible> BindTarget for Vec<T> {
    type Element = T;

    const MULTIPLICITY: Multiplicity = Multiplicity::List;

    fn from_elements(elements: Vec<T>) -> Option<Self> {
        Some(elements)
    }

    fn empty() -> Self {
        Vec::new()
    }
}

impl<T: Convertible> BindTarget for VecDeque<T> {
    type Element = T;

    const MULTIPLICITY: Multiplicity = Multiplicity::List;

    fn from_elements(elements: Vec<T>) -> Option<Self> {
        Some(elements.into())
    }

    fn empty() -> Self {
        VecDeque::new()
    }
}

impl<T: Convertible> BindTarget for Box<[T]> {
    type Element = T;

    const MULTIPLICITY: Multiplicity = Multiplicity::Array;

    fn from_elements(elements: Vec<T>) -> Option<Self> {
        Some(elements.into_boxed_slice())
    }

    fn empty() -> Self {
        Vec::new().into_boxed_slice()
    }
}

impl<T: Convertible + Eq + Hash> BindTarget for HashSet<T> {
    type Element = T;

    const MULTIPLICITY: Multiplicity = Multiplicity::List;

    fn from_elements(elements: Vec<T>) -> Option<Self> {
        Some(elements.into_iter().collect())
    }

    fn empty() -> Self {
        HashSet::new()
    }
}

impl<T: Convertible + Ord> BindTarget for BTreeSet<T> {
    type Element = T;

    const MULTIPLICITY: Multiplicity = Multiplicity::List;

    fn from_elements(elements: Vec<T>) -> Option<Self> {
        Some(elements.into_iter().collect())
    }

    fn empty() -> Self {
        BTreeSet::new()
    }
}

/// Keyed collections take two type parameters and cannot be bound
impl<K: Clone + Eq + Hash + 'static, V: Clone + 'static> BindTarget for HashMap<K, V> {
    type Element = String;

    const MULTIPLICITY: Multiplicity = Multiplicity::Unsupported;

    fn from_elements(_elements: Vec<String>) -> Option<Self> {
        None
    }

    fn empty() -> Self {
        HashMap::new()
    }
}

impl<K: Clone + Ord + 'static, V: Clone + 'static> BindTarget for BTreeMap<K, V> {
    type Element = String;

    const MULTIPLICITY: Multiplicity = Multiplicity::Unsupported;

    fn from_elements(_elements: Vec<String>) -> Option<Self> {
        None
    }

    fn empty() -> Self {
        BTreeMap::new()
    }
}

impl Concatenate for String {
    fn concatenate(values: Vec<Self>) -> Self {
        values.join(" ")
    }
}

impl Concatenate for bool {
    fn concatenate(values: Vec<Self>) -> Self {
        values.into_iter().any(|v| v)
    }
}

macro_rules! or_concatenate {
    ($($t:ty),+ $(,)?) => {
        $(
            impl Concatenate for $t {
                fn concatenate(values: Vec<Self>) -> Self {
                    values.into_iter().fold(0, |acc, v| acc | v)
                }
            }
        )+
    };
}

or_concatenate!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize);
