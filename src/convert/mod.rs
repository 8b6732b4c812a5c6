//! Text conversion engine
//!
//! A registry of converters keyed by target type. Built-in converters cover
//! numeric, boolean, text and temporal types; enums convert by member name
//! and are registered either up front or on first use depending on the
//! [`EnumRegistration`] policy; custom converters can be added for any type.

pub mod builtin;
pub mod enums;
pub mod error;
pub mod target;
pub mod temporal;

#[cfg(test)]
mod tests;

pub use enums::EnumConverter;
pub use error::ConversionError;
pub use target::{BindTarget, Concatenate, Convertible, Multiplicity, TargetShape};

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::Arc;
use strum::IntoEnumIterator;

use crate::profile::TextComparison;

/// Converts one string into a value of `T`
pub trait TextConverter<T> {
    fn convert(&self, text: &str) -> Result<T, String>;
}

impl<T, F> TextConverter<T> for F
where
    F: Fn(&str) -> Result<T, String>,
{
    fn convert(&self, text: &str) -> Result<T, String> {
        self(text)
    }
}

/// When enum converters come into existence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EnumRegistration {
    /// Only enums registered with [`ConverterRegistry::register_enum`]
    Eager,
    /// Enums register themselves the first time they are converted
    #[default]
    Lazy,
    /// No enum converters at all
    Disabled,
}

/// How a custom converter interacts with an existing one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Precedence {
    /// Keep any converter already registered for the type
    #[default]
    IfAbsent,
    /// Replace whatever is registered, built-in or not
    Override,
}

struct Registered {
    /// Holds an `Arc<dyn TextConverter<T>>`
    converter: Box<dyn Any>,
    builtin: bool,
    type_name: &'static str,
}

/// Type-keyed converter registry for one parse session
pub struct ConverterRegistry {
    converters: HashMap<TypeId, Registered>,
    comparison: TextComparison,
    enum_registration: EnumRegistration,
}

impl std::fmt::Debug for ConverterRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names: Vec<&str> = self.converters.values().map(|r| r.type_name).collect();
        names.sort_unstable();
        f.debug_struct("ConverterRegistry")
            .field("converters", &names)
            .field("comparison", &self.comparison)
            .field("enum_registration", &self.enum_registration)
            .finish()
    }
}

impl Default for ConverterRegistry {
    fn default() -> Self {
        Self::new(TextComparison::default())
    }
}

impl ConverterRegistry {
    /// A registry holding every built-in converter
    pub fn new(comparison: TextComparison) -> Self {
        let mut registry = Self::empty(comparison);
        builtin::install(&mut registry);
        registry
    }

    /// A registry with no converters
    pub fn empty(comparison: TextComparison) -> Self {
        Self {
            converters: HashMap::new(),
            comparison,
            enum_registration: EnumRegistration::default(),
        }
    }

    pub fn with_enum_registration(mut self, policy: EnumRegistration) -> Self {
        self.enum_registration = policy;
        self
    }

    pub fn comparison(&self) -> TextComparison {
        self.comparison
    }

    pub fn enum_registration(&self) -> EnumRegistration {
        self.enum_registration
    }

    pub(crate) fn register_builtin<T, F>(&mut self, converter: F)
    where
        T: 'static,
        F: Fn(&str) -> Result<T, String> + 'static,
    {
        let converter: Arc<dyn TextConverter<T>> = Arc::new(converter);
        self.insert::<T>(converter, true);
    }

    fn insert<T: 'static>(&mut self, converter: Arc<dyn TextConverter<T>>, builtin: bool) {
        self.converters.insert(
            TypeId::of::<T>(),
            Registered {
                converter: Box::new(converter),
                builtin,
                type_name: std::any::type_name::<T>(),
            },
        );
    }

    /// Register a custom converter; returns false when it was not installed
    pub fn register<T, C>(&mut self, converter: C, precedence: Precedence) -> bool
    where
        T: 'static,
        C: TextConverter<T> + 'static,
    {
        if precedence == Precedence::IfAbsent && self.contains::<T>() {
            log::debug!(
                "Converter for {} already registered, keeping it",
                std::any::type_name::<T>()
            );
            return false;
        }
        self.insert::<T>(Arc::new(converter), false);
        true
    }

    /// Closure flavoured [`register`](Self::register)
    pub fn register_fn<T, F>(&mut self, converter: F, precedence: Precedence) -> bool
    where
        T: 'static,
        F: Fn(&str) -> Result<T, String> + 'static,
    {
        self.register::<T, F>(converter, precedence)
    }

    /// Register a name based converter for a `strum` enum
    pub fn register_enum<E>(&mut self) -> bool
    where
        E: IntoEnumIterator + AsRef<str> + 'static,
    {
        if self.enum_registration == EnumRegistration::Disabled {
            return false;
        }
        if self.contains::<E>() {
            return true;
        }
        log::trace!("Registering enum converter for {}", std::any::type_name::<E>());
        let converter: Arc<dyn TextConverter<E>> = Arc::new(EnumConverter::<E>::new(self.comparison));
        self.insert::<E>(converter, false);
        true
    }

    pub fn contains<T: 'static>(&self) -> bool {
        self.converters.contains_key(&TypeId::of::<T>())
    }

    pub fn is_builtin<T: 'static>(&self) -> bool {
        self.converters
            .get(&TypeId::of::<T>())
            .is_some_and(|r| r.builtin)
    }

    pub fn get<T: 'static>(&self) -> Option<Arc<dyn TextConverter<T>>> {
        self.converters
            .get(&TypeId::of::<T>())
            .and_then(|r| r.converter.downcast_ref::<Arc<dyn TextConverter<T>>>())
            .cloned()
    }

    pub fn resolve<T: 'static>(&self) -> Result<Arc<dyn TextConverter<T>>, ConversionError> {
        self.get::<T>().ok_or(ConversionError::NoConverter {
            type_name: std::any::type_name::<T>(),
        })
    }

    /// Resolve an enum converter, registering it on first use when allowed
    pub fn resolve_enum<E>(&mut self) -> Result<Arc<dyn TextConverter<E>>, ConversionError>
    where
        E: IntoEnumIterator + AsRef<str> + 'static,
    {
        if let Some(converter) = self.get::<E>() {
            return Ok(converter);
        }
        let type_name = std::any::type_name::<E>();
        match self.enum_registration {
            EnumRegistration::Lazy => {
                self.register_enum::<E>();
                self.resolve::<E>()
            }
            EnumRegistration::Eager => Err(ConversionError::NoConverter { type_name }),
            EnumRegistration::Disabled => Err(ConversionError::EnumsDisabled { type_name }),
        }
    }

    /// Convert every string to an element; fails as a whole on the first bad element
    pub fn convert_elements<E: Convertible>(
        &mut self,
        values: &[String],
    ) -> Result<Vec<E>, ConversionError> {
        let converter = E::resolve(self)?;
        values
            .iter()
            .map(|text| convert_one(converter.as_ref(), text))
            .collect()
    }

    /// Convert `values` into the shape `T` declares
    pub fn convert<T: BindTarget>(&mut self, values: &[String]) -> Result<T, ConversionError> {
        let type_name = T::type_name();
        let shape = T::MULTIPLICITY
            .shape()
            .ok_or(ConversionError::Unsupported { type_name })?;

        match shape {
            TargetShape::Scalar => match values {
                [] => Ok(T::empty()),
                [single] if single.is_empty() => Ok(T::empty()),
                [_] => {
                    let elements = self.convert_elements::<T::Element>(values)?;
                    T::from_elements(elements).ok_or(ConversionError::Shape {
                        type_name,
                        count: 1,
                    })
                }
                _ => Err(ConversionError::Ambiguous {
                    type_name,
                    count: values.len(),
                }),
            },
            TargetShape::Array | TargetShape::List => {
                let elements = self.convert_elements::<T::Element>(values)?;
                let count = elements.len();
                T::from_elements(elements).ok_or(ConversionError::Shape { type_name, count })
            }
        }
    }
}

fn convert_one<E: 'static>(
    converter: &dyn TextConverter<E>,
    text: &str,
) -> Result<E, ConversionError> {
    converter
        .convert(text)
        .map_err(|reason| ConversionError::Invalid {
            text: text.to_string(),
            type_name: std::any::type_name::<E>(),
            reason,
        })
}
