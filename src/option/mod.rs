//! Option model
//!
//! Per-binding declarative settings: accepted keys, style, requiredness,
//! default, argument-count bounds for collections, validators, and how
//! several single-value parameters are folded into one value.

pub mod keys;
pub mod validators;


pub use keys::KeyRegistry;
pub use validators::Validator;

use serde::Serialize;
use strum_macros::{AsRefStr, Display, EnumIter};

use crate::convert::{BindTarget, Concatenate, Convertible, Multiplicity};

/// How an option consumes its parameters
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, EnumIter, AsRefStr, Display,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum OptionStyle {
    /// Presence alone sets the value
    Switch,
    SingleValued,
    /// Several parameters folded into one value
    ConcatenatedSingleValue,
    Collection,
}

impl OptionStyle {
    /// Style implied by a member type
    pub fn for_target<T: BindTarget>() -> Self {
        if T::MULTIPLICITY.is_collection() {
            Self::Collection
        } else if T::Element::is_switch() {
            Self::Switch
        } else {
            Self::SingleValued
        }
    }
}

/// Outcome of checking a parameter count against the bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cardinality {
    Fits,
    TooFew { min: usize },
    TooMany { max: usize },
}

type Combiner<E> = fn(Vec<E>) -> E;

/// Settings for one bound member
pub struct ArgOption<T: BindTarget> {
    keys: Vec<String>,
    style: OptionStyle,
    required: bool,
    default: Option<T>,
    min_args: usize,
    max_args: Option<usize>,
    validators: Vec<Box<dyn Validator<T>>>,
    combiner: Option<Combiner<T::Element>>,
    description: Option<String>,
}

impl<T: BindTarget> std::fmt::Debug for ArgOption<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArgOption")
            .field("keys", &self.keys)
            .field("style", &self.style)
            .field("required", &self.required)
            .field("has_default", &self.default.is_some())
            .field("min_args", &self.min_args)
            .field("max_args", &self.max_args)
            .field("validators", &self.validators.len())
            .finish()
    }
}

impl<T: BindTarget> ArgOption<T> {
    pub fn new(keys: Vec<String>) -> Self {
        Self {
            keys,
            style: OptionStyle::for_target::<T>(),
            required: false,
            default: None,
            min_args: 0,
            max_args: None,
            validators: Vec::new(),
            combiner: None,
            description: None,
        }
    }

    /// The option must be present on the command line
    ///
    /// Switches are never required; the call is ignored for them.
    pub fn required(&mut self) -> &mut Self {
        if self.style == OptionStyle::Switch {
            log::warn!("Switch {} cannot be required, ignoring", self.primary_key());
        } else {
            self.required = true;
        }
        self
    }

    pub fn optional(&mut self) -> &mut Self {
        self.required = false;
        self
    }

    /// Value written when the key is absent or its parameters are rejected
    pub fn default_value(&mut self, value: T) -> &mut Self {
        self.default = Some(value);
        self
    }

    /// Bounds on the number of parameters a collection accepts
    pub fn argument_count(&mut self, min: usize, max: Option<usize>) -> &mut Self {
        if self.style != OptionStyle::Collection {
            log::warn!(
                "Argument count only applies to collections, ignoring it for {}",
                self.primary_key()
            );
            return self;
        }
        if max.is_some_and(|max| max < min) {
            log::warn!(
                "Argument count for {} has max below min ({} < {}), ignoring",
                self.primary_key(),
                max.unwrap_or_default(),
                min
            );
            return self;
        }
        self.min_args = min;
        self.max_args = max;
        self
    }

    pub fn validate<V>(&mut self, validator: V) -> &mut Self
    where
        V: Validator<T> + 'static,
    {
        self.validators.push(Box::new(validator));
        self
    }

    pub fn describe(&mut self, text: impl Into<String>) -> &mut Self {
        self.description = Some(text.into());
        self
    }

    /// Fold several parameters into one value with `combine`
    pub fn concatenate_with(&mut self, combine: Combiner<T::Element>) -> &mut Self {
        if self.style == OptionStyle::Collection {
            log::warn!(
                "Collection {} cannot be concatenated, ignoring",
                self.primary_key()
            );
            return self;
        }
        self.combiner = Some(combine);
        self.style = OptionStyle::ConcatenatedSingleValue;
        self
    }

    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    pub fn primary_key(&self) -> &str {
        self.keys.first().map(String::as_str).unwrap_or_default()
    }

    pub fn style(&self) -> OptionStyle {
        self.style
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn default_ref(&self) -> Option<&T> {
        self.default.as_ref()
    }

    pub fn min_args(&self) -> usize {
        self.min_args
    }

    pub fn max_args(&self) -> Option<usize> {
        self.max_args
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub(crate) fn combiner(&self) -> Option<Combiner<T::Element>> {
        self.combiner
    }

    /// Value to fall back to; switches fall back to off
    pub fn fallback(&self) -> Option<T> {
        match (&self.default, self.style) {
            (Some(value), _) => Some(value.clone()),
            (None, OptionStyle::Switch) => Some(T::empty()),
            (None, _) => None,
        }
    }

    /// Missing when required and nothing can stand in
    pub fn is_missing_required(&self) -> bool {
        self.required && self.default.is_none()
    }

    pub fn check_cardinality(&self, count: usize) -> Cardinality {
        if count < self.min_args {
            Cardinality::TooFew { min: self.min_args }
        } else {
            match self.max_args {
                Some(max) if count > max => Cardinality::TooMany { max },
                _ => Cardinality::Fits,
            }
        }
    }

    /// Run every validator, stopping at the first failure
    pub fn run_validators(&self, value: &T) -> Result<(), String> {
        self.validators.iter().try_for_each(|v| v.validate(value))
    }

    pub fn info(&self, path: impl Into<String>) -> OptionInfo {
        OptionInfo {
            path: path.into(),
            keys: self.keys.clone(),
            style: self.style,
            multiplicity: T::MULTIPLICITY,
            type_name: T::type_name(),
            required: self.required,
            has_default: self.default.is_some(),
            min_args: self.min_args,
            max_args: self.max_args,
            validators: self.validators.len(),
            description: self.description.clone(),
        }
    }
}

impl<T> ArgOption<T>
where
    T: BindTarget,
    T::Element: Concatenate,
{
    /// Fold several parameters using the element type's own rule
    pub fn concatenated(&mut self) -> &mut Self {
        self.concatenate_with(<T::Element as Concatenate>::concatenate)
    }
}

/// Serializable description of a declared option
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OptionInfo {
    pub path: String,
    pub keys: Vec<String>,
    pub style: OptionStyle,
    pub multiplicity: Multiplicity,
    pub type_name: &'static str,
    pub required: bool,
    pub has_default: bool,
    pub min_args: usize,
    pub max_args: Option<usize>,
    pub validators: usize,
    pub description: Option<String>,
}
