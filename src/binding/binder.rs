//! Property binder
//!
//! Drives one declared binding from its allocation entry to the member it
//! writes: classify the path, find the entry, convert, validate, write.
//! Every failure is recorded and turned into result flags; the value falls
//! back to the option's default instead of aborting.

use std::any::Any;

use super::error::{ErrorLog, Phase};
use super::path::{PathDefect, PropertyPath};
use super::result::MappingResult;
use crate::allocator::{AllocationEntry, AllocationResult};
use crate::convert::{BindTarget, ConversionError, ConverterRegistry};
use crate::option::{ArgOption, Cardinality, OptionInfo, OptionStyle};

/// Per-parse state shared by every binding
pub struct BindContext<'a> {
    pub allocation: &'a AllocationResult,
    pub converters: &'a mut ConverterRegistry,
    pub errors: &'a mut ErrorLog,
}

/// A declared binding with its member type erased
pub trait Binding<R> {
    /// Dotted member path
    fn path(&self) -> String;

    fn keys(&self) -> &[String];

    fn style(&self) -> OptionStyle;

    fn info(&self) -> OptionInfo;

    /// Bind into `root`, returning this binding's own outcome
    fn bind(&self, root: &mut R, ctx: &mut BindContext<'_>) -> MappingResult;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}

pub struct PropertyBinding<R, T: BindTarget> {
    path: PropertyPath<R, T>,
    option: ArgOption<T>,
}

impl<R, T: BindTarget> std::fmt::Debug for PropertyBinding<R, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PropertyBinding")
            .field("path", &self.path)
            .field("option", &self.option)
            .finish()
    }
}

impl<R, T: BindTarget> PropertyBinding<R, T> {
    pub fn new(path: PropertyPath<R, T>, option: ArgOption<T>) -> Self {
        Self { path, option }
    }

    pub fn property_path(&self) -> &PropertyPath<R, T> {
        &self.path
    }

    pub fn option(&self) -> &ArgOption<T> {
        &self.option
    }

    pub fn option_mut(&mut self) -> &mut ArgOption<T> {
        &mut self.option
    }

    fn fallback(&self, key: &str, ctx: &mut BindContext<'_>, result: &mut MappingResult) -> Option<T> {
        if self.option.is_missing_required() {
            *result |= MappingResult::MISSING_REQUIRED;
            ctx.errors
                .record(Phase::Allocating, Some(key), "required option has no value");
        }
        self.option.fallback()
    }

    fn concatenate(
        &self,
        parameters: &[String],
        converters: &mut ConverterRegistry,
    ) -> Result<T, ConversionError> {
        let Some(combine) = self.option.combiner() else {
            return converters.convert::<T>(parameters);
        };
        if parameters.is_empty() {
            // a concatenated switch still means "on" when given bare
            if OptionStyle::for_target::<T>() == OptionStyle::Switch {
                return converters.convert::<T>(&["true".to_string()]);
            }
            return converters.convert::<T>(parameters);
        }
        let elements = converters.convert_elements::<T::Element>(parameters)?;
        T::from_elements(vec![combine(elements)]).ok_or(ConversionError::Shape {
            type_name: T::type_name(),
            count: 1,
        })
    }

    fn convert_entry(
        &self,
        entry: &AllocationEntry,
        ctx: &mut BindContext<'_>,
        result: &mut MappingResult,
    ) -> Option<T> {
        let key = entry.key.as_str();
        let converted = match self.option.style() {
            OptionStyle::Switch if entry.parameters.is_empty() => {
                ctx.converters.convert::<T>(&["true".to_string()])
            }
            OptionStyle::Switch | OptionStyle::SingleValued => {
                ctx.converters.convert::<T>(&entry.parameters)
            }
            OptionStyle::ConcatenatedSingleValue => {
                self.concatenate(&entry.parameters, ctx.converters)
            }
            OptionStyle::Collection => {
                let count = entry.parameters.len();
                let parameters = match self.option.check_cardinality(count) {
                    Cardinality::Fits => &entry.parameters[..],
                    Cardinality::TooFew { min } => {
                        *result |= MappingResult::TOO_FEW_PARAMETERS;
                        ctx.errors.record(
                            Phase::Allocating,
                            Some(key),
                            format!("expected at least {} parameters, got {}", min, count),
                        );
                        return self.fallback(key, ctx, result);
                    }
                    Cardinality::TooMany { max } => {
                        *result |= MappingResult::TOO_MANY_PARAMETERS;
                        ctx.errors.record(
                            Phase::Allocating,
                            Some(key),
                            format!("expected at most {} parameters, got {}", max, count),
                        );
                        &entry.parameters[..max]
                    }
                };
                ctx.converters.convert::<T>(parameters)
            }
        };

        match converted {
            Ok(value) => Some(value),
            Err(e) => {
                *result |= MappingResult::CONVERSION_FAILED;
                ctx.errors.record(Phase::Converting, Some(key), e.to_string());
                self.fallback(key, ctx, result)
            }
        }
    }

    fn validated(
        &self,
        value: T,
        key: &str,
        ctx: &mut BindContext<'_>,
        result: &mut MappingResult,
    ) -> Option<T> {
        match self.option.run_validators(&value) {
            Ok(()) => Some(value),
            Err(message) => {
                *result |= MappingResult::VALIDATION_FAILED;
                ctx.errors.record(Phase::Validating, Some(key), message);
                self.option.fallback()
            }
        }
    }
}

impl<R: 'static, T: BindTarget> Binding<R> for PropertyBinding<R, T> {
    fn path(&self) -> String {
        self.path.dotted()
    }

    fn keys(&self) -> &[String] {
        self.option.keys()
    }

    fn style(&self) -> OptionStyle {
        self.option.style()
    }

    fn info(&self) -> OptionInfo {
        self.option.info(self.path.dotted())
    }

    fn bind(&self, root: &mut R, ctx: &mut BindContext<'_>) -> MappingResult {
        let primary = self.option.primary_key();

        if let Some(defect) = self.path.classify(root) {
            let (flag, message) = match defect {
                PathDefect::Unsupported(message) => {
                    (MappingResult::UNSUPPORTED_MULTIPLICITY, message)
                }
                PathDefect::Unbound(message) => (MappingResult::UNBOUND, message),
            };
            ctx.errors.record(Phase::Initializing, Some(primary), message);
            log::debug!("{} not bound: {}", self.path.dotted(), flag);
            return flag;
        }

        let mut result = MappingResult::SUCCESS;
        let allocation = ctx.allocation;
        let (key, value) = match allocation.find_any(self.option.keys()) {
            Some(entry) => (
                entry.key.as_str(),
                self.convert_entry(entry, ctx, &mut result),
            ),
            None => {
                result |= MappingResult::NO_KEY_FOUND;
                (primary, self.fallback(primary, ctx, &mut result))
            }
        };

        let value = value.and_then(|v| self.validated(v, key, ctx, &mut result));
        match value {
            Some(value) => {
                if !self.path.write(root, value) {
                    log::warn!("{} could not be reached for writing", self.path.dotted());
                }
            }
            None => log::trace!("No value for {}, leaving it untouched", self.path.dotted()),
        }

        log::debug!("Bound {} via '{}': {}", self.path.dotted(), key, result);
        result
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
