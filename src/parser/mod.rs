//! Parse session
//!
//! A [`Parser`] owns the profile, converters and declared bindings for one
//! target type and runs the stages in order on every call to
//! [`Parser::parse`]: tokenize, clean up, allocate, bind.


use serde::Serialize;

use crate::allocator::{allocate_with_switches, AllocationResult};
use crate::binding::{
    BindContext, Binding, ErrorLog, ErrorRecord, MappingResult, Phase, PropertyBinding,
    PropertyPath,
};
use crate::convert::{BindTarget, ConverterRegistry, EnumRegistration};
use crate::option::{ArgOption, KeyRegistry, OptionInfo, OptionStyle};
use crate::profile::CustomizationProfile;
use crate::tokenizer::{tokenize, CleanupPipeline, Token};

/// Keys that request help unless changed with [`Parser::with_help_keys`]
pub const DEFAULT_HELP_KEYS: &[&str] = &["help", "h", "?"];

/// Outcome of one binding during a parse
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BindingReport {
    pub path: String,
    pub keys: Vec<String>,
    pub result: MappingResult,
}

/// Everything one parse produced besides the mutated target
#[derive(Debug, Clone, Serialize)]
pub struct ParseOutcome {
    /// Union of every binding's flags, without `NoKeyFound`
    pub result: MappingResult,
    pub reports: Vec<BindingReport>,
    pub errors: ErrorLog,
    pub tokens: Vec<Token>,
    pub allocation: AllocationResult,
}

impl ParseOutcome {
    /// No flags and no error records
    pub fn is_success(&self) -> bool {
        self.result.is_success() && self.errors.is_empty()
    }

    pub fn help_requested(&self) -> bool {
        self.result.contains(MappingResult::HELP_REQUESTED)
    }

    /// Parameters given before any key
    pub fn unkeyed(&self) -> &[String] {
        &self.allocation.unkeyed.parameters
    }

    pub fn report(&self, path: &str) -> Option<&BindingReport> {
        self.reports.iter().find(|r| r.path == path)
    }
}

pub struct Parser<R> {
    profile: CustomizationProfile,
    cleanup: CleanupPipeline,
    converters: ConverterRegistry,
    keys: KeyRegistry,
    bindings: Vec<Box<dyn Binding<R>>>,
    help_keys: Vec<String>,
    declaration_errors: Vec<ErrorRecord>,
    declaration_result: MappingResult,
}

impl<R: 'static> Default for Parser<R> {
    fn default() -> Self {
        Self::new(CustomizationProfile::default())
    }
}

impl<R> std::fmt::Debug for Parser<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Parser")
            .field("profile", &self.profile)
            .field("cleanup", &self.cleanup.stage_names())
            .field("bindings", &self.bindings.len())
            .field("help_keys", &self.help_keys)
            .finish()
    }
}

impl<R: 'static> Parser<R> {
    pub fn new(profile: CustomizationProfile) -> Self {
        let comparison = profile.comparison();
        Self {
            profile,
            cleanup: CleanupPipeline::default(),
            converters: ConverterRegistry::new(comparison),
            keys: KeyRegistry::new(comparison),
            bindings: Vec::new(),
            help_keys: DEFAULT_HELP_KEYS.iter().map(|k| k.to_string()).collect(),
            declaration_errors: Vec::new(),
            declaration_result: MappingResult::SUCCESS,
        }
    }

    pub fn with_cleanup(mut self, cleanup: CleanupPipeline) -> Self {
        self.cleanup = cleanup;
        self
    }

    pub fn with_help_keys<S: AsRef<str>>(mut self, keys: &[S]) -> Self {
        self.help_keys = keys.iter().map(|k| k.as_ref().to_string()).collect();
        self
    }

    pub fn with_enum_registration(mut self, policy: EnumRegistration) -> Self {
        let converters = std::mem::take(&mut self.converters);
        self.converters = converters.with_enum_registration(policy);
        self
    }

    pub fn profile(&self) -> &CustomizationProfile {
        &self.profile
    }

    pub fn help_keys(&self) -> &[String] {
        &self.help_keys
    }

    /// Register custom converters here before parsing
    pub fn converters_mut(&mut self) -> &mut ConverterRegistry {
        &mut self.converters
    }

    fn declaration_failure(&mut self, flag: MappingResult, key: Option<&str>, message: String) {
        log::debug!("Declaration failed ({}): {}", flag, message);
        self.declaration_result |= flag;
        self.declaration_errors.push(ErrorRecord {
            phase: Phase::Initializing,
            key: key.map(str::to_string),
            message,
        });
    }

    /// Declare a binding; returns its option handle, or `None` when it
    /// cannot be bound
    ///
    /// With no proposed keys the leaf member name becomes the key. Keys
    /// already taken by an earlier binding are refused; if none remain the
    /// binding is dropped as unbound.
    pub fn bind<T, S>(&mut self, path: PropertyPath<R, T>, keys: &[S]) -> Option<&mut ArgOption<T>>
    where
        T: BindTarget,
        S: AsRef<str>,
    {
        let dotted = path.dotted();

        if let Some(defect) = path.leaf_defect() {
            self.declaration_failure(
                MappingResult::UNSUPPORTED_MULTIPLICITY,
                None,
                format!("{}: {}", dotted, defect.message()),
            );
            return None;
        }

        let proposed: Vec<String> = if keys.is_empty() {
            vec![path.leaf().name.clone()]
        } else {
            keys.iter().map(|k| k.as_ref().to_string()).collect()
        };

        let claim = self.keys.claim(&proposed);
        for (key, reason) in claim.rejected {
            self.declaration_errors.push(ErrorRecord {
                phase: Phase::Initializing,
                key: Some(key),
                message: format!("{} ({})", reason, dotted),
            });
        }
        if claim.accepted.is_empty() {
            self.declaration_failure(
                MappingResult::UNBOUND,
                None,
                format!("{} has no usable keys", dotted),
            );
            return None;
        }

        log::debug!("Binding {} to keys {:?}", dotted, claim.accepted);
        let binding = PropertyBinding::new(path, ArgOption::<T>::new(claim.accepted));
        self.bindings.push(Box::new(binding));
        self.bindings
            .last_mut()?
            .as_any_mut()
            .downcast_mut::<PropertyBinding<R, T>>()
            .map(PropertyBinding::option_mut)
    }

    /// Descriptions of every declared option, in declaration order
    pub fn options(&self) -> Vec<OptionInfo> {
        self.bindings.iter().map(|b| b.info()).collect()
    }

    /// Every key the allocator should treat as known
    pub fn declared_keys(&self) -> Vec<String> {
        self.bindings
            .iter()
            .flat_map(|b| b.keys().iter().cloned())
            .chain(self.help_keys.iter().cloned())
            .collect()
    }

    /// Keys that take no separate parameters: switch bindings, plus help
    /// keys no binding has taken over
    pub fn switch_keys(&self) -> Vec<String> {
        let comparison = self.profile.comparison();
        let bound: Vec<String> = self
            .bindings
            .iter()
            .flat_map(|b| b.keys().iter().map(|k| comparison.normalize(k)))
            .collect();
        self.bindings
            .iter()
            .filter(|b| b.style() == OptionStyle::Switch)
            .flat_map(|b| b.keys().iter().cloned())
            .chain(
                self.help_keys
                    .iter()
                    .filter(|k| !bound.contains(&comparison.normalize(k)))
                    .cloned(),
            )
            .collect()
    }

    /// Drop every binding and declaration error
    pub fn reset(&mut self) {
        self.bindings.clear();
        self.keys.clear();
        self.declaration_errors.clear();
        self.declaration_result = MappingResult::SUCCESS;
    }

    /// Parse `args` into `root`
    pub fn parse<S: AsRef<str>>(&mut self, args: &[S], root: &mut R) -> ParseOutcome {
        let mut errors = ErrorLog::new();
        for record in &self.declaration_errors {
            errors.push(record.clone());
        }
        let mut result = self.declaration_result;

        let mut tokens = tokenize(args, &self.profile);
        if let Err(e) = self.cleanup.run(&mut tokens, &self.profile) {
            errors.record(Phase::Tokenizing, None, e.to_string());
        }
        log::debug!("{} tokens after cleanup", tokens.len());

        let allocation = allocate_with_switches(
            &tokens,
            &self.declared_keys(),
            &self.switch_keys(),
            &self.profile,
        );
        for key in &allocation.unknown_keys {
            result |= MappingResult::UNKNOWN;
            errors.record(Phase::Allocating, Some(key.as_str()), "unknown key");
        }
        for key in &allocation.repeated_keys {
            errors.record(
                Phase::Allocating,
                Some(key.as_str()),
                "key given more than once, later parameters ignored",
            );
        }
        if allocation.find_any(&self.help_keys).is_some() {
            log::debug!("Help requested");
            result |= MappingResult::HELP_REQUESTED;
        }

        let mut reports = Vec::with_capacity(self.bindings.len());
        let mut ctx = BindContext {
            allocation: &allocation,
            converters: &mut self.converters,
            errors: &mut errors,
        };
        for binding in &self.bindings {
            let outcome = binding.bind(root, &mut ctx);
            result |= outcome.without(MappingResult::NO_KEY_FOUND);
            reports.push(BindingReport {
                path: binding.path(),
                keys: binding.keys().to_vec(),
                result: outcome,
            });
        }

        log::info!(
            "Parsed {} arguments into {} bindings: {}",
            args.len(),
            reports.len(),
            result
        );
        ParseOutcome {
            result,
            reports,
            errors,
            tokens,
            allocation,
        }
    }

    /// Parse the process arguments, skipping the program name
    pub fn parse_env(&mut self, root: &mut R) -> ParseOutcome {
        let args: Vec<String> = std::env::args().skip(1).collect();
        self.parse(&args, root)
    }
}
