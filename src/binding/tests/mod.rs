//! Tests for the property binder


use crate::allocator::{allocate, AllocationResult};
use crate::binding::*;
use crate::convert::{BindTarget, ConverterRegistry};
use crate::option::validators::in_range;
use crate::option::{ArgOption, OptionStyle};
use crate::profile::CustomizationProfile;
use crate::tokenizer::{tokenize, CleanupPipeline};
use std::collections::HashMap;

#[derive(Debug, Default, Clone, PartialEq)]
pub(super) struct Child {
    pub level: i32,
    pub names: Vec<String>,
}

/// No default; absent instances cannot be built
#[derive(Debug, Clone, PartialEq)]
pub(super) struct Sealed {
    pub value: i32,
}

#[derive(Debug, Default)]
pub(super) struct Inner {
    pub child: Option<Child>,
}

#[derive(Debug, Default)]
pub(super) struct Root {
    pub count: i32,
    pub verbose: bool,
    pub values: Vec<i32>,
    pub message: String,
    pub child: Option<Child>,
    pub sealed: Option<Sealed>,
    pub inner: Inner,
    pub map: HashMap<String, String>,
}

fn allocation(args: &[&str], declared: &[&str]) -> AllocationResult {
    let profile = CustomizationProfile::default();
    let mut tokens = tokenize(args, &profile);
    CleanupPipeline::default().run(&mut tokens, &profile).unwrap();
    allocate(&tokens, declared, &profile)
}

fn keys(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

fn run<T: BindTarget>(
    binding: &PropertyBinding<Root, T>,
    root: &mut Root,
    args: &[&str],
) -> (MappingResult, ErrorLog) {
    let declared: Vec<&str> = binding.keys().iter().map(String::as_str).collect();
    let allocation = allocation(args, &declared);
    let mut converters = ConverterRegistry::default();
    let mut errors = ErrorLog::new();
    let mut ctx = BindContext {
        allocation: &allocation,
        converters: &mut converters,
        errors: &mut errors,
    };
    let result = binding.bind(root, &mut ctx);
    (result, errors)
}

fn count_binding() -> PropertyBinding<Root, i32> {
    PropertyBinding::new(
        Path::root().field(Field::new("count", |r: &mut Root, v: i32| r.count = v)),
        ArgOption::new(keys(&["n", "count"])),
    )
}

fn values_binding() -> PropertyBinding<Root, Vec<i32>> {
    PropertyBinding::new(
        Path::root().field(Field::new("values", |r: &mut Root, v: Vec<i32>| r.values = v)),
        ArgOption::new(keys(&["x"])),
    )
}

#[test]
fn test_scalar_binds() {
    let mut root = Root::default();
    let (result, errors) = run(&count_binding(), &mut root, &["--count", "32"]);
    assert!(result.is_success());
    assert!(errors.is_empty());
    assert_eq!(root.count, 32);
}

#[test]
fn test_collection_collects_in_order() {
    let mut root = Root::default();
    let (result, _) = run(&values_binding(), &mut root, &["-x", "1", "2", "3"]);
    assert!(result.is_success());
    assert_eq!(root.values, vec![1, 2, 3]);
}

#[test]
fn test_absent_key_keeps_default() {
    let mut binding = count_binding();
    binding.option_mut().default_value(7);
    let mut root = Root::default();
    let (result, errors) = run(&binding, &mut root, &["-other"]);
    assert_eq!(result, MappingResult::NO_KEY_FOUND);
    assert!(errors.is_empty());
    assert_eq!(root.count, 7);
}

#[test]
fn test_absent_without_default_leaves_member() {
    let mut root = Root {
        count: 11,
        ..Root::default()
    };
    let (result, _) = run(&count_binding(), &mut root, &[]);
    assert_eq!(result, MappingResult::NO_KEY_FOUND);
    assert_eq!(root.count, 11);
}

#[test]
fn test_required_missing() {
    let mut binding = count_binding();
    binding.option_mut().required();
    let mut root = Root::default();
    let (result, errors) = run(&binding, &mut root, &[]);
    assert!(result.contains(MappingResult::MISSING_REQUIRED));
    assert!(result.contains(MappingResult::NO_KEY_FOUND));
    assert_eq!(errors.in_phase(Phase::Allocating).count(), 1);
}

#[test]
fn test_scalar_ambiguity_keeps_default() {
    let mut binding = count_binding();
    binding.option_mut().default_value(5);
    let mut root = Root::default();
    let (result, errors) = run(&binding, &mut root, &["-n", "32", "64"]);
    assert_eq!(result, MappingResult::CONVERSION_FAILED);
    assert_eq!(root.count, 5);
    assert_eq!(errors.records()[0].phase, Phase::Converting);
    assert_eq!(errors.records()[0].key.as_deref(), Some("n"));
}

#[test]
fn test_conversion_failure_on_required_sets_missing() {
    let mut binding = count_binding();
    binding.option_mut().required();
    let mut root = Root::default();
    let (result, _) = run(&binding, &mut root, &["-n", "abc"]);
    assert_eq!(
        result,
        MappingResult::CONVERSION_FAILED | MappingResult::MISSING_REQUIRED
    );
}

#[test]
fn test_too_few_parameters() {
    let mut binding = values_binding();
    binding.option_mut().argument_count(2, None).default_value(vec![9]);
    let mut root = Root::default();
    let (result, _) = run(&binding, &mut root, &["-x", "32"]);
    assert_eq!(result, MappingResult::TOO_FEW_PARAMETERS);
    assert_eq!(root.values, vec![9]);
}

#[test]
fn test_too_many_parameters_truncates() {
    let mut binding = values_binding();
    binding.option_mut().argument_count(0, Some(0));
    let mut root = Root {
        values: vec![1],
        ..Root::default()
    };
    let (result, _) = run(&binding, &mut root, &["-x", "32"]);
    assert_eq!(result, MappingResult::TOO_MANY_PARAMETERS);
    assert!(root.values.is_empty());

    binding.option_mut().argument_count(0, Some(2));
    let (result, _) = run(&binding, &mut root, &["-x", "1", "2", "3"]);
    assert_eq!(result, MappingResult::TOO_MANY_PARAMETERS);
    assert_eq!(root.values, vec![1, 2]);
}

#[test]
fn test_validation_failure_reverts() {
    let mut binding = count_binding();
    binding
        .option_mut()
        .default_value(1)
        .validate(in_range(1, 100));
    let mut root = Root::default();
    let (result, errors) = run(&binding, &mut root, &["-n", "500"]);
    assert_eq!(result, MappingResult::VALIDATION_FAILED);
    assert_eq!(root.count, 1);
    assert_eq!(errors.in_phase(Phase::Validating).count(), 1);
}

#[test]
fn test_switch() {
    let binding = PropertyBinding::new(
        Path::root().field(Field::new("verbose", |r: &mut Root, v: bool| r.verbose = v)),
        ArgOption::new(keys(&["v"])),
    );

    let mut root = Root::default();
    assert!(run(&binding, &mut root, &["-v"]).0.is_success());
    assert!(root.verbose);

    let (result, _) = run(&binding, &mut root, &["-v=false"]);
    assert!(result.is_success());
    assert!(!root.verbose);

    root.verbose = true;
    let (result, _) = run(&binding, &mut root, &[]);
    assert_eq!(result, MappingResult::NO_KEY_FOUND);
    assert!(!root.verbose);

    let (result, _) = run(&binding, &mut root, &["-v", "a", "b"]);
    assert!(result.contains(MappingResult::CONVERSION_FAILED));
}

#[test]
fn test_concatenated_text() {
    let mut binding = PropertyBinding::new(
        Path::root().field(Field::new("message", |r: &mut Root, v: String| r.message = v)),
        ArgOption::new(keys(&["m"])),
    );
    binding.option_mut().concatenated();
    let mut root = Root::default();
    let (result, _) = run(&binding, &mut root, &["-m", "hello", "big", "world"]);
    assert!(result.is_success());
    assert_eq!(root.message, "hello big world");
}

#[test]
fn test_concatenated_switch_given_bare() {
    let mut binding = PropertyBinding::new(
        Path::root().field(Field::new("verbose", |r: &mut Root, v: bool| r.verbose = v)),
        ArgOption::new(keys(&["v"])),
    );
    binding.option_mut().concatenated();
    assert_eq!(binding.option().style(), OptionStyle::ConcatenatedSingleValue);

    let mut root = Root::default();
    let (result, _) = run(&binding, &mut root, &["-v"]);
    assert!(result.is_success());
    assert!(root.verbose);

    let (result, _) = run(&binding, &mut root, &["-v", "false", "false"]);
    assert!(result.is_success());
    assert!(!root.verbose);
}

#[test]
fn test_nested_lazy_construction() {
    let binding = PropertyBinding::new(
        Path::root()
            .member(Member::lazy("child", |r: &Root| &r.child, |r: &mut Root| &mut r.child))
            .field(Field::new("level", |c: &mut Child, v: i32| c.level = v)),
        ArgOption::new(keys(&["level"])),
    );
    let mut root = Root::default();
    let (result, _) = run(&binding, &mut root, &["--level", "4"]);
    assert!(result.is_success());
    assert_eq!(root.child.map(|c| c.level), Some(4));
}

#[test]
fn test_non_constructible_node_is_unbound() {
    let binding = PropertyBinding::new(
        Path::root()
            .member(Member::optional("sealed", |r: &Root| &r.sealed, |r: &mut Root| &mut r.sealed))
            .field(Field::new("value", |s: &mut Sealed, v: i32| s.value = v)),
        ArgOption::new(keys(&["value"])),
    );
    let mut root = Root::default();
    let (result, errors) = run(&binding, &mut root, &["--value", "4"]);
    assert_eq!(result, MappingResult::UNBOUND);
    assert!(root.sealed.is_none());
    assert_eq!(errors.in_phase(Phase::Initializing).count(), 1);
}

#[test]
fn test_info_uses_dotted_path() {
    let binding = PropertyBinding::new(
        Path::root()
            .member(Member::lazy("child", |r: &Root| &r.child, |r: &mut Root| &mut r.child))
            .field(Field::new("names", |c: &mut Child, v: Vec<String>| c.names = v)),
        ArgOption::new(keys(&["name"])),
    );
    let info = binding.info();
    assert_eq!(info.path, "child.names");
    assert_eq!(info.keys, vec!["name"]);
    assert_eq!(binding.path(), "child.names");
}
