//! Tests for the text conversion engine


use crate::convert::*;
use crate::profile::TextComparison;
use std::collections::{BTreeSet, HashMap};
use std::path::PathBuf;

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_scalar_conversion() {
    let mut registry = ConverterRegistry::default();
    assert_eq!(registry.convert::<i32>(&strings(&["32"])).unwrap(), 32);
    assert_eq!(registry.convert::<f64>(&strings(&["2.5"])).unwrap(), 2.5);
    assert_eq!(registry.convert::<char>(&strings(&["x"])).unwrap(), 'x');
    assert_eq!(
        registry.convert::<PathBuf>(&strings(&["/tmp/a"])).unwrap(),
        PathBuf::from("/tmp/a")
    );
    assert_eq!(
        registry.convert::<String>(&strings(&["hello world"])).unwrap(),
        "hello world"
    );
}

#[test]
fn test_scalar_rejects_multiple_values() {
    let mut registry = ConverterRegistry::default();
    let result = registry.convert::<i32>(&strings(&["32", "64"]));
    assert_eq!(
        result,
        Err(ConversionError::Ambiguous {
            type_name: "i32",
            count: 2
        })
    );
}

#[test]
fn test_empty_scalar_is_default() {
    let mut registry = ConverterRegistry::default();
    assert_eq!(registry.convert::<i32>(&[]).unwrap(), 0);
    assert_eq!(registry.convert::<i32>(&strings(&[""])).unwrap(), 0);
    assert_eq!(registry.convert::<Option<u8>>(&[]).unwrap(), None);
    assert_eq!(registry.convert::<Option<u8>>(&strings(&["7"])).unwrap(), Some(7));
}

#[test]
fn test_collections() {
    let mut registry = ConverterRegistry::default();
    assert_eq!(
        registry.convert::<Vec<i32>>(&strings(&["1", "2", "3"])).unwrap(),
        vec![1, 2, 3]
    );
    assert!(registry.convert::<Vec<i32>>(&[]).unwrap().is_empty());

    let boxed: Box<[u16]> = registry.convert(&strings(&["4", "5"])).unwrap();
    assert_eq!(&*boxed, &[4, 5]);

    let set: BTreeSet<String> = registry.convert(&strings(&["b", "a", "b"])).unwrap();
    assert_eq!(set.into_iter().collect::<Vec<_>>(), vec!["a", "b"]);
}

#[test]
fn test_collection_conversion_is_atomic() {
    let mut registry = ConverterRegistry::default();
    let result = registry.convert::<Vec<i32>>(&strings(&["1", "two", "3"]));
    match result {
        Err(ConversionError::Invalid { text, .. }) => assert_eq!(text, "two"),
        other => panic!("expected invalid element, got {:?}", other),
    }
}

#[test]
fn test_unsupported_multiplicity() {
    let mut registry = ConverterRegistry::default();
    let result = registry.convert::<HashMap<String, String>>(&strings(&["a"]));
    assert!(matches!(result, Err(ConversionError::Unsupported { .. })));
}

#[test]
fn test_bool_words_follow_comparison() {
    let mut sensitive = ConverterRegistry::new(TextComparison::CaseSensitive);
    assert!(sensitive.convert::<bool>(&strings(&["yes"])).unwrap());
    assert!(!sensitive.convert::<bool>(&strings(&["off"])).unwrap());
    assert!(sensitive.convert::<bool>(&strings(&["TRUE"])).is_err());

    let mut insensitive = ConverterRegistry::new(TextComparison::CaseInsensitive);
    assert!(insensitive.convert::<bool>(&strings(&["TRUE"])).unwrap());
}

#[test]
fn test_temporal_builtins() {
    let mut registry = ConverterRegistry::default();
    let date: chrono::NaiveDate = registry.convert(&strings(&["2024-01-15"])).unwrap();
    assert_eq!(date.to_string(), "2024-01-15");

    let timeout: std::time::Duration = registry.convert(&strings(&["1m30s"])).unwrap();
    assert_eq!(timeout.as_secs(), 90);

    let since: chrono::DateTime<chrono::Utc> =
        registry.convert(&strings(&["2 days ago"])).unwrap();
    assert!(since < chrono::Utc::now());
}

#[test]
fn test_temporal_overflow_is_invalid() {
    let mut registry = ConverterRegistry::default();
    for text in ["9223372036854775807", "99999999999999w"] {
        let result = registry.convert::<chrono::Duration>(&strings(&[text]));
        assert!(matches!(result, Err(ConversionError::Invalid { .. })), "{}", text);
    }
    let result = registry.convert::<chrono::DateTime<chrono::Utc>>(&strings(&["5000000 years ago"]));
    assert!(matches!(result, Err(ConversionError::Invalid { .. })));
}

#[test]
fn test_custom_converter_precedence() {
    let mut registry = ConverterRegistry::default();
    assert!(registry.is_builtin::<i32>());

    let installed = registry.register_fn::<i32, _>(|_| Ok(-1), Precedence::IfAbsent);
    assert!(!installed);
    assert_eq!(registry.convert::<i32>(&strings(&["5"])).unwrap(), 5);

    let installed = registry.register_fn::<i32, _>(
        |text| {
            i32::from_str_radix(text.trim_start_matches("0x"), 16).map_err(|e| e.to_string())
        },
        Precedence::Override,
    );
    assert!(installed);
    assert!(!registry.is_builtin::<i32>());
    assert_eq!(registry.convert::<i32>(&strings(&["0xff"])).unwrap(), 255);
}

#[derive(Debug, Clone, Default, PartialEq)]
struct Point {
    x: i32,
    y: i32,
}

impl Convertible for Point {}
crate::scalar_target!(Point);

#[test]
fn test_custom_type_needs_converter() {
    let mut registry = ConverterRegistry::default();
    assert!(matches!(
        registry.convert::<Point>(&strings(&["1,2"])),
        Err(ConversionError::NoConverter { .. })
    ));

    registry.register_fn::<Point, _>(
        |text| {
            let (x, y) = text.split_once(',').ok_or("expected x,y")?;
            Ok(Point {
                x: x.parse().map_err(|_| "bad x")?,
                y: y.parse().map_err(|_| "bad y")?,
            })
        },
        Precedence::IfAbsent,
    );
    assert_eq!(
        registry.convert::<Vec<Point>>(&strings(&["1,2", "3,4"])).unwrap(),
        vec![Point { x: 1, y: 2 }, Point { x: 3, y: 4 }]
    );
}
