//! Argument-count bounds on collection options

use crate::common::*;
use optbind::{MappingResult, Parser, Phase};

fn ports_parser(min: usize, max: Option<usize>) -> Parser<ServerConfig> {
    let mut parser = Parser::default();
    parser.bind(ports_path(), &["p"]).unwrap().argument_count(min, max);
    parser
}

#[test]
fn test_values_fill_collection() {
    let mut parser = ports_parser(0, None);
    let mut config = ServerConfig::default();
    let outcome = parser.parse(&args(&["-p", "1", "2", "3"]), &mut config);
    assert!(outcome.is_success());
    assert_eq!(config.ports, vec![1, 2, 3]);
}

#[test]
fn test_too_few_leaves_member_alone() {
    let mut parser = ports_parser(2, None);
    let mut config = ServerConfig {
        ports: vec![8080],
        ..ServerConfig::default()
    };
    let outcome = parser.parse(&args(&["-p", "32"]), &mut config);
    assert_eq!(outcome.result, MappingResult::TOO_FEW_PARAMETERS);
    assert_eq!(config.ports, vec![8080]);
    let record = outcome.errors.for_key("p").next().unwrap();
    assert_eq!(record.phase, Phase::Allocating);
    assert_eq!(record.message, "expected at least 2 parameters, got 1");
}

#[test]
fn test_too_few_with_default() {
    let mut parser = Parser::default();
    parser
        .bind(ports_path(), &["p"])
        .unwrap()
        .argument_count(2, Some(4))
        .default_value(vec![80, 443]);
    let mut config = ServerConfig::default();
    let outcome = parser.parse(&args(&["-p", "32"]), &mut config);
    assert_eq!(outcome.result, MappingResult::TOO_FEW_PARAMETERS);
    assert_eq!(config.ports, vec![80, 443]);
}

#[test]
fn test_zero_maximum_truncates_to_empty() {
    let mut parser = ports_parser(0, Some(0));
    let mut config = ServerConfig {
        ports: vec![1],
        ..ServerConfig::default()
    };
    let outcome = parser.parse(&args(&["-p", "1", "2"]), &mut config);
    assert_eq!(outcome.result, MappingResult::TOO_MANY_PARAMETERS);
    assert!(config.ports.is_empty());
}

#[test]
fn test_too_many_keeps_leading_values() {
    let mut parser = ports_parser(1, Some(2));
    let mut config = ServerConfig::default();
    let outcome = parser.parse(&args(&["-p", "1", "2", "3", "4"]), &mut config);
    assert_eq!(outcome.result, MappingResult::TOO_MANY_PARAMETERS);
    assert_eq!(config.ports, vec![1, 2]);
    assert_eq!(
        outcome.errors.records()[0].message,
        "expected at most 2 parameters, got 4"
    );
}

#[test]
fn test_bad_element_fails_whole_collection() {
    let mut parser = ports_parser(0, None);
    let mut config = ServerConfig::default();
    let outcome = parser.parse(&args(&["-p", "1", "two", "3"]), &mut config);
    assert_eq!(outcome.result, MappingResult::CONVERSION_FAILED);
    assert!(config.ports.is_empty());
}
