//! Flags of the inspection tool

use clap::Parser;
use optbind::app::cli::args::{Args, OutputFormat};
use optbind::core::logging::LogFormat;

fn parse(values: &[&str]) -> Result<Args, clap::Error> {
    Args::try_parse_from(std::iter::once("optbind").chain(values.iter().copied()))
}

#[test]
fn test_defaults() {
    let args = parse(&[]).unwrap();
    assert!(args.convention.is_none());
    assert!(args.keys.is_empty());
    assert_eq!(args.format, OutputFormat::Text);
    assert_eq!(args.log_format, LogFormat::Text);
    assert!(args.inspect.is_empty());
}

#[test]
fn test_keys_and_trailing_arguments() {
    let args = parse(&["-k", "name,n", "--key", "x", "--", "-n", "\"a", "b\""]).unwrap();
    assert_eq!(args.keys, ["name", "n", "x"]);
    assert_eq!(args.inspect, ["-n", "\"a", "b\""]);
}

#[test]
fn test_convention_values() {
    assert!(parse(&["-c", "windows"]).is_ok());
    assert!(parse(&["-c", "vms"]).is_err());
    assert!(parse(&["-c", "posix", "-p", "profile.toml"]).is_err());
}

#[test]
fn test_logging_flags() {
    let args = parse(&["-l", "debug", "-o", "json", "-f", "optbind.log"]).unwrap();
    assert_eq!(args.log_level.as_deref(), Some("debug"));
    assert_eq!(args.log_format, LogFormat::Json);
    assert!(args.log_file.is_some());
    assert!(parse(&["-l", "loud"]).is_err());
}

#[test]
fn test_colour_flags_conflict() {
    assert!(parse(&["--color", "--no-color"]).is_err());
    assert!(!parse(&["--no-color"]).unwrap().use_color());
    assert!(parse(&["--color"]).unwrap().use_color());
}
