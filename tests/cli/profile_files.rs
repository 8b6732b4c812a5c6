//! TOML profile files and their resolution

use clap::Parser;
use optbind::app::cli::args::Args;
use optbind::{CustomizationProfile, ProfileError, TextComparison};
use std::io::Write;
use tempfile::NamedTempFile;

fn profile_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn test_convention_with_overrides() {
    let file = profile_file("convention = \"windows\"\ncase_sensitive = true\n");
    let profile = CustomizationProfile::load(file.path()).unwrap();
    assert_eq!(profile.assignment(), ':');
    assert_eq!(profile.comparison(), TextComparison::CaseSensitive);
    assert!(profile.prefixes().contains(&"/".to_string()));
}

#[test]
fn test_fully_spelled_profile() {
    let file = profile_file(
        "prefixes = [\"+\"]\nquotes = ['\"', [\"<\", \">\"]]\nassignment = \"~\"\ncase_sensitive = false\n",
    );
    let profile = CustomizationProfile::load(file.path()).unwrap();
    assert_eq!(profile.prefixes(), ["+"]);
    assert_eq!(profile.quotes().len(), 2);
    assert_eq!(profile.closing_quote("<"), Some('>'));
    assert_eq!(profile.assignment(), '~');
}

#[test]
fn test_bad_profile_files() {
    let unknown = profile_file("prefixes = [\"-\"]\ncolour = true\n");
    assert!(matches!(
        CustomizationProfile::load(unknown.path()),
        Err(ProfileError::Parse { .. })
    ));

    let long_assignment = profile_file("assignment = \":=\"\n");
    assert!(matches!(
        CustomizationProfile::load(long_assignment.path()),
        Err(ProfileError::InvalidAssignment { .. })
    ));
}

#[test]
fn test_args_resolve_profile_file() {
    let file = profile_file("convention = \"dos\"\n");
    let path = file.path().to_str().unwrap();
    let args = Args::try_parse_from(["optbind", "-p", path]).unwrap();
    let profile = args.resolve_profile().unwrap();
    assert_eq!(profile.prefixes(), ["/"]);
    assert_eq!(profile.comparison(), TextComparison::CaseInsensitive);
}

#[test]
fn test_profile_drives_parser() {
    #[derive(Default)]
    struct Job {
        retries: u8,
    }

    let file = profile_file("prefixes = [\"+\"]\nassignment = \"~\"\n");
    let profile = CustomizationProfile::load(file.path()).unwrap();
    let mut parser = optbind::Parser::<Job>::new(profile);
    parser.bind(
        optbind::Path::root().field(optbind::Field::new("retries", |j: &mut Job, v: u8| j.retries = v)),
        &["retries"],
    );

    let mut job = Job::default();
    let outcome = parser.parse(&["+retries~3"], &mut job);
    assert!(outcome.is_success(), "{:?}", outcome.errors);
    assert_eq!(job.retries, 3);
}
