//! Error type tests
//!
//! Tests for FrundlesError enum, its conversions, and domain constructors.

#![allow(clippy::expect_used)]

use std::path::Path;

use miette::Diagnostic;

use super::FrundlesError;
use super::config::{duplicate_friendly_name, missing_refspec, multiple_refspec};
use super::git::{clone_failed, invalid_origin, ref_resolve_failed};
use super::lockfile::{duplicate_identifier, syntax};
use super::workspace::{artifact_not_found, not_found as workspace_not_found};

macro_rules! test_error_contains {
    ($test_name:ident, $err:expr, $($contains:expr),+ $(,)?) => {
        #[test]
        fn $test_name() {
            let err = $err;
            let error_string = err.to_string();
            $(
                assert!(error_string.contains($contains),
                    "Error message should contain '{}', got: {}",
                    $contains,
                    error_string
                );
            )+
        }
    };
}

#[test]
fn test_error_display() {
    let err = FrundlesError::UnlockedRefSpec {
        identifier: "uart:main".to_string(),
    };
    assert_eq!(err.to_string(), "Unlocked library: uart:main");
}

#[test]
fn test_error_code() {
    let err = duplicate_identifier("lib:uart:main");
    assert_eq!(
        err.code().map(|c| c.to_string()),
        Some("frundles::lockfile::duplicate_identifier".to_string())
    );
}

#[test]
fn test_io_error_conversion() {
    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
    let err: FrundlesError = io_err.into();
    assert!(matches!(err, FrundlesError::IoError { .. }));
}

#[test]
fn test_yaml_error_conversion() {
    let parse_result: std::result::Result<serde_yaml::Value, _> =
        serde_yaml::from_str("invalid: yaml: content: [unclosed");
    let err: FrundlesError = parse_result.expect_err("should not parse").into();
    assert!(matches!(err, FrundlesError::ConfigParseFailed { .. }));
}

#[test]
fn test_git_error_conversion() {
    let err: FrundlesError = git2::Error::from_str("git error").into();
    assert!(matches!(err, FrundlesError::GitOperationFailed { .. }));
}

#[test]
fn test_lockfile_syntax_carries_line_and_content() {
    let err = syntax(Path::new("frundles.lock"), 3, "lib:uart", "bad field count");
    match &err {
        FrundlesError::LockFileSyntax { line, content, .. } => {
            assert_eq!(*line, 3);
            assert_eq!(content, "lib:uart");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(err.to_string().contains("line 3"));
}

#[test]
fn test_multiple_refspec_names_fields() {
    let err = multiple_refspec("uart", &["branch", "tag"]);
    assert!(matches!(err, FrundlesError::MultipleRefSpec { .. }));
    assert!(err.to_string().contains("branch, tag"));
}

#[test]
fn test_invalid_origin_fields() {
    let err = invalid_origin("/cat/uart", "https://a/uart.git", "https://b/uart.git");
    match err {
        FrundlesError::InvalidOrigin {
            expected, actual, ..
        } => {
            assert_eq!(expected, "https://a/uart.git");
            assert_eq!(actual, "https://b/uart.git");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

test_error_contains!(
    test_missing_refspec,
    missing_refspec("uart"),
    "No reference given",
    "uart"
);

test_error_contains!(
    test_duplicate_friendly_name,
    duplicate_friendly_name("uart"),
    "Duplicate friendly name"
);

test_error_contains!(
    test_workspace_not_found,
    workspace_not_found(Path::new("/some/where")),
    "No workspace found",
    "/some/where"
);

test_error_contains!(
    test_artifact_not_found,
    artifact_not_found("spi"),
    "spi"
);

test_error_contains!(
    test_clone_failed,
    clone_failed("https://example.com/uart.git", "Network error"),
    "Failed to clone repository",
    "Network error"
);

test_error_contains!(
    test_ref_resolve_failed,
    ref_resolve_failed("develop", "not found on remote"),
    "Failed to resolve git ref 'develop'"
);

test_error_contains!(
    test_sync_incomplete,
    FrundlesError::SyncIncomplete { failed: 2 },
    "2 item(s) failed"
);
