//! Tests for lockfile module

#![allow(clippy::expect_used)]

use std::path::Path;

use tempfile::TempDir;

use super::*;

const SHA_A: &str = "4f1c0d2e9a8b7c6d5e4f3a2b1c0d9e8f7a6b5c4d";
const SHA_B: &str = "0a1b2c3d4e5f60718293a4b5c6d7e8f901234567";

fn uart_main() -> ItemIdentifier {
    ItemIdentifier::library("uart", RefSpec::branch("main"))
}

fn parse_content(content: &str) -> Result<Lockfile> {
    Lockfile::parse_str(content, Path::new("frundles.lock"))
}

fn syntax_line(result: Result<Lockfile>) -> usize {
    match result {
        Err(FrundlesError::LockFileSyntax { line, .. }) => line,
        other => panic!("expected a syntax error, got {other:?}"),
    }
}

#[test]
fn test_parse_valid_records() {
    let content = format!("lib:uart:branch:main:{SHA_A}\next:sim:tag:v1.2.0:{SHA_B}\n");
    let lockfile = parse_content(&content).expect("valid lock file");

    assert_eq!(lockfile.len(), 2);
    assert_eq!(
        lockfile.locked_refspec(&uart_main()),
        Some(&RefSpec::commit(SHA_A))
    );

    let sim = ItemIdentifier::external("sim", RefSpec::tag("v1.2.0"));
    assert_eq!(lockfile.locked_refspec(&sim), Some(&RefSpec::commit(SHA_B)));
}

#[test]
fn test_parse_ignores_blank_lines() {
    let content = format!("\nlib:uart:branch:main:{SHA_A}\n\n");
    let lockfile = parse_content(&content).expect("valid lock file");
    assert_eq!(lockfile.len(), 1);
}

#[test]
fn test_parse_rejects_wrong_field_count() {
    let content = format!("lib:uart:branch:main:{SHA_A}\nlib:uart:main:{SHA_A}\n");
    assert_eq!(syntax_line(parse_content(&content)), 2);
}

#[test]
fn test_parse_rejects_unknown_kind() {
    let content = format!("library:uart:branch:main:{SHA_A}\n");
    assert_eq!(syntax_line(parse_content(&content)), 1);
}

#[test]
fn test_parse_rejects_unknown_refspec_kind() {
    let content = format!("lib:uart:revision:main:{SHA_A}\n");
    match parse_content(&content) {
        Err(FrundlesError::LockFileSyntax { reason, content, .. }) => {
            assert!(reason.contains("revision"));
            assert!(content.contains("lib:uart:revision"));
        }
        other => panic!("expected a syntax error, got {other:?}"),
    }
}

#[test]
fn test_parse_rejects_short_commit_refspec() {
    let short = &SHA_A[..39];
    let content = format!("lib:uart:branch:main:{SHA_A}\nlib:spi:commit:{short}:{SHA_A}\n");
    assert_eq!(syntax_line(parse_content(&content)), 2);
}

#[test]
fn test_parse_rejects_short_locked_commit() {
    let short = &SHA_A[..39];
    let content = format!("lib:uart:branch:main:{short}\n");
    assert_eq!(syntax_line(parse_content(&content)), 1);
}

#[test]
fn test_parse_rejects_duplicate_unlocked_identifier() {
    let content = format!("lib:uart:branch:main:{SHA_A}\nlib:uart:branch:main:{SHA_B}\n");
    assert_eq!(syntax_line(parse_content(&content)), 2);
}

#[test]
fn test_write_then_parse_round_trip() {
    let temp = TempDir::new().expect("temp dir");
    let path = temp.path().join(LOCKFILE_NAME);

    let written = vec![
        uart_main().lock(RefSpec::commit(SHA_A)),
        ItemIdentifier::external("sim", RefSpec::tag("v1.2.0")).lock(RefSpec::commit(SHA_B)),
        ItemIdentifier::library("spi", RefSpec::commit(SHA_B)).lock(RefSpec::commit(SHA_B)),
    ];
    write(&path, &written).expect("write lock file");

    let parsed = parse(&path).expect("parse lock file");
    for identifier in &written {
        assert_eq!(
            parsed.locked_refspec(&identifier.unlock()),
            identifier.locked_refspec()
        );
    }
}

#[test]
fn test_write_rejects_unlocked_identifier() {
    let temp = TempDir::new().expect("temp dir");
    let path = temp.path().join(LOCKFILE_NAME);

    let result = write(&path, &[uart_main()]);
    assert!(matches!(result, Err(FrundlesError::UnlockedRefSpec { .. })));
    assert!(!path.exists());
}

#[test]
fn test_append_creates_missing_file() {
    let temp = TempDir::new().expect("temp dir");
    let path = temp.path().join(LOCKFILE_NAME);

    append(&path, &uart_main().lock(RefSpec::commit(SHA_A)), false).expect("append");

    let content = std::fs::read_to_string(&path).expect("read lock file");
    assert_eq!(content, format!("lib:uart:branch:main:{SHA_A}\n"));
}

#[test]
fn test_append_rejects_unlocked_identifier() {
    let temp = TempDir::new().expect("temp dir");
    let path = temp.path().join(LOCKFILE_NAME);

    let result = append(&path, &uart_main(), false);
    assert!(matches!(result, Err(FrundlesError::UnlockedRefSpec { .. })));
}

#[test]
fn test_append_duplicate_without_replace_fails() {
    let temp = TempDir::new().expect("temp dir");
    let path = temp.path().join(LOCKFILE_NAME);

    append(&path, &uart_main().lock(RefSpec::commit(SHA_A)), false).expect("first append");
    let result = append(&path, &uart_main().lock(RefSpec::commit(SHA_B)), false);

    assert!(matches!(
        result,
        Err(FrundlesError::DuplicateLockfileIdentifier { .. })
    ));
    let parsed = parse(&path).expect("parse");
    assert_eq!(parsed.locked_refspec(&uart_main()), Some(&RefSpec::commit(SHA_A)));
}

#[test]
fn test_append_duplicate_with_replace_keeps_single_entry() {
    let temp = TempDir::new().expect("temp dir");
    let path = temp.path().join(LOCKFILE_NAME);

    append(&path, &uart_main().lock(RefSpec::commit(SHA_A)), false).expect("first append");
    append(&path, &uart_main().lock(RefSpec::commit(SHA_B)), true).expect("replace");

    let parsed = parse(&path).expect("parse");
    assert_eq!(parsed.len(), 1);
    assert_eq!(parsed.locked_refspec(&uart_main()), Some(&RefSpec::commit(SHA_B)));
}

#[test]
fn test_append_preserves_order() {
    let temp = TempDir::new().expect("temp dir");
    let path = temp.path().join(LOCKFILE_NAME);

    let spi = ItemIdentifier::library("spi", RefSpec::tag("v3"));
    append(&path, &uart_main().lock(RefSpec::commit(SHA_A)), false).expect("append uart");
    append(&path, &spi.lock(RefSpec::commit(SHA_B)), false).expect("append spi");
    append(&path, &uart_main().lock(RefSpec::commit(SHA_B)), true).expect("replace uart");

    let parsed = parse(&path).expect("parse");
    let names: Vec<&str> = parsed.entries().iter().map(ItemIdentifier::name).collect();
    assert_eq!(names, vec!["uart", "spi"]);
}

#[test]
fn test_revert_drops_appended_entry() {
    let temp = TempDir::new().expect("temp dir");
    let path = temp.path().join(LOCKFILE_NAME);

    let spi = ItemIdentifier::library("spi", RefSpec::tag("v3")).lock(RefSpec::commit(SHA_B));
    append(&path, &spi, false).expect("append spi");
    let uart = uart_main().lock(RefSpec::commit(SHA_A));
    let replaced = append(&path, &uart, false).expect("append uart");
    assert!(replaced.is_none());

    revert(&path, &uart, replaced.as_ref()).expect("revert");

    let content = std::fs::read_to_string(&path).expect("read lock file");
    assert_eq!(content, format!("lib:spi:tag:v3:{SHA_B}\n"));
}

#[test]
fn test_revert_restores_replaced_entry_in_place() {
    let temp = TempDir::new().expect("temp dir");
    let path = temp.path().join(LOCKFILE_NAME);

    let spi = ItemIdentifier::library("spi", RefSpec::tag("v3")).lock(RefSpec::commit(SHA_B));
    append(&path, &uart_main().lock(RefSpec::commit(SHA_A)), false).expect("append uart");
    append(&path, &spi, false).expect("append spi");

    let bumped = uart_main().lock(RefSpec::commit(SHA_B));
    let replaced = append(&path, &bumped, true).expect("replace uart");
    assert_eq!(
        replaced.as_ref().and_then(ItemIdentifier::locked_refspec),
        Some(&RefSpec::commit(SHA_A))
    );

    revert(&path, &bumped, replaced.as_ref()).expect("revert");

    let content = std::fs::read_to_string(&path).expect("read lock file");
    assert_eq!(
        content,
        format!("lib:uart:branch:main:{SHA_A}\nlib:spi:tag:v3:{SHA_B}\n")
    );
}

#[test]
fn test_resolved_refspecs_keyed_by_unlocked_identity() {
    let content = format!("lib:uart:branch:main:{SHA_A}\n");
    let lockfile = parse_content(&content).expect("valid lock file");

    let resolved = lockfile.resolved_refspecs();
    assert_eq!(resolved.get(&uart_main().key()), Some(&RefSpec::commit(SHA_A)));
}
