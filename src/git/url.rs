//! Origin classification and URL normalization
//!
//! An origin is either a remote URL (`https://`, `ssh://`, SCP-style
//! `user@host:path`) or a local reference: a plain filesystem path or a
//! `file://` URL.

use std::borrow::Cow;
use std::path::PathBuf;

/// URL scheme of `origin`, if it has one
fn scheme_of(origin: &str) -> Option<&str> {
    let (scheme, _) = origin.split_once("://")?;
    let valid = !scheme.is_empty()
        && scheme
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));
    valid.then_some(scheme)
}

/// SCP-style SSH origin such as `git@example.com:org/repo.git`
///
/// A single-letter host is a Windows drive letter, not a host.
fn is_scp_like(origin: &str) -> bool {
    if origin.contains("://") {
        return false;
    }
    origin.split_once(':').is_some_and(|(host, _)| {
        host.len() > 1 && !host.contains(['/', '\\'])
    })
}

/// Whether `origin` refers to the local filesystem (no scheme, or `file`)
pub fn has_local_origin(origin: &str) -> bool {
    match scheme_of(origin) {
        Some(scheme) => scheme.eq_ignore_ascii_case("file"),
        None => !is_scp_like(origin),
    }
}

/// Filesystem path of a local origin
pub fn local_path_of(origin: &str) -> PathBuf {
    let path = origin
        .strip_prefix("file://")
        .map_or(origin, |rest| rest.strip_prefix("localhost").unwrap_or(rest));
    PathBuf::from(path)
}

/// Whether two origins designate the same repository
///
/// Local origins are compared by canonical path when both exist.
pub fn same_origin(a: &str, b: &str) -> bool {
    let trimmed = |s: &str| s.trim_end_matches(['/', '\\']).to_string();
    if trimmed(a) == trimmed(b) {
        return true;
    }

    if has_local_origin(a) && has_local_origin(b) {
        if let (Ok(a), Ok(b)) = (
            dunce::canonicalize(local_path_of(a)),
            dunce::canonicalize(local_path_of(b)),
        ) {
            return a == b;
        }
    }
    false
}

/// Rewrite `origin` into a form libgit2 parses reliably
///
/// - SCP-style `git@host:path` becomes `ssh://git@host/path`
/// - `file://` URLs with a relative or backslashed path get an absolute,
///   forward-slashed path
pub fn normalize_for_libgit2(origin: &str) -> Cow<'_, str> {
    if is_scp_like(origin) {
        if let Some((host, path)) = origin.split_once(':') {
            let path = path.strip_prefix('/').unwrap_or(path);
            return Cow::Owned(format!("ssh://{host}/{path}"));
        }
    }

    if let Some(rest) = origin.strip_prefix("file://") {
        if rest.contains('\\') || (!rest.is_empty() && !rest.starts_with('/')) {
            let path = rest.replace('\\', "/");
            let path = path.trim_start_matches('/');
            return Cow::Owned(format!("file:///{path}"));
        }
    }

    Cow::Borrowed(origin)
}
