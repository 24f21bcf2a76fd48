//! Path helpers for origin and destination resolution

use std::path::{Component, Path, PathBuf};

/// Resolve `.` and `..` components without touching the filesystem
///
/// `..` never climbs above the root of an absolute path.
pub fn normalize_lexically(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => out.push(".."),
            },
            other => out.push(other.as_os_str()),
        }
    }
    out
}

/// `path` made absolute against `base`, normalized, and canonical when it exists
pub fn resolve_against(base: &Path, path: &Path) -> PathBuf {
    let normalized = normalize_lexically(&base.join(path));
    dunce::canonicalize(&normalized).unwrap_or(normalized)
}
