//! Lock file errors

use std::path::Path;

use super::FrundlesError;

/// Creates a lock file syntax error for the given line
pub fn syntax(
    path: &Path,
    line: usize,
    content: impl Into<String>,
    reason: impl Into<String>,
) -> FrundlesError {
    FrundlesError::LockFileSyntax {
        path: path.display().to_string(),
        line,
        content: content.into(),
        reason: reason.into(),
    }
}

/// Creates a duplicate lock file identifier error
pub fn duplicate_identifier(identifier: impl Into<String>) -> FrundlesError {
    FrundlesError::DuplicateLockfileIdentifier {
        identifier: identifier.into(),
    }
}
