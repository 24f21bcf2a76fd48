//! Workspace and catalog errors

use std::path::Path;

use super::FrundlesError;

/// Creates a workspace not found error
pub fn not_found(path: &Path) -> FrundlesError {
    FrundlesError::WorkspaceNotFound {
        path: path.display().to_string(),
    }
}

/// Creates an artifact not found error
pub fn artifact_not_found(name: impl Into<String>) -> FrundlesError {
    FrundlesError::ArtifactNotFound { name: name.into() }
}
