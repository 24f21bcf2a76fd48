//! Catalog layout
//!
//! - Aggregate: `<root catalog>/<name>-<locked commit>`, one flat namespace
//!   shared by the whole tree; equal commits share one checkout.
//! - Recurse: `<current catalog>/<friendly name or name-reference>`, one
//!   catalog per workspace.

use std::fs;
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::{FrundlesError, Result};
use crate::model::{ItemIdentifier, WorkspaceInfo, WorkspaceMode};

/// Checkout directory of `identifier`, declared in the `current` workspace
///
/// The layout follows the root workspace's mode. Aggregate resolution needs a
/// locked identifier and fails with `UnlockedRefSpec` otherwise.
pub fn resolve(
    root: &WorkspaceInfo,
    current: &WorkspaceInfo,
    identifier: &ItemIdentifier,
) -> Result<PathBuf> {
    match root.mode {
        WorkspaceMode::Aggregate => Ok(root
            .catalog_dir
            .join(identifier.locked_identifier_path()?)),
        WorkspaceMode::Recurse => {
            let folder = identifier
                .friendly_name()
                .map_or_else(|| identifier.identifier_path(), String::from);
            Ok(current.catalog_dir.join(folder))
        }
    }
}

/// Make sure `info`'s catalog directory exists and is writable
pub fn ensure_catalog_dir(info: &WorkspaceInfo) -> Result<()> {
    let catalog_dir = &info.catalog_dir;
    debug!("Checking catalog directory {}", catalog_dir.display());

    if !catalog_dir.exists() {
        warn!(
            "{} doesn't exist yet, creating the folder",
            catalog_dir.display()
        );
        fs::create_dir_all(catalog_dir).map_err(|e| create_failed(catalog_dir, &e))?;
    } else if !catalog_dir.is_dir() {
        return Err(FrundlesError::CatalogNotADir {
            path: catalog_dir.display().to_string(),
        });
    }

    if fs::metadata(catalog_dir)?.permissions().readonly() {
        return Err(FrundlesError::CatalogWriteAccess {
            path: catalog_dir.display().to_string(),
        });
    }

    Ok(())
}

fn create_failed(catalog_dir: &Path, err: &io::Error) -> FrundlesError {
    let path = catalog_dir.display().to_string();
    match err.kind() {
        ErrorKind::NotADirectory | ErrorKind::AlreadyExists => FrundlesError::CatalogNotADir { path },
        ErrorKind::PermissionDenied | ErrorKind::ReadOnlyFilesystem => {
            FrundlesError::CatalogWriteAccess { path }
        }
        _ => FrundlesError::IoError {
            message: format!("Failed to create catalog directory {path}: {err}"),
        },
    }
}
