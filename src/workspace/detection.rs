//! Workspace detection
//!
//! A workspace is any directory holding a `frundles.yml`. Nested workspaces
//! live inside their parent's catalog, so the *current* workspace is the
//! nearest one above a directory and the *root* workspace the furthest.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::WORKSPACE_FILE_NAME;
use crate::error::{self, Result};

/// Whether `dir` holds a workspace configuration file
pub fn is_workspace(dir: &Path) -> bool {
    dir.join(WORKSPACE_FILE_NAME).is_file()
}

fn absolute_start(start: &Path) -> Result<PathBuf> {
    let start = std::path::absolute(start)?;
    Ok(dunce::canonicalize(&start).unwrap_or(start))
}

/// Nearest workspace among `start` and its ancestors
///
/// # Examples
///
/// ```no_run
/// use frundles::workspace::find_current;
/// use std::path::Path;
///
/// let workspace = find_current(Path::new("."))?;
/// println!("Current workspace: {}", workspace.display());
/// ```
pub fn find_current(start: &Path) -> Result<PathBuf> {
    let start = absolute_start(start)?;
    debug!("Searching workspace from {}", start.display());

    start
        .ancestors()
        .find(|dir| is_workspace(dir))
        .map(Path::to_path_buf)
        .ok_or_else(|| error::workspace::not_found(&start))
}

/// Outermost workspace among `start` and its ancestors
pub fn find_root(start: &Path) -> Result<PathBuf> {
    let start = absolute_start(start)?;
    debug!("Searching root workspace from {}", start.display());

    start
        .ancestors()
        .filter(|dir| is_workspace(dir))
        .last()
        .map(Path::to_path_buf)
        .ok_or_else(|| error::workspace::not_found(&start))
}
