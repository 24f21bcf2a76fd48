//! Configuration file handling for Frundles
//!
//! This module contains data structures for:
//! - `frundles.yml` - Workspace configuration
//! - `frundles.lock` - Lock file with pinned commits

pub mod lockfile;
pub mod workspace_file;

pub use lockfile::{LOCKFILE_NAME, Lockfile};
pub use workspace_file::{WORKSPACE_FILE_NAME, WorkspaceFile};
