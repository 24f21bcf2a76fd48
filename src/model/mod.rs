//! Value types for artifact identity and workspace layout
//!
//! This module handles:
//! - Revision references ([`RefSpec`]) and their locking to commits
//! - Artifact identity ([`ItemIdentifier`]) with lock-aware equality
//! - Declared artifacts ([`Library`], [`External`])
//! - Workspace layout ([`WorkspaceInfo`]) and checkout state ([`FetchStatus`])
//!
//! Nothing in here performs I/O.

pub mod artifact;
pub mod identifier;
pub mod refspec;

pub use artifact::{Artifact, External, Library};
pub use identifier::{ArtifactKind, IdentityKey, ItemIdentifier};
pub use refspec::{RefSpec, RefSpecKind, is_sha1};

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// How fetched artifacts are laid out across nested workspaces
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkspaceMode {
    /// One flat catalog owned by the root workspace, deduplicated by commit
    #[default]
    Aggregate,
    /// One catalog per workspace, folders named after friendly names
    Recurse,
}

/// Layout information of a loaded workspace
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkspaceInfo {
    /// Absolute path of the catalog directory
    pub catalog_dir: PathBuf,

    /// Layout mode, fixed when the workspace is loaded
    pub mode: WorkspaceMode,
}

impl WorkspaceInfo {
    pub fn new(catalog_dir: impl Into<PathBuf>, mode: WorkspaceMode) -> Self {
        Self {
            catalog_dir: catalog_dir.into(),
            mode,
        }
    }
}

/// On-disk state of an artifact checkout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FetchStatus {
    /// Nothing exists at the checkout path yet
    NotCloned,
    /// Checkout is at the pinned commit with a clean working tree
    Ok,
    /// Checkout is at the pinned commit but has uncommitted changes
    Dirty,
    /// Checkout is not at the pinned commit
    Modified,
    /// Checkout path is not a usable repository
    Invalid,
}

impl fmt::Display for FetchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FetchStatus::NotCloned => "not cloned",
            FetchStatus::Ok => "ok",
            FetchStatus::Dirty => "dirty",
            FetchStatus::Modified => "modified",
            FetchStatus::Invalid => "invalid",
        };
        f.write_str(s)
    }
}
