//! Version control gateway
//!
//! This module handles:
//! - Resolving branches and tags to commits on a remote, without cloning
//! - Creating and updating detached checkouts at pinned commits
//! - Inspecting the state and origin of existing checkouts
//! - Authentication via git's native credential system
//!
//! The sync orchestrator only talks to the [`Gateway`] trait; [`GitGateway`]
//! implements it on top of libgit2.

pub mod auth;
pub mod checkout;
pub mod clone;
pub mod error;
pub mod refs;
pub mod status;
pub mod url;

use std::path::Path;

use tracing::debug;

use crate::error::Result;
use crate::model::{FetchStatus, RefSpec};

pub use url::{has_local_origin, local_path_of};

/// Operations the sync orchestrator needs from version control
///
/// Every call may be slow (network) and may fail; callers never retry.
pub trait Gateway {
    /// Create a checkout of `origin` in `target`, detached at `refspec`'s commit
    fn clone_at(&self, target: &Path, origin: &str, refspec: &RefSpec) -> Result<()>;

    /// Move the checkout in `target` to `refspec`'s commit
    ///
    /// Fails with `InvalidOrigin` when the checkout was not cloned from `origin`.
    fn update_at(&self, target: &Path, origin: &str, refspec: &RefSpec) -> Result<()>;

    /// Resolve a floating reference to a full commit SHA
    fn resolve_remote_ref(&self, origin: &str, refspec: &RefSpec) -> Result<String>;

    /// State of the checkout in `dir` relative to commit `sha`
    fn status_of(&self, dir: &Path, sha: &str) -> Result<FetchStatus>;

    /// Origin URL or path of the repository in `dir`, if it is one
    fn origin_of(&self, dir: &Path) -> Option<String>;
}

/// [`Gateway`] backed by libgit2
#[derive(Debug, Clone, Copy, Default)]
pub struct GitGateway;

impl Gateway for GitGateway {
    fn clone_at(&self, target: &Path, origin: &str, refspec: &RefSpec) -> Result<()> {
        debug!("Cloning {} at {} into {}", origin, refspec, target.display());
        clone::clone_at(target, origin, &refspec.value)
    }

    fn update_at(&self, target: &Path, origin: &str, refspec: &RefSpec) -> Result<()> {
        debug!("Updating {} to {}", target.display(), refspec);
        clone::update_at(target, origin, &refspec.value)
    }

    fn resolve_remote_ref(&self, origin: &str, refspec: &RefSpec) -> Result<String> {
        debug!("Resolving {} on {}", refspec, origin);
        refs::resolve_remote_ref(origin, refspec)
    }

    fn status_of(&self, dir: &Path, sha: &str) -> Result<FetchStatus> {
        status::status_of(dir, sha)
    }

    fn origin_of(&self, dir: &Path) -> Option<String> {
        status::origin_of(dir)
    }
}
