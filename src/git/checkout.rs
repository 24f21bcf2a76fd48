//! Checkout operations
//!
//! Artifacts are always checked out on a detached HEAD at their pinned commit.

use std::path::Path;

use git2::{Oid, Repository, build::CheckoutBuilder};

use crate::error::{self, Result};

/// Move the working tree and HEAD of `repo` to commit `sha`, detached
///
/// With `force`, local changes are overwritten; otherwise a checkout that
/// would lose uncommitted work fails instead.
pub fn checkout_detached(repo: &Repository, sha: &str, force: bool) -> Result<()> {
    let failed = |e: git2::Error| error::git::checkout_failed(sha, e.message());

    let oid = Oid::from_str(sha).map_err(failed)?;
    let commit = repo.find_commit(oid).map_err(failed)?;

    let mut builder = CheckoutBuilder::new();
    if force {
        builder.force();
    } else {
        builder.safe();
    }

    repo.checkout_tree(commit.as_object(), Some(&mut builder))
        .map_err(failed)?;
    repo.set_head_detached(oid).map_err(failed)?;
    Ok(())
}

/// Open the repository at `path`, without searching parent directories
pub fn open(path: &Path) -> Result<Repository> {
    Repository::open(path)
        .map_err(|e| error::git::open_failed(path.display().to_string(), e.message()))
}

/// Commit SHA at HEAD, if HEAD points to a commit
pub fn head_commit(repo: &Repository) -> Option<String> {
    repo.head()
        .and_then(|head| head.peel_to_commit())
        .ok()
        .map(|commit| commit.id().to_string())
}
