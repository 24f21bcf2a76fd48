//! Clone and update operations
//!
//! A checkout is created with `git init` + `remote add origin` + `fetch`
//! rather than a regular clone: the target is detached at a pinned commit,
//! so there is no branch to set up.

use std::fs;
use std::path::Path;

use git2::{AutotagOption, FetchOptions, RemoteCallbacks, Repository};
use tracing::debug;

use super::auth::setup_auth_callbacks;
use super::checkout::{checkout_detached, open};
use super::error::interpret_git_error;
use super::url::{normalize_for_libgit2, same_origin};
use crate::error::{self, Result};

const ORIGIN: &str = "origin";
const FETCH_REFSPECS: [&str; 2] = [
    "+refs/heads/*:refs/remotes/origin/*",
    "+refs/tags/*:refs/tags/*",
];

/// Fetch all branches and tags of `origin` into `repo`
pub fn fetch_origin(repo: &Repository, origin: &str) -> Result<()> {
    let normalized = normalize_for_libgit2(origin);
    let failed = |e: &git2::Error| {
        error::git::fetch_failed(format!("{origin}: {}", interpret_git_error(e)))
    };

    let mut remote = repo
        .remote_anonymous(normalized.as_ref())
        .map_err(|e| failed(&e))?;

    let mut callbacks = RemoteCallbacks::new();
    setup_auth_callbacks(&mut callbacks);

    let mut options = FetchOptions::new();
    options.remote_callbacks(callbacks);
    options.download_tags(AutotagOption::All);

    debug!("Fetching {}", origin);
    remote
        .fetch(&FETCH_REFSPECS, Some(&mut options), None)
        .map_err(|e| failed(&e))
}

/// Create a checkout of `origin` at commit `sha` in `target`
///
/// A target directory created here is removed again if anything fails, so a
/// failed clone leaves nothing behind for the next run to trip over.
pub fn clone_at(target: &Path, origin: &str, sha: &str) -> Result<()> {
    let existed = target.exists();

    let result = init_and_checkout(target, origin, sha);
    if result.is_err() && !existed {
        let _ = fs::remove_dir_all(target);
    }
    result
}

fn init_and_checkout(target: &Path, origin: &str, sha: &str) -> Result<()> {
    let clone_failed = |reason: String| error::git::clone_failed(origin, reason);

    fs::create_dir_all(target).map_err(|e| clone_failed(e.to_string()))?;
    let repo = Repository::init(target).map_err(|e| clone_failed(interpret_git_error(&e)))?;
    repo.remote(ORIGIN, origin)
        .map_err(|e| clone_failed(interpret_git_error(&e)))?;

    fetch_origin(&repo, origin)?;
    checkout_detached(&repo, sha, true)
}

/// Move the existing checkout in `target` to commit `sha`
///
/// The checkout's `origin` remote must match `origin`. Uncommitted changes
/// are never overwritten.
pub fn update_at(target: &Path, origin: &str, sha: &str) -> Result<()> {
    let repo = open(target)?;

    let actual = repo
        .find_remote(ORIGIN)
        .ok()
        .and_then(|remote| remote.url().map(String::from));

    match actual {
        Some(actual) if same_origin(&actual, origin) => {}
        actual => {
            return Err(error::git::invalid_origin(
                target.display().to_string(),
                origin,
                actual.unwrap_or_else(|| "<none>".to_string()),
            ));
        }
    }

    let present = git2::Oid::from_str(sha)
        .and_then(|oid| repo.find_commit(oid))
        .is_ok();
    if !present {
        fetch_origin(&repo, origin)?;
    }

    checkout_detached(&repo, sha, false)
}
