//! Checkout state inspection

use std::path::Path;

use git2::{Repository, StatusOptions};
use tracing::{debug, warn};

use super::checkout::head_commit;
use crate::error::Result;
use crate::model::FetchStatus;

/// State of the checkout in `dir` relative to the pinned commit `sha`
///
/// HEAD is compared before the working tree, so a checkout that is both at
/// the wrong commit and dirty reports [`FetchStatus::Modified`].
pub fn status_of(dir: &Path, sha: &str) -> Result<FetchStatus> {
    if !dir.exists() {
        return Ok(FetchStatus::NotCloned);
    }
    if !dir.is_dir() {
        return Ok(FetchStatus::Invalid);
    }

    let Ok(repo) = Repository::open(dir) else {
        debug!("{} is not a git repository", dir.display());
        return Ok(FetchStatus::Invalid);
    };

    match head_commit(&repo) {
        None => return Ok(FetchStatus::Invalid),
        Some(head) if head != sha => return Ok(FetchStatus::Modified),
        Some(_) => {}
    }

    let mut options = StatusOptions::new();
    options
        .include_untracked(true)
        .recurse_untracked_dirs(true)
        .include_ignored(false);
    let dirty = !repo.statuses(Some(&mut options))?.is_empty();

    Ok(if dirty {
        FetchStatus::Dirty
    } else {
        FetchStatus::Ok
    })
}

/// Origin of the repository in `dir`
///
/// `None` unless `dir` holds a `.git` directory. A repository without an
/// `origin` remote is its own origin.
pub fn origin_of(dir: &Path) -> Option<String> {
    if !dir.join(".git").is_dir() {
        return None;
    }

    let origin = Repository::open(dir).ok().and_then(|repo| {
        repo.find_remote("origin")
            .ok()
            .and_then(|remote| remote.url().map(String::from))
    });

    origin.or_else(|| {
        warn!(
            "No origin remote for repository {}, using its own path",
            dir.display()
        );
        Some(dir.display().to_string())
    })
}
