//! Re-pinning a single artifact

use std::path::Path;

use super::events::{SyncEvent, SyncObserver};
use crate::config::lockfile::{self, Lockfile};
use crate::error::{self, FrundlesError, Result};
use crate::git::Gateway;
use crate::model::{ItemIdentifier, RefSpec};
use crate::workspace;

/// Result of [`bump`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BumpOutcome {
    /// The artifact was re-resolved and its lock entry replaced
    Bumped {
        identifier: ItemIdentifier,
        previous: Option<RefSpec>,
    },
    /// The artifact is fixed at a commit and there is nothing to re-resolve
    FixedCommit(ItemIdentifier),
}

/// Re-resolve the root workspace artifact called `name` and replace its pin
///
/// Only the root lock file entry of that artifact changes; checkouts are left
/// to a following sync. An artifact declared with a commit cannot move and
/// fails with `CannotBumpFixedCommit`, unless `ignore_commits` is set.
pub fn bump(
    gateway: &dyn Gateway,
    observer: &dyn SyncObserver,
    root_dir: &Path,
    name: &str,
    ignore_commits: bool,
) -> Result<BumpOutcome> {
    let root = workspace::load(gateway, root_dir, true)?;
    let artifact = root
        .find_artifact(name)
        .ok_or_else(|| error::workspace::artifact_not_found(name))?;
    let identifier = artifact.identifier();

    if identifier.refspec().is_commit() {
        return if ignore_commits {
            Ok(BumpOutcome::FixedCommit(identifier.clone()))
        } else {
            Err(FrundlesError::CannotBumpFixedCommit {
                name: name.to_string(),
            })
        };
    }

    let lockfile_path = root.lockfile_path();
    let previous = Lockfile::load_or_default(&lockfile_path)?
        .locked_refspec(identifier)
        .cloned();

    observer.on_event(&SyncEvent::Resolving {
        identifier: identifier.clone(),
        origin: artifact.origin().to_string(),
    });
    let sha = gateway.resolve_remote_ref(artifact.origin(), identifier.refspec())?;
    let locked = identifier.lock(RefSpec::commit(sha));

    lockfile::append(&lockfile_path, &locked, true)?;
    observer.on_event(&SyncEvent::Resolved {
        identifier: locked.clone(),
    });

    Ok(BumpOutcome::Bumped {
        identifier: locked,
        previous,
    })
}
