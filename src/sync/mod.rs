//! Dependency fetch orchestrator
//!
//! Walks the dependency tree of a root workspace depth-first:
//!
//! 1. skip entries already on the fetch stack (cycles)
//! 2. in Aggregate mode, skip libraries already synced elsewhere in the tree
//! 3. pin floating references, reusing pins from earlier in the run
//! 4. clone, update, or just inspect the checkout
//! 5. recurse into the checkout when it is itself a workspace
//!
//! A failure stays with the entry that raised it; siblings and the rest of the
//! tree still process. Accumulated state (pins resolved so far, synced
//! identifiers) is passed down by reference and handed back as new values that
//! the caller merges, so no level ever mutates another's view.

mod bump;
mod events;

pub use bump::{BumpOutcome, bump};
pub use events::{SyncEvent, SyncObserver, TracingObserver, describe, format_chain};

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use crate::config::lockfile;
use crate::error::{FrundlesError, Result};
use crate::git::Gateway;
use crate::model::{Artifact, FetchStatus, IdentityKey, ItemIdentifier, RefSpec, WorkspaceMode};
use crate::workspace::{self, LoadedWorkspace, ensure_catalog_dir, is_workspace};

/// Knobs of a sync run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncOptions {
    /// Re-resolve every floating reference instead of using the root lock file
    pub ignore_root_lockfile: bool,

    /// Let new pins overwrite existing lock file entries
    pub allow_lockfile_replace: bool,

    /// Move checkouts that are not at their pinned commit
    pub update_modified: bool,
}

/// What happened to one visited entry
#[derive(Debug)]
pub enum EntryOutcome {
    /// Entry went through; state of its checkout afterwards
    Processed(FetchStatus),
    /// Entry closes a cycle; the chain ends with the repeated entry
    SkippedCycle(Vec<ItemIdentifier>),
    /// Entry was already synced elsewhere in the tree
    SkippedDuplicate,
    /// Processing the entry failed
    Failed(FrundlesError),
}

/// One visited entry
#[derive(Debug)]
pub struct EntryReport {
    /// Locked identifier when locking got that far, declared one otherwise
    pub identifier: ItemIdentifier,

    /// Nesting depth of the declaring workspace, 0 for the root
    pub depth: usize,

    pub outcome: EntryOutcome,
}

/// Result of a whole sync run
#[derive(Debug, Default)]
pub struct SyncReport {
    /// Identifiers synced during the run
    pub synced: HashSet<ItemIdentifier>,

    /// Pins resolved on origins during the run, keyed by unlocked identity
    pub resolved: HashMap<IdentityKey, RefSpec>,

    /// Every visited entry, in processing order
    pub entries: Vec<EntryReport>,
}

impl SyncReport {
    /// Entries whose processing failed
    pub fn failures(&self) -> impl Iterator<Item = &EntryReport> {
        self.entries
            .iter()
            .filter(|entry| matches!(entry.outcome, EntryOutcome::Failed(_)))
    }

    /// Whether no entry failed
    pub fn is_complete(&self) -> bool {
        self.failures().next().is_none()
    }
}

/// State produced by one level (or one entry) of the walk
#[derive(Debug, Default)]
struct Progress {
    synced: HashSet<ItemIdentifier>,
    resolved: HashMap<IdentityKey, RefSpec>,
    entries: Vec<EntryReport>,
}

impl Progress {
    fn absorb(&mut self, other: Progress) {
        self.synced.extend(other.synced);
        self.resolved.extend(other.resolved);
        self.entries.extend(other.entries);
    }
}

/// Read-only state shared by the whole walk
struct Context<'a> {
    gateway: &'a dyn Gateway,
    observer: &'a dyn SyncObserver,
    root: &'a LoadedWorkspace,
    root_lockfile: PathBuf,
    options: SyncOptions,
}

/// Sync the dependency tree of the root workspace in `root_dir`
///
/// Errors loading the root workspace, its lock file, or its catalog abort the
/// run. Errors of individual entries are reported in the returned
/// [`SyncReport`] instead.
pub fn sync(
    gateway: &dyn Gateway,
    observer: &dyn SyncObserver,
    root_dir: &Path,
    options: SyncOptions,
) -> Result<SyncReport> {
    let root = workspace::load(gateway, root_dir, options.ignore_root_lockfile)?;
    ensure_catalog_dir(&root.info)?;

    let seed = root
        .lockfile
        .as_ref()
        .map(lockfile::Lockfile::resolved_refspecs)
        .unwrap_or_default();

    let ctx = Context {
        gateway,
        observer,
        root: &root,
        root_lockfile: root.lockfile_path(),
        options,
    };

    let progress = sync_level(&ctx, &root, 0, &[], &seed, &HashSet::new());

    Ok(SyncReport {
        synced: progress.synced,
        resolved: progress.resolved,
        entries: progress.entries,
    })
}

/// Process every declaration of `current`, in order
///
/// `resolved` and `synced` are what earlier parts of the run produced; the
/// returned [`Progress`] only holds what this level added.
fn sync_level(
    ctx: &Context<'_>,
    current: &LoadedWorkspace,
    depth: usize,
    stack: &[ItemIdentifier],
    resolved: &HashMap<IdentityKey, RefSpec>,
    synced: &HashSet<ItemIdentifier>,
) -> Progress {
    ctx.observer.on_event(&SyncEvent::WorkspaceEntered {
        dir: current.dir.clone(),
        depth,
    });

    let mut seen_resolved = resolved.clone();
    let mut seen_synced = synced.clone();
    let mut level = Progress::default();

    for artifact in current.artifacts() {
        let step = sync_entry(
            ctx,
            current,
            depth,
            stack,
            &artifact,
            &seen_resolved,
            &seen_synced,
        );

        seen_resolved.extend(step.resolved.iter().map(|(k, v)| (k.clone(), v.clone())));
        seen_synced.extend(step.synced.iter().cloned());
        level.absorb(step);
    }

    level
}

/// Process one declaration, recursing into it when it is a workspace
fn sync_entry(
    ctx: &Context<'_>,
    current: &LoadedWorkspace,
    depth: usize,
    stack: &[ItemIdentifier],
    artifact: &Artifact,
    resolved: &HashMap<IdentityKey, RefSpec>,
    synced: &HashSet<ItemIdentifier>,
) -> Progress {
    let mut step = Progress::default();
    let report = |identifier: &ItemIdentifier, outcome| EntryReport {
        identifier: identifier.clone(),
        depth,
        outcome,
    };

    if let Some(outcome) = skip_reason(ctx, stack, artifact, synced) {
        step.entries.push(report(artifact.identifier(), outcome));
        return step;
    }

    let (artifact, fresh) = match lock_artifact(ctx, artifact, resolved) {
        Ok(locked) => locked,
        Err(err) => {
            let outcome = EntryOutcome::Failed(err);
            return failed(ctx, step, report(artifact.identifier(), outcome));
        }
    };

    if let Some(pin) = &fresh {
        step.resolved.insert(pin.key.clone(), pin.refspec.clone());
    }

    if let Some(outcome) = skip_reason(ctx, stack, &artifact, synced) {
        step.entries.push(report(artifact.identifier(), outcome));
        return step;
    }

    let mut seen_resolved = resolved.clone();
    seen_resolved.extend(step.resolved.iter().map(|(k, v)| (k.clone(), v.clone())));

    match fetch_and_recurse(ctx, current, depth, stack, &artifact, &seen_resolved, synced) {
        Ok((status, nested)) => {
            let outcome = EntryOutcome::Processed(status);
            step.entries.push(report(artifact.identifier(), outcome));
            step.absorb(nested);
            step.synced.insert(artifact.identifier().clone());
            step
        }
        Err(err) => {
            // A failed entry's pin is forgotten, in the run and in the lock file
            step.resolved.clear();
            if let Some(pin) = &fresh {
                forget_pin(ctx, &artifact, pin);
            }
            failed(ctx, step, report(artifact.identifier(), EntryOutcome::Failed(err)))
        }
    }
}

fn failed(ctx: &Context<'_>, mut step: Progress, report: EntryReport) -> Progress {
    if let EntryOutcome::Failed(err) = &report.outcome {
        ctx.observer.on_event(&SyncEvent::EntryFailed {
            identifier: report.identifier.clone(),
            error: err.to_string(),
        });
    }
    step.entries.push(report);
    step
}

/// Cycle check, then (Aggregate mode, libraries only) dedup check
fn skip_reason(
    ctx: &Context<'_>,
    stack: &[ItemIdentifier],
    artifact: &Artifact,
    synced: &HashSet<ItemIdentifier>,
) -> Option<EntryOutcome> {
    let identifier = artifact.identifier();

    if stack.contains(identifier) {
        let mut chain = stack.to_vec();
        chain.push(identifier.clone());
        ctx.observer.on_event(&SyncEvent::CycleDetected {
            chain: chain.clone(),
        });
        return Some(EntryOutcome::SkippedCycle(chain));
    }

    let dedup = ctx.root.info.mode == WorkspaceMode::Aggregate && artifact.is_library();
    if dedup && synced.contains(identifier) {
        ctx.observer.on_event(&SyncEvent::DuplicateSkipped {
            identifier: identifier.clone(),
        });
        return Some(EntryOutcome::SkippedDuplicate);
    }

    None
}

/// Pin resolved on an origin and recorded in the root lock file
struct FreshPin {
    key: IdentityKey,
    refspec: RefSpec,
    /// Lock file entry the pin replaced
    replaced: Option<ItemIdentifier>,
}

/// Lock `artifact`, from the run's pins or by resolving it on its origin
///
/// Returns the locked artifact and, when it was resolved here, the new pin.
fn lock_artifact(
    ctx: &Context<'_>,
    artifact: &Artifact,
    resolved: &HashMap<IdentityKey, RefSpec>,
) -> Result<(Artifact, Option<FreshPin>)> {
    let identifier = artifact.identifier();
    if identifier.is_locked() {
        return Ok((artifact.clone(), None));
    }

    let key = identifier.unlocked_key();
    if let Some(refspec) = resolved.get(&key) {
        return Ok((artifact.lock(refspec.clone()), None));
    }

    ctx.observer.on_event(&SyncEvent::Resolving {
        identifier: identifier.clone(),
        origin: artifact.origin().to_string(),
    });

    let sha = ctx
        .gateway
        .resolve_remote_ref(artifact.origin(), identifier.refspec())?;
    let refspec = RefSpec::commit(sha);
    let locked = artifact.lock(refspec.clone());

    let replaced = lockfile::append(
        &ctx.root_lockfile,
        locked.identifier(),
        ctx.options.allow_lockfile_replace,
    )?;

    ctx.observer.on_event(&SyncEvent::Resolved {
        identifier: locked.identifier().clone(),
    });

    Ok((
        locked,
        Some(FreshPin {
            key,
            refspec,
            replaced,
        }),
    ))
}

/// Undo the lock file write of a pin whose entry then failed
///
/// A later declaration of the same artifact resolves and records it again.
fn forget_pin(ctx: &Context<'_>, artifact: &Artifact, pin: &FreshPin) {
    let identifier = artifact.identifier();
    if let Err(err) = lockfile::revert(&ctx.root_lockfile, identifier, pin.replaced.as_ref()) {
        ctx.observer.on_event(&SyncEvent::EntryFailed {
            identifier: identifier.clone(),
            error: format!("Failed to drop its pin from the lock file: {err}"),
        });
    }
}

/// Bring the checkout of a locked artifact in line, then recurse into it
fn fetch_and_recurse(
    ctx: &Context<'_>,
    current: &LoadedWorkspace,
    depth: usize,
    stack: &[ItemIdentifier],
    artifact: &Artifact,
    resolved: &HashMap<IdentityKey, RefSpec>,
    synced: &HashSet<ItemIdentifier>,
) -> Result<(FetchStatus, Progress)> {
    let identifier = artifact.identifier();
    let locked = identifier.require_locked()?.clone();
    let path = current.checkout_path(&ctx.root.info, artifact)?;

    let status = match ctx.gateway.status_of(&path, &locked.value)? {
        FetchStatus::NotCloned => {
            ctx.observer.on_event(&SyncEvent::Fetching {
                identifier: identifier.clone(),
                path: path.clone(),
            });
            ctx.gateway.clone_at(&path, artifact.origin(), &locked)?;
            FetchStatus::Ok
        }
        FetchStatus::Modified if ctx.options.update_modified => {
            ctx.observer.on_event(&SyncEvent::Updating {
                identifier: identifier.clone(),
                path: path.clone(),
            });
            ctx.gateway.update_at(&path, artifact.origin(), &locked)?;
            FetchStatus::Ok
        }
        status => status,
    };

    ctx.observer.on_event(&SyncEvent::StatusChecked {
        identifier: identifier.clone(),
        path: path.clone(),
        status,
    });

    if !is_workspace(&path) {
        return Ok((status, Progress::default()));
    }

    let nested = workspace::load(ctx.gateway, &path, false)?;
    if ctx.root.info.mode == WorkspaceMode::Recurse {
        ensure_catalog_dir(&nested.info)?;
    }

    let mut chain = stack.to_vec();
    chain.push(identifier.clone());

    let progress = sync_level(ctx, &nested, depth + 1, &chain, resolved, synced);
    Ok((status, progress))
}
