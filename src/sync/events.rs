//! Sync progress events
//!
//! The orchestrator never logs by itself: it reports what happens to a
//! [`SyncObserver`], synchronously, in processing order.

use std::path::PathBuf;

use tracing::{Level, debug, error, info, warn};

use crate::model::{FetchStatus, ItemIdentifier};

/// Something that happened during a sync run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncEvent {
    /// A workspace's declarations are about to be processed
    WorkspaceEntered { dir: PathBuf, depth: usize },

    /// A floating reference is being resolved on its origin
    Resolving {
        identifier: ItemIdentifier,
        origin: String,
    },

    /// A floating reference was resolved and pinned in the lock file
    Resolved { identifier: ItemIdentifier },

    /// An entry is already on the fetch stack; `chain` ends with the repeated entry
    CycleDetected { chain: Vec<ItemIdentifier> },

    /// An entry was already synced elsewhere in the tree
    DuplicateSkipped { identifier: ItemIdentifier },

    /// A checkout is being created
    Fetching {
        identifier: ItemIdentifier,
        path: PathBuf,
    },

    /// An existing checkout is being moved to its pinned commit
    Updating {
        identifier: ItemIdentifier,
        path: PathBuf,
    },

    /// Final state of an entry's checkout
    StatusChecked {
        identifier: ItemIdentifier,
        path: PathBuf,
        status: FetchStatus,
    },

    /// Processing an entry failed; the rest of the tree goes on
    EntryFailed {
        identifier: ItemIdentifier,
        error: String,
    },
}

/// Receiver of [`SyncEvent`]s
pub trait SyncObserver {
    fn on_event(&self, event: &SyncEvent);
}

/// Observer writing every event to `tracing`
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

/// `A -> B -> A`
pub fn format_chain(chain: &[ItemIdentifier]) -> String {
    chain
        .iter()
        .map(ItemIdentifier::display_name)
        .collect::<Vec<_>>()
        .join(" -> ")
}

/// Severity and log line for `event`; `None` when there is nothing to say
pub fn describe(event: &SyncEvent) -> Option<(Level, String)> {
    let line = match event {
        SyncEvent::WorkspaceEntered { dir, depth } => (
            Level::INFO,
            format!("Processing workspace {} (depth {})", dir.display(), depth),
        ),
        SyncEvent::Resolving { identifier, origin } => {
            (Level::INFO, format!("Resolving {identifier} from {origin}"))
        }
        SyncEvent::Resolved { identifier } => {
            let locked = identifier.locked_refspec()?;
            (
                Level::INFO,
                format!("Locked {} to {}", identifier, locked.value),
            )
        }
        SyncEvent::CycleDetected { chain } => (
            Level::ERROR,
            format!("Circular dependency detected: {}", format_chain(chain)),
        ),
        SyncEvent::DuplicateSkipped { identifier } => (
            Level::WARN,
            format!("{identifier} is already synced elsewhere in the tree, skipping"),
        ),
        SyncEvent::Fetching { identifier, path } => (
            Level::INFO,
            format!("Cloning {} into {}", identifier, path.display()),
        ),
        SyncEvent::Updating { identifier, path } => (
            Level::INFO,
            format!("Updating {} in {}", identifier, path.display()),
        ),
        SyncEvent::StatusChecked {
            identifier,
            path,
            status,
        } => match status {
            FetchStatus::Dirty => (
                Level::WARN,
                format!("{} has uncommitted changes in {}", identifier, path.display()),
            ),
            FetchStatus::Modified => (
                Level::WARN,
                format!(
                    "{} in {} is not at its pinned commit",
                    identifier,
                    path.display()
                ),
            ),
            FetchStatus::Invalid => (
                Level::WARN,
                format!("{} is not a valid checkout", path.display()),
            ),
            FetchStatus::Ok | FetchStatus::NotCloned => (
                Level::DEBUG,
                format!("{} is {} in {}", identifier, status, path.display()),
            ),
        },
        SyncEvent::EntryFailed { identifier, error } => {
            (Level::ERROR, format!("Failed to sync {identifier}: {error}"))
        }
    };
    Some(line)
}

impl SyncObserver for TracingObserver {
    fn on_event(&self, event: &SyncEvent) {
        let Some((level, message)) = describe(event) else {
            return;
        };

        if level == Level::ERROR {
            error!("{message}");
        } else if level == Level::WARN {
            warn!("{message}");
        } else if level == Level::INFO {
            info!("{message}");
        } else {
            debug!("{message}");
        }
    }
}
