//! Command helper utilities

use std::path::{Path, PathBuf};

use console::Style;

use crate::config::Lockfile;
use crate::error::{FrundlesError, Result};
use crate::git::Gateway;
use crate::output::OutputHandler;
use crate::model::{FetchStatus, ItemIdentifier, RefSpec};
use crate::sync::{EntryOutcome, SyncReport};
use crate::workspace::{self, LoadedWorkspace, find_current, find_root};

/// Resolve the discovery start directory from the optional `--workspace` argument
///
/// If a workspace path is provided, use it. Otherwise,
/// resolve to the current directory.
pub fn resolve_workspace_path(workspace: Option<PathBuf>) -> Result<PathBuf> {
    match workspace {
        Some(path) => Ok(path),
        None => std::env::current_dir().map_err(|e| FrundlesError::IoError {
            message: format!("Failed to get current directory: {e}"),
        }),
    }
}

/// Current and root workspaces above `start`
///
/// Floating references of the current workspace are pinned from its own lock
/// file first, then from the root's, which records the pins of the whole tree.
pub fn load_current_and_root(
    gateway: &dyn Gateway,
    start: &Path,
) -> Result<(LoadedWorkspace, LoadedWorkspace)> {
    let mut current = workspace::load(gateway, &find_current(start)?, false)?;
    let root = workspace::load(gateway, &find_root(start)?, false)?;

    if let Some(root_lock) = &root.lockfile {
        for lib in &mut current.libraries {
            if let Some(pin) = pin_of(root_lock, &lib.identifier) {
                *lib = lib.lock(pin);
            }
        }
        for ext in &mut current.externals {
            if let Some(pin) = pin_of(root_lock, &ext.identifier) {
                *ext = ext.lock(pin);
            }
        }
    }

    Ok((current, root))
}

fn pin_of(lockfile: &Lockfile, identifier: &ItemIdentifier) -> Option<RefSpec> {
    if identifier.is_locked() {
        None
    } else {
        lockfile.locked_refspec(identifier).cloned()
    }
}

/// Counts of entry outcomes in a report
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Summary {
    pub up_to_date: usize,
    pub attention: usize,
    pub duplicates: usize,
    pub cycles: usize,
    pub failed: usize,
}

impl Summary {
    pub fn of(report: &SyncReport) -> Self {
        let mut summary = Self::default();
        for entry in &report.entries {
            match &entry.outcome {
                EntryOutcome::Processed(FetchStatus::Ok) => summary.up_to_date += 1,
                EntryOutcome::Processed(_) => summary.attention += 1,
                EntryOutcome::SkippedDuplicate => summary.duplicates += 1,
                EntryOutcome::SkippedCycle(_) => summary.cycles += 1,
                EntryOutcome::Failed(_) => summary.failed += 1,
            }
        }
        summary
    }
}

/// Print a one-line summary of `report`, then fail if any entry failed
pub fn conclude(report: &SyncReport, output: &dyn OutputHandler, quiet: bool) -> Result<()> {
    let summary = Summary::of(report);

    if !quiet {
        let mut parts = vec![format!(
            "{} up to date",
            Style::new().green().apply_to(summary.up_to_date)
        )];
        if summary.attention > 0 {
            parts.push(format!(
                "{} need attention",
                Style::new().yellow().apply_to(summary.attention)
            ));
        }
        if summary.duplicates > 0 {
            parts.push(format!("{} shared", summary.duplicates));
        }
        if summary.cycles > 0 {
            parts.push(format!(
                "{} cycle(s) skipped",
                Style::new().red().apply_to(summary.cycles)
            ));
        }
        if summary.failed > 0 {
            parts.push(format!(
                "{} failed",
                Style::new().red().bold().apply_to(summary.failed)
            ));
        }
        output.send_output(&format!(
            "{} {}",
            Style::new().bold().apply_to("Sync:"),
            parts.join(", ")
        ));
    }

    if summary.failed > 0 {
        return Err(FrundlesError::SyncIncomplete {
            failed: summary.failed,
        });
    }
    Ok(())
}
