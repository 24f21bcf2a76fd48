//! Sync command implementation
//!
//! Finds the root workspace above the start directory and fetches its whole
//! dependency tree.

use std::path::PathBuf;

use tracing::debug;

use super::helpers::{conclude, resolve_workspace_path};
use crate::cli::SyncArgs;
use crate::error::Result;
use crate::git::GitGateway;
use crate::output::OutputHandler;
use crate::sync::{SyncOptions, sync};
use crate::workspace::find_root;

/// Run sync command
pub fn run(
    workspace: Option<PathBuf>,
    args: &SyncArgs,
    output: &dyn OutputHandler,
    quiet: bool,
) -> Result<()> {
    let options = SyncOptions {
        update_modified: args.update,
        ..SyncOptions::default()
    };
    run_with(workspace, options, output, quiet)
}

/// Sync the root workspace with explicit options
pub(super) fn run_with(
    workspace: Option<PathBuf>,
    options: SyncOptions,
    output: &dyn OutputHandler,
    quiet: bool,
) -> Result<()> {
    let start = resolve_workspace_path(workspace)?;
    let root = find_root(&start)?;
    debug!("Syncing root workspace {} with {:?}", root.display(), options);

    let observer = output.sync_observer();
    let report = sync(&GitGateway, observer.as_ref(), &root, options)?;
    drop(observer);

    conclude(&report, output, quiet)
}
