//! Bump-all command implementation

use std::path::PathBuf;

use crate::error::Result;
use crate::output::OutputHandler;
use crate::sync::SyncOptions;

/// Re-pin every floating reference of the tree, then bring checkouts in line
pub fn run(workspace: Option<PathBuf>, output: &dyn OutputHandler, quiet: bool) -> Result<()> {
    let options = SyncOptions {
        ignore_root_lockfile: true,
        allow_lockfile_replace: true,
        update_modified: true,
    };
    super::sync::run_with(workspace, options, output, quiet)
}
