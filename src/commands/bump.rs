//! Bump command implementation
//!
//! Re-resolves one artifact of the root workspace, replaces its lock entry,
//! then syncs with `update_modified` so its checkout follows.

use std::path::PathBuf;

use console::Style;
use tracing::warn;

use super::helpers::resolve_workspace_path;
use crate::cli::BumpArgs;
use crate::error::Result;
use crate::git::GitGateway;
use crate::model::RefSpec;
use crate::output::OutputHandler;
use crate::sync::{BumpOutcome, SyncOptions, bump};
use crate::workspace::find_root;

/// Run bump command
pub fn run(
    workspace: Option<PathBuf>,
    args: &BumpArgs,
    output: &dyn OutputHandler,
    quiet: bool,
) -> Result<()> {
    let start = resolve_workspace_path(workspace.clone())?;
    let root = find_root(&start)?;

    let observer = output.sync_observer();
    let outcome = bump(
        &GitGateway,
        observer.as_ref(),
        &root,
        &args.name,
        args.ignore_commits,
    )?;
    drop(observer);

    match outcome {
        BumpOutcome::Bumped {
            identifier,
            previous,
        } => {
            if !quiet {
                output.send_output(&format!(
                    "{} {}: {} -> {}",
                    Style::new().bold().apply_to("Bumped"),
                    Style::new().yellow().apply_to(&identifier),
                    short_commit(previous.as_ref()),
                    short_commit(identifier.locked_refspec())
                ));
            }
        }
        BumpOutcome::FixedCommit(identifier) => {
            warn!("{} is fixed at a commit, nothing to bump", identifier);
        }
    }

    let options = SyncOptions {
        update_modified: true,
        ..SyncOptions::default()
    };
    super::sync::run_with(workspace, options, output, quiet)
}

fn short_commit(refspec: Option<&RefSpec>) -> String {
    refspec.map_or_else(
        || "(unpinned)".to_string(),
        |refspec| refspec.value.chars().take(12).collect(),
    )
}
