//! Locate command implementation

use std::path::{Path, PathBuf};

use super::helpers::{load_current_and_root, resolve_workspace_path};
use crate::cli::LocateArgs;
use crate::error::{self, Result};
use crate::git::{Gateway, GitGateway};
use crate::output::OutputHandler;

/// Run locate command
pub fn run(workspace: Option<PathBuf>, args: &LocateArgs, output: &dyn OutputHandler) -> Result<()> {
    let start = resolve_workspace_path(workspace)?;
    let path = locate(&GitGateway, &start, &args.name)?;
    output.send_output(&path.display().to_string());
    Ok(())
}

/// Checkout path of the artifact `name` of the workspace around `start`
///
/// Fails with `ArtifactNotFound` when no artifact has that name, or when it
/// was never pinned (so its checkout cannot exist yet).
pub fn locate(gateway: &dyn Gateway, start: &Path, name: &str) -> Result<PathBuf> {
    let (current, root) = load_current_and_root(gateway, start)?;

    let artifact = current
        .find_artifact(name)
        .filter(|artifact| artifact.identifier().is_locked())
        .ok_or_else(|| error::workspace::artifact_not_found(name))?;

    current.checkout_path(&root.info, &artifact)
}
