//! List command implementation
//!
//! This command lists the artifacts declared by the current workspace with
//! their references and pinned commits.

use std::path::{Path, PathBuf};

use console::Style;
use serde::Serialize;

use super::helpers::{load_current_and_root, resolve_workspace_path};
use crate::cli::ListArgs;
use crate::error::Result;
use crate::git::{Gateway, GitGateway};
use crate::model::{Artifact, ArtifactKind, RefSpec};
use crate::output::OutputHandler;
use crate::workspace::LoadedWorkspace;

/// One row of the listing
#[derive(Debug, Serialize)]
pub struct ListEntry {
    pub name: String,
    pub kind: ArtifactKind,
    pub origin: String,
    pub refspec: RefSpec,
    pub locked_commit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

/// Run list command
pub fn run(workspace: Option<PathBuf>, args: &ListArgs, output: &dyn OutputHandler) -> Result<()> {
    let start = resolve_workspace_path(workspace)?;
    let entries = list(&GitGateway, &start)?;

    if args.json {
        output.send_output(&serde_json::to_string_pretty(&entries)?);
    } else if entries.is_empty() {
        output.send_output("No libraries or externals declared.");
    } else {
        output.send_output(render_table(&entries).trim_end());
    }

    Ok(())
}

/// Artifacts of the workspace around `start`, libraries first
pub fn list(gateway: &dyn Gateway, start: &Path) -> Result<Vec<ListEntry>> {
    let (current, root) = load_current_and_root(gateway, start)?;
    Ok(current
        .artifacts()
        .iter()
        .map(|artifact| entry(&current, &root, artifact))
        .collect())
}

fn entry(current: &LoadedWorkspace, root: &LoadedWorkspace, artifact: &Artifact) -> ListEntry {
    let identifier = artifact.identifier();
    let locked_commit = identifier.locked_refspec().map(|pin| pin.value.clone());
    let path = if locked_commit.is_some() {
        current.checkout_path(&root.info, artifact).ok()
    } else {
        None
    };

    ListEntry {
        name: identifier.display_name(),
        kind: identifier.kind(),
        origin: artifact.origin().to_string(),
        refspec: identifier.refspec().clone(),
        locked_commit,
        path,
    }
}

fn render_table(entries: &[ListEntry]) -> String {
    let rows: Vec<[String; 4]> = entries
        .iter()
        .map(|entry| {
            [
                entry.name.clone(),
                entry.kind.to_string(),
                entry.refspec.to_string(),
                entry
                    .locked_commit
                    .clone()
                    .unwrap_or_else(|| "-".to_string()),
            ]
        })
        .collect();

    let header = ["NAME", "KIND", "REFERENCE", "COMMIT"];
    let mut widths = header.map(str::len);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let format_row = |cells: [&str; 4]| {
        let line: Vec<String> = cells
            .iter()
            .zip(widths)
            .map(|(cell, width)| format!("{cell:<width$}"))
            .collect();
        format!("{}\n", line.join("  ").trim_end())
    };

    let mut out = Style::new().bold().apply_to(format_row(header)).to_string();
    for row in &rows {
        let [name, kind, reference, commit] = row;
        out.push_str(&format_row([
            name.as_str(),
            kind.as_str(),
            reference.as_str(),
            commit.as_str(),
        ]));
    }
    out
}
