//! Workspace configuration file (frundles.yml)
//!
//! ```yaml
//! workspace:
//!   catalog_dir: catalog
//!   mode: aggregate
//! libraries:
//!   - origin: https://example.com/org/uart.git
//!     branch: main
//!     friendly_name: uart
//! externals:
//!   - origin: ../tools/sim.git
//!     tag: v1.2.0
//!     dest_path: third_party/sim
//! ```

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{self, FrundlesError, Result};
use crate::model::{
    ArtifactKind, External, ItemIdentifier, Library, RefSpec, WorkspaceInfo, WorkspaceMode,
    is_sha1,
};

/// Workspace configuration file name
pub const WORKSPACE_FILE_NAME: &str = "frundles.yml";

/// Typed content of a workspace configuration file
#[derive(Debug, Clone)]
pub struct WorkspaceFile {
    pub info: WorkspaceInfo,
    pub libraries: Vec<Library>,
    pub externals: Vec<External>,
}

#[derive(Debug, Deserialize)]
struct RawWorkspaceFile {
    workspace: RawWorkspaceSection,
    #[serde(default)]
    libraries: Vec<RawDependency>,
    #[serde(default)]
    externals: Vec<RawDependency>,
}

#[derive(Debug, Deserialize)]
struct RawWorkspaceSection {
    catalog_dir: PathBuf,
    #[serde(default)]
    mode: Option<WorkspaceMode>,
}

#[derive(Debug, Deserialize)]
struct RawDependency {
    origin: String,
    #[serde(default)]
    branch: Option<String>,
    #[serde(default)]
    tag: Option<String>,
    #[serde(default)]
    commit: Option<String>,
    #[serde(default)]
    friendly_name: Option<String>,
    #[serde(default)]
    dest_path: Option<PathBuf>,
}

impl WorkspaceFile {
    /// Parse the configuration file at `path`
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(FrundlesError::ConfigNotFound {
                path: path.display().to_string(),
            });
        }

        let content = fs::read_to_string(path).map_err(|e| FrundlesError::ConfigReadFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        Self::from_yaml(&content, path)
    }

    /// Parse configuration content as if it were read from `path`
    ///
    /// A relative catalog directory is resolved against `path`'s directory.
    pub fn from_yaml(content: &str, path: &Path) -> Result<Self> {
        let raw: RawWorkspaceFile = serde_yaml::from_str(content)
            .map_err(|e| error::config::parse_failed(path.display().to_string(), e.to_string()))?;

        let base_dir = std::path::absolute(path)?
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();

        let catalog_dir = if raw.workspace.catalog_dir.is_absolute() {
            raw.workspace.catalog_dir
        } else {
            base_dir.join(raw.workspace.catalog_dir)
        };
        let info = WorkspaceInfo::new(catalog_dir, raw.workspace.mode.unwrap_or_default());

        let libraries = raw
            .libraries
            .into_iter()
            .map(parse_library)
            .collect::<Result<Vec<_>>>()?;

        let externals = raw
            .externals
            .into_iter()
            .map(parse_external)
            .collect::<Result<Vec<_>>>()?;

        check_friendly_names(
            libraries
                .iter()
                .map(|lib| &lib.identifier)
                .chain(externals.iter().map(|ext| &ext.identifier)),
        )?;

        Ok(Self {
            info,
            libraries,
            externals,
        })
    }
}

/// Artifact name from its origin: last path component, without `.git`
pub fn name_from_origin(origin: &str) -> Option<String> {
    let trimmed = origin.trim_end_matches(['/', '\\']);
    let last = trimmed.rsplit(['/', '\\', ':']).next()?;
    let name = last.strip_suffix(".git").unwrap_or(last);
    (!name.is_empty()).then(|| name.to_string())
}

fn parse_library(raw: RawDependency) -> Result<Library> {
    let identifier = parse_identifier(ArtifactKind::Library, &raw)?;
    Ok(Library::new(identifier, raw.origin))
}

fn parse_external(raw: RawDependency) -> Result<External> {
    let identifier = parse_identifier(ArtifactKind::External, &raw)?;
    let dest_path = raw.dest_path.ok_or_else(|| {
        error::config::invalid(format!(
            "external '{}' has no 'dest_path'",
            identifier.display_name()
        ))
    })?;
    Ok(External::new(identifier, raw.origin, dest_path))
}

fn parse_identifier(kind: ArtifactKind, raw: &RawDependency) -> Result<ItemIdentifier> {
    let name = name_from_origin(&raw.origin).ok_or_else(|| {
        error::config::invalid(format!("cannot derive a name from origin '{}'", raw.origin))
    })?;

    let refspec = parse_refspec(&name, raw)?;
    let mut identifier = ItemIdentifier::new(kind, name, refspec.clone());

    // A commit is already immutable: it locks to itself
    if refspec.is_commit() {
        identifier = identifier.lock(refspec);
    }

    if let Some(friendly_name) = &raw.friendly_name {
        check_folder_name(identifier.name(), friendly_name)?;
        identifier = identifier.with_friendly_name(friendly_name.clone());
    }

    Ok(identifier)
}

fn parse_refspec(name: &str, raw: &RawDependency) -> Result<RefSpec> {
    let given: Vec<(&str, &String)> = [
        ("branch", raw.branch.as_ref()),
        ("tag", raw.tag.as_ref()),
        ("commit", raw.commit.as_ref()),
    ]
    .into_iter()
    .filter_map(|(field, value)| value.map(|v| (field, v)))
    .collect();

    match given.as_slice() {
        [] => Err(error::config::missing_refspec(name)),
        [("branch", value)] => Ok(RefSpec::branch(value.as_str())),
        [("tag", value)] => Ok(RefSpec::tag(value.as_str())),
        [(_, value)] => {
            if is_sha1(value) {
                Ok(RefSpec::commit(value.as_str()))
            } else {
                Err(error::config::invalid(format!(
                    "commit '{value}' of '{name}' is not a full 40-digit SHA1"
                )))
            }
        }
        many => {
            let fields: Vec<&str> = many.iter().map(|(field, _)| *field).collect();
            Err(error::config::multiple_refspec(name, &fields))
        }
    }
}

/// A friendly name doubles as a catalog folder: one plain path component
fn check_folder_name(name: &str, friendly_name: &str) -> Result<()> {
    let plain = !friendly_name.is_empty()
        && friendly_name != "."
        && friendly_name != ".."
        && !friendly_name.contains(['/', '\\']);
    if plain {
        Ok(())
    } else {
        Err(error::config::invalid(format!(
            "friendly name '{friendly_name}' of '{name}' must be a plain folder name"
        )))
    }
}

fn check_friendly_names<'a>(identifiers: impl Iterator<Item = &'a ItemIdentifier>) -> Result<()> {
    let mut seen = HashSet::new();
    for identifier in identifiers {
        let display_name = identifier.display_name();
        if !seen.insert(display_name.clone()) {
            return Err(error::config::duplicate_friendly_name(display_name));
        }
    }
    Ok(())
}
