//! Workspace loading
//!
//! Loading a workspace parses its `frundles.yml`, rewrites local origins to
//! absolute paths, and applies the pins of its lock file.

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use super::catalog;
use super::path::resolve_against;
use crate::config::{LOCKFILE_NAME, Lockfile, WORKSPACE_FILE_NAME, WorkspaceFile, lockfile};
use crate::error::{self, Result};
use crate::git::{Gateway, has_local_origin, local_path_of};
use crate::model::{Artifact, External, ItemIdentifier, Library, RefSpec, WorkspaceInfo};

/// A parsed workspace with its pins applied
#[derive(Debug, Clone)]
pub struct LoadedWorkspace {
    /// Canonical workspace directory
    pub dir: PathBuf,

    pub info: WorkspaceInfo,
    pub libraries: Vec<Library>,
    pub externals: Vec<External>,

    /// `None` when the lock file is absent or was ignored
    pub lockfile: Option<Lockfile>,
}

impl LoadedWorkspace {
    /// Path of this workspace's lock file, whether or not it exists
    pub fn lockfile_path(&self) -> PathBuf {
        self.dir.join(LOCKFILE_NAME)
    }

    /// All declared artifacts: libraries first, then externals, in declaration order
    pub fn artifacts(&self) -> Vec<Artifact> {
        self.libraries
            .iter()
            .cloned()
            .map(Artifact::from)
            .chain(self.externals.iter().cloned().map(Artifact::from))
            .collect()
    }

    /// The artifact whose friendly name, or display name, is `name`
    pub fn find_artifact(&self, name: &str) -> Option<Artifact> {
        let matches =
            |id: &ItemIdentifier| id.friendly_name() == Some(name) || id.display_name() == name;
        self.artifacts()
            .into_iter()
            .find(|artifact| matches(artifact.identifier()))
    }

    /// Checkout directory of a locked artifact declared here
    ///
    /// Libraries go to the catalog, laid out after the `root` workspace's mode;
    /// externals go to their destination inside this workspace.
    pub fn checkout_path(&self, root: &WorkspaceInfo, artifact: &Artifact) -> Result<PathBuf> {
        match artifact {
            Artifact::Library(lib) => catalog::resolve(root, &self.info, &lib.identifier),
            Artifact::External(ext) => Ok(self.dir.join(&ext.dest_path)),
        }
    }
}

/// Load the workspace in `dir`
///
/// With `ignore_lockfile`, floating references are left unlocked even when a
/// lock file exists.
pub fn load(gateway: &dyn Gateway, dir: &Path, ignore_lockfile: bool) -> Result<LoadedWorkspace> {
    let dir = dunce::canonicalize(dir).map_err(|_| error::workspace::not_found(dir))?;
    info!("Loading workspace {}", dir.display());

    let file = WorkspaceFile::from_file(&dir.join(WORKSPACE_FILE_NAME))?;
    let origin_base = OriginBase::of(gateway, &dir);

    let mut libraries: Vec<Library> = file
        .libraries
        .into_iter()
        .map(|mut lib| {
            lib.origin = origin_base.resolve(&lib.origin, &lib.identifier);
            lib
        })
        .collect();

    let mut externals: Vec<External> = file
        .externals
        .into_iter()
        .map(|mut ext| {
            ext.origin = origin_base.resolve(&ext.origin, &ext.identifier);
            ext
        })
        .collect();

    let lockfile_path = dir.join(LOCKFILE_NAME);
    let lockfile = if !ignore_lockfile && lockfile_path.is_file() {
        Some(lockfile::parse(&lockfile_path)?)
    } else {
        None
    };

    if let Some(lockfile) = &lockfile {
        for lib in &mut libraries {
            if let Some(locked) = pinned(lockfile, &lib.identifier) {
                *lib = lib.lock(locked);
            }
        }
        for ext in &mut externals {
            if let Some(locked) = pinned(lockfile, &ext.identifier) {
                *ext = ext.lock(locked);
            }
        }
    }

    Ok(LoadedWorkspace {
        dir,
        info: file.info,
        libraries,
        externals,
        lockfile,
    })
}

fn pinned(lockfile: &Lockfile, identifier: &ItemIdentifier) -> Option<RefSpec> {
    if identifier.is_locked() {
        return None;
    }
    lockfile.locked_refspec(identifier).cloned()
}

/// Directory local dependency origins are relative to
///
/// When a workspace is itself a clone of a local repository, its local
/// dependencies are relative to that repository, not to the clone.
enum OriginBase {
    /// The workspace's own repository has a local origin
    OwnOrigin(PathBuf),
    /// The workspace's own repository has a remote origin
    RemoteWorkspace { dir: PathBuf, origin: String },
    /// The workspace is not a repository
    NotARepository(PathBuf),
}

impl OriginBase {
    fn of(gateway: &dyn Gateway, dir: &Path) -> Self {
        match gateway.origin_of(dir) {
            Some(origin) if has_local_origin(&origin) => {
                Self::OwnOrigin(resolve_against(dir, &local_path_of(&origin)))
            }
            Some(origin) => Self::RemoteWorkspace {
                dir: dir.to_path_buf(),
                origin,
            },
            None => Self::NotARepository(dir.to_path_buf()),
        }
    }

    fn resolve(&self, origin: &str, identifier: &ItemIdentifier) -> String {
        if !has_local_origin(origin) {
            return origin.to_string();
        }

        let path = local_path_of(origin);
        let base = match self {
            Self::OwnOrigin(base) => base,
            Self::RemoteWorkspace { dir, origin: own } => {
                if path.is_relative() {
                    warn!(
                        "{} has local origin '{}' but its workspace comes from '{}'; \
                         resolving it from {}, which may be wrong",
                        identifier,
                        origin,
                        own,
                        dir.display()
                    );
                }
                dir
            }
            Self::NotARepository(dir) => {
                if path.is_relative() {
                    warn!(
                        "Workspace {} is not a git repository; resolving local origin '{}' of {} from it",
                        dir.display(),
                        origin,
                        identifier
                    );
                }
                dir
            }
        };

        let resolved = resolve_against(base, &path).display().to_string();
        debug!("Local origin '{}' of {} resolved to {}", origin, identifier, resolved);
        resolved
    }
}
