//! Declared artifacts

use std::path::PathBuf;

use super::identifier::ItemIdentifier;
use super::refspec::RefSpec;

/// A library, checked out into the catalog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Library {
    pub identifier: ItemIdentifier,

    /// Git origin URL or local path
    pub origin: String,
}

impl Library {
    pub fn new(identifier: ItemIdentifier, origin: impl Into<String>) -> Self {
        Self {
            identifier,
            origin: origin.into(),
        }
    }

    #[must_use]
    pub fn lock(&self, refspec: RefSpec) -> Self {
        Self {
            identifier: self.identifier.lock(refspec),
            origin: self.origin.clone(),
        }
    }
}

/// An external, checked out at an explicit destination inside its workspace
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct External {
    pub identifier: ItemIdentifier,

    /// Git origin URL or local path
    pub origin: String,

    /// Destination, relative to the declaring workspace's directory
    pub dest_path: PathBuf,
}

impl External {
    pub fn new(
        identifier: ItemIdentifier,
        origin: impl Into<String>,
        dest_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            identifier,
            origin: origin.into(),
            dest_path: dest_path.into(),
        }
    }

    #[must_use]
    pub fn lock(&self, refspec: RefSpec) -> Self {
        Self {
            identifier: self.identifier.lock(refspec),
            origin: self.origin.clone(),
            dest_path: self.dest_path.clone(),
        }
    }
}

/// Either kind of artifact, as walked by the sync orchestrator
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Artifact {
    Library(Library),
    External(External),
}

impl Artifact {
    pub fn identifier(&self) -> &ItemIdentifier {
        match self {
            Artifact::Library(lib) => &lib.identifier,
            Artifact::External(ext) => &ext.identifier,
        }
    }

    pub fn origin(&self) -> &str {
        match self {
            Artifact::Library(lib) => &lib.origin,
            Artifact::External(ext) => &ext.origin,
        }
    }

    #[must_use]
    pub fn lock(&self, refspec: RefSpec) -> Self {
        match self {
            Artifact::Library(lib) => Artifact::Library(lib.lock(refspec)),
            Artifact::External(ext) => Artifact::External(ext.lock(refspec)),
        }
    }

    pub fn is_library(&self) -> bool {
        matches!(self, Artifact::Library(_))
    }
}

impl From<Library> for Artifact {
    fn from(lib: Library) -> Self {
        Artifact::Library(lib)
    }
}

impl From<External> for Artifact {
    fn from(ext: External) -> Self {
        Artifact::External(ext)
    }
}
