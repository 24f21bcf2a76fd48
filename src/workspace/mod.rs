//! Workspace management for Frundles
//!
//! This module handles:
//! - Workspace discovery from a start directory
//! - Loading a workspace: configuration, local origins, lock file pins
//! - Catalog path resolution and catalog directory checks
//!
//! ## Workspace Structure
//!
//! ```text
//! project/
//! ├── frundles.yml      # Workspace configuration
//! ├── frundles.lock     # Pinned commits (root workspace)
//! └── catalog/          # Fetched libraries
//!     └── uart-4f1c0d2e.../
//!         └── frundles.yml   # Nested workspace, processed recursively
//! ```

pub mod catalog;
pub mod detection;
pub mod loader;
pub mod path;

pub use catalog::ensure_catalog_dir;
pub use detection::{find_current, find_root, is_workspace};
pub use loader::{LoadedWorkspace, load};
