//! Error types and handling for Frundles
//!
//! Uses `thiserror` for error definitions and `miette` for pretty diagnostics.
//!
//! This module is organized into sub-modules by error domain:
//! - [`config`]: Workspace configuration errors
//! - [`git`]: Git operation errors
//! - [`lockfile`]: Lock file errors
//! - [`workspace`]: Workspace and catalog errors

#![allow(dead_code, unused_assignments)]

pub mod config;
pub mod git;
pub mod lockfile;
pub mod workspace;

use miette::Diagnostic;
use thiserror::Error;

/// Main error type for Frundles operations
#[derive(Error, Diagnostic, Debug)]
pub enum FrundlesError {
    // Identity errors
    #[error("Unlocked library: {identifier}")]
    #[diagnostic(
        code(frundles::identity::unlocked_refspec),
        help("The identifier must be locked to a commit before this operation")
    )]
    UnlockedRefSpec { identifier: String },

    // Lock file errors
    #[error("Syntax error in lock file {path}, line {line}: {reason}\n  > {content}")]
    #[diagnostic(
        code(frundles::lockfile::syntax),
        help("Each line must be 'kind:name:refspec_kind:refspec_value:locked_commit'")
    )]
    LockFileSyntax {
        path: String,
        line: usize,
        content: String,
        reason: String,
    },

    #[error("Lock file already contains an entry for '{identifier}'")]
    #[diagnostic(
        code(frundles::lockfile::duplicate_identifier),
        help("Use 'frundles bump' or 'frundles bump-all' to re-pin an existing entry")
    )]
    DuplicateLockfileIdentifier { identifier: String },

    // Configuration errors
    #[error("Multiple references given for '{name}': {fields}")]
    #[diagnostic(
        code(frundles::config::multiple_refspec),
        help("Specify exactly one of 'branch', 'tag' or 'commit'")
    )]
    MultipleRefSpec { name: String, fields: String },

    #[error("No reference given for '{name}'")]
    #[diagnostic(
        code(frundles::config::missing_refspec),
        help("Specify exactly one of 'branch', 'tag' or 'commit'")
    )]
    MissingRefSpec { name: String },

    #[error("Duplicate friendly name: {name}")]
    #[diagnostic(
        code(frundles::config::duplicate_friendly_name),
        help("Give each library a distinct 'friendly_name'")
    )]
    DuplicateFriendlyName { name: String },

    #[error("Configuration file not found: {path}")]
    #[diagnostic(code(frundles::config::not_found))]
    ConfigNotFound { path: String },

    #[error("Failed to parse configuration file: {path}: {reason}")]
    #[diagnostic(code(frundles::config::parse_failed))]
    ConfigParseFailed { path: String, reason: String },

    #[error("Invalid configuration: {message}")]
    #[diagnostic(code(frundles::config::invalid))]
    ConfigInvalid { message: String },

    #[error("Failed to read configuration file: {path}: {reason}")]
    #[diagnostic(code(frundles::config::read_failed))]
    ConfigReadFailed { path: String, reason: String },

    // Workspace errors
    #[error("No workspace found from {path}")]
    #[diagnostic(
        code(frundles::workspace::not_found),
        help("Run frundles from a directory containing frundles.yml, or one of its subdirectories")
    )]
    WorkspaceNotFound { path: String },

    #[error("Catalog path is not a directory: {path}")]
    #[diagnostic(code(frundles::catalog::not_a_dir))]
    CatalogNotADir { path: String },

    #[error("Catalog directory is not writable: {path}")]
    #[diagnostic(code(frundles::catalog::write_access))]
    CatalogWriteAccess { path: String },

    #[error("No library or external named '{name}'")]
    #[diagnostic(
        code(frundles::workspace::artifact_not_found),
        help("Run 'frundles list' to see available friendly names")
    )]
    ArtifactNotFound { name: String },

    #[error("Cannot bump '{name}': it is fixed at a commit")]
    #[diagnostic(
        code(frundles::bump::fixed_commit),
        help("Edit the commit in frundles.yml, or pass --ignore-commits")
    )]
    CannotBumpFixedCommit { name: String },

    #[error("Synchronization incomplete: {failed} item(s) failed")]
    #[diagnostic(
        code(frundles::sync::incomplete),
        help("Fix the reported errors and run 'frundles sync' again")
    )]
    SyncIncomplete { failed: usize },

    // Git errors
    #[error("Invalid origin for {path}: expected '{expected}', found '{actual}'")]
    #[diagnostic(
        code(frundles::git::invalid_origin),
        help("Remove the checkout so it can be cloned again from the declared origin")
    )]
    InvalidOrigin {
        path: String,
        expected: String,
        actual: String,
    },

    #[error("Git operation failed: {message}")]
    #[diagnostic(code(frundles::git::operation_failed))]
    GitOperationFailed { message: String },

    #[error("Failed to clone repository: {url}: {reason}")]
    #[diagnostic(
        code(frundles::git::clone_failed),
        help("Check that URL is correct and you have access to repository")
    )]
    GitCloneFailed { url: String, reason: String },

    #[error("Failed to resolve git ref '{git_ref}': {reason}")]
    #[diagnostic(code(frundles::git::ref_resolve_failed))]
    GitRefResolveFailed { git_ref: String, reason: String },

    #[error("Failed to checkout commit '{sha}': {reason}")]
    #[diagnostic(code(frundles::git::checkout_failed))]
    GitCheckoutFailed { sha: String, reason: String },

    #[error("Failed to fetch from remote: {reason}")]
    #[diagnostic(code(frundles::git::fetch_failed))]
    GitFetchFailed { reason: String },

    #[error("Failed to open repository at '{path}': {reason}")]
    #[diagnostic(code(frundles::git::open_failed))]
    GitOpenFailed { path: String, reason: String },

    // File system errors
    #[error("Failed to read file: {path}: {reason}")]
    #[diagnostic(code(frundles::fs::read_failed))]
    FileReadFailed { path: String, reason: String },

    #[error("Failed to write file: {path}: {reason}")]
    #[diagnostic(code(frundles::fs::write_failed))]
    FileWriteFailed { path: String, reason: String },

    #[error("IO error: {message}")]
    #[diagnostic(code(frundles::fs::io_error))]
    IoError { message: String },
}

impl From<std::io::Error> for FrundlesError {
    fn from(err: std::io::Error) -> Self {
        FrundlesError::IoError {
            message: err.to_string(),
        }
    }
}

impl From<serde_yaml::Error> for FrundlesError {
    fn from(err: serde_yaml::Error) -> Self {
        FrundlesError::ConfigParseFailed {
            path: "unknown".to_string(),
            reason: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for FrundlesError {
    fn from(err: serde_json::Error) -> Self {
        FrundlesError::IoError {
            message: err.to_string(),
        }
    }
}

impl From<git2::Error> for FrundlesError {
    fn from(err: git2::Error) -> Self {
        FrundlesError::GitOperationFailed {
            message: err.to_string(),
        }
    }
}

/// Result type alias using miette for error handling
pub type Result<T> = miette::Result<T, FrundlesError>;

#[cfg(test)]
mod tests;
