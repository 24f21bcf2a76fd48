//! Git error interpretation
//!
//! libgit2 messages are precise but rarely actionable. The common failure
//! families get a short explanation in front of the original message.

use git2::{Error, ErrorClass, ErrorCode};

/// Failure family of a libgit2 error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Failure {
    NotFound,
    Authentication,
    PermissionDenied,
    Network,
    Certificate,
    Other,
}

fn classify(err: &Error) -> Failure {
    let message = err.message().to_lowercase();
    let mentions = |needles: &[&str]| needles.iter().any(|n| message.contains(n));

    if err.code() == ErrorCode::Auth || mentions(&["authentication", "credentials"]) {
        Failure::Authentication
    } else if err.code() == ErrorCode::Certificate || mentions(&["certificate", "ssl"]) {
        Failure::Certificate
    } else if mentions(&["not found", "404", "does not appear to be a git repository"]) {
        Failure::NotFound
    } else if mentions(&["permission denied", "access denied"]) {
        Failure::PermissionDenied
    } else if err.class() == ErrorClass::Net
        || mentions(&["connection", "network", "timed out", "timeout"])
    {
        Failure::Network
    } else {
        Failure::Other
    }
}

/// Describe a git2 error for the user
pub fn interpret_git_error(err: &Error) -> String {
    let prefix = match classify(err) {
        Failure::NotFound => "Repository not found",
        Failure::Authentication => "Authentication failed",
        Failure::PermissionDenied => "Permission denied",
        Failure::Network => "Network error",
        Failure::Certificate => "Certificate error",
        Failure::Other => return err.message().to_string(),
    };
    format!("{prefix} ({})", err.message())
}
