//! Git operation errors

use super::FrundlesError;

/// Creates an invalid origin error
pub fn invalid_origin(
    path: impl Into<String>,
    expected: impl Into<String>,
    actual: impl Into<String>,
) -> FrundlesError {
    FrundlesError::InvalidOrigin {
        path: path.into(),
        expected: expected.into(),
        actual: actual.into(),
    }
}

/// Creates a clone failure error
pub fn clone_failed(url: impl Into<String>, reason: impl Into<String>) -> FrundlesError {
    FrundlesError::GitCloneFailed {
        url: url.into(),
        reason: reason.into(),
    }
}

/// Creates a ref resolution error
pub fn ref_resolve_failed(git_ref: impl Into<String>, reason: impl Into<String>) -> FrundlesError {
    FrundlesError::GitRefResolveFailed {
        git_ref: git_ref.into(),
        reason: reason.into(),
    }
}

/// Creates a checkout failure error
pub fn checkout_failed(sha: impl Into<String>, reason: impl Into<String>) -> FrundlesError {
    FrundlesError::GitCheckoutFailed {
        sha: sha.into(),
        reason: reason.into(),
    }
}

/// Creates a fetch failure error
pub fn fetch_failed(reason: impl Into<String>) -> FrundlesError {
    FrundlesError::GitFetchFailed {
        reason: reason.into(),
    }
}

/// Creates a repository open error
pub fn open_failed(path: impl Into<String>, reason: impl Into<String>) -> FrundlesError {
    FrundlesError::GitOpenFailed {
        path: path.into(),
        reason: reason.into(),
    }
}
