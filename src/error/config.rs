//! Workspace configuration errors

use super::FrundlesError;

/// Creates a multiple refspec error, naming every reference field that was set
pub fn multiple_refspec(name: impl Into<String>, fields: &[&str]) -> FrundlesError {
    FrundlesError::MultipleRefSpec {
        name: name.into(),
        fields: fields.join(", "),
    }
}

/// Creates a missing refspec error
pub fn missing_refspec(name: impl Into<String>) -> FrundlesError {
    FrundlesError::MissingRefSpec { name: name.into() }
}

/// Creates a duplicate friendly name error
pub fn duplicate_friendly_name(name: impl Into<String>) -> FrundlesError {
    FrundlesError::DuplicateFriendlyName { name: name.into() }
}

/// Creates a configuration parse error
pub fn parse_failed(path: impl Into<String>, reason: impl Into<String>) -> FrundlesError {
    FrundlesError::ConfigParseFailed {
        path: path.into(),
        reason: reason.into(),
    }
}

/// Creates an invalid configuration error
pub fn invalid(message: impl Into<String>) -> FrundlesError {
    FrundlesError::ConfigInvalid {
        message: message.into(),
    }
}
