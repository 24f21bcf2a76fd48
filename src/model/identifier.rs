//! Artifact identity
//!
//! An [`ItemIdentifier`] names one artifact at one revision. Its identity is not
//! the struct's fields but an [`IdentityKey`] derived from them: once an identifier
//! is locked, only the locked commit counts, so a branch-pinned and a commit-pinned
//! declaration resolving to the same commit are the same artifact.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use serde::Serialize;

use super::refspec::RefSpec;
use crate::error::{FrundlesError, Result};

/// Whether an artifact lives in the catalog or at an explicit destination
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactKind {
    Library,
    External,
}

impl ArtifactKind {
    /// Token used in the lock file
    pub fn as_str(self) -> &'static str {
        match self {
            ArtifactKind::Library => "lib",
            ArtifactKind::External => "ext",
        }
    }
}

impl FromStr for ArtifactKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "lib" => Ok(ArtifactKind::Library),
            "ext" => Ok(ArtifactKind::External),
            other => Err(format!("Invalid artifact kind: '{other}'")),
        }
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Effective identity of an identifier: `kind:name:revision`
///
/// `revision` is the locked commit when locked, the declared reference value otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IdentityKey {
    pub kind: ArtifactKind,
    pub name: String,
    pub revision: String,
}

impl fmt::Display for IdentityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.kind, self.name, self.revision)
    }
}

/// Identity of one dependency artifact
#[derive(Debug, Clone)]
pub struct ItemIdentifier {
    kind: ArtifactKind,
    name: String,
    refspec: RefSpec,
    locked_refspec: Option<RefSpec>,
    friendly_name: Option<String>,
}

impl ItemIdentifier {
    pub fn new(kind: ArtifactKind, name: impl Into<String>, refspec: RefSpec) -> Self {
        Self {
            kind,
            name: name.into(),
            refspec,
            locked_refspec: None,
            friendly_name: None,
        }
    }

    pub fn library(name: impl Into<String>, refspec: RefSpec) -> Self {
        Self::new(ArtifactKind::Library, name, refspec)
    }

    pub fn external(name: impl Into<String>, refspec: RefSpec) -> Self {
        Self::new(ArtifactKind::External, name, refspec)
    }

    #[must_use]
    pub fn with_friendly_name(mut self, friendly_name: impl Into<String>) -> Self {
        self.friendly_name = Some(friendly_name.into());
        self
    }

    pub fn kind(&self) -> ArtifactKind {
        self.kind
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The declared reference, as written in the configuration
    pub fn refspec(&self) -> &RefSpec {
        &self.refspec
    }

    pub fn locked_refspec(&self) -> Option<&RefSpec> {
        self.locked_refspec.as_ref()
    }

    pub fn friendly_name(&self) -> Option<&str> {
        self.friendly_name.as_deref()
    }

    pub fn is_locked(&self) -> bool {
        self.locked_refspec.is_some()
    }

    /// Returns a copy of this identifier bound to `locked_refspec`
    #[must_use]
    pub fn lock(&self, locked_refspec: RefSpec) -> Self {
        Self {
            locked_refspec: Some(locked_refspec),
            ..self.clone()
        }
    }

    /// Returns a copy of this identifier without its lock
    #[must_use]
    pub fn unlock(&self) -> Self {
        Self {
            locked_refspec: None,
            ..self.clone()
        }
    }

    /// The locked reference, or [`FrundlesError::UnlockedRefSpec`]
    pub fn require_locked(&self) -> Result<&RefSpec> {
        self.locked_refspec
            .as_ref()
            .ok_or_else(|| FrundlesError::UnlockedRefSpec {
                identifier: self.identifier(),
            })
    }

    /// Effective identity, used for equality, hashing and map keys
    pub fn key(&self) -> IdentityKey {
        let revision = self
            .locked_refspec
            .as_ref()
            .unwrap_or(&self.refspec)
            .value
            .clone();
        IdentityKey {
            kind: self.kind,
            name: self.name.clone(),
            revision,
        }
    }

    /// Identity of the unlocked form, whatever the lock state
    pub fn unlocked_key(&self) -> IdentityKey {
        IdentityKey {
            kind: self.kind,
            name: self.name.clone(),
            revision: self.refspec.value.clone(),
        }
    }

    /// `name:reference`, as declared
    pub fn identifier(&self) -> String {
        format!("{}:{}", self.name, self.refspec.value)
    }

    /// Friendly name if any, declared identifier otherwise
    pub fn display_name(&self) -> String {
        self.friendly_name
            .clone()
            .unwrap_or_else(|| self.identifier())
    }

    /// Folder-safe `name-reference`
    pub fn identifier_path(&self) -> String {
        sanitize_path_component(&format!("{}-{}", self.name, self.refspec.value))
    }

    /// Folder-safe `name-lockedcommit`; fails on an unlocked identifier
    pub fn locked_identifier_path(&self) -> Result<String> {
        let locked = self.require_locked()?;
        Ok(sanitize_path_component(&format!(
            "{}-{}",
            self.name, locked.value
        )))
    }
}

impl PartialEq for ItemIdentifier {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for ItemIdentifier {}

impl Hash for ItemIdentifier {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl fmt::Display for ItemIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_name())
    }
}

fn sanitize_path_component(value: &str) -> String {
    value.replace(['/', '\\'], "_")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    const SHA_A: &str = "1111111111111111111111111111111111111111";
    const SHA_B: &str = "2222222222222222222222222222222222222222";

    #[test]
    fn test_locked_identifiers_compare_on_commit_only() {
        let from_branch = ItemIdentifier::library("uart", RefSpec::branch("main"));
        let from_tag = ItemIdentifier::library("uart", RefSpec::tag("v1.0"));

        let a = from_branch.lock(RefSpec::commit(SHA_A));
        let b = from_tag.lock(RefSpec::commit(SHA_A));
        assert_eq!(a, b);

        let mut set = HashSet::new();
        set.insert(a);
        assert!(set.contains(&b));
    }

    #[test]
    fn test_unlocked_identifiers_compare_on_reference() {
        let a = ItemIdentifier::library("uart", RefSpec::branch("main"));
        let b = ItemIdentifier::library("uart", RefSpec::branch("develop"));
        assert_ne!(a, b);
        assert_ne!(a, a.lock(RefSpec::commit(SHA_A)));
    }

    #[test]
    fn test_kind_is_part_of_identity() {
        let lib = ItemIdentifier::library("uart", RefSpec::branch("main"));
        let ext = ItemIdentifier::external("uart", RefSpec::branch("main"));
        assert_ne!(lib, ext);
    }

    #[test]
    fn test_friendly_name_is_not_part_of_identity() {
        let a = ItemIdentifier::library("uart", RefSpec::branch("main")).with_friendly_name("x");
        let b = ItemIdentifier::library("uart", RefSpec::branch("main")).with_friendly_name("y");
        assert_eq!(a, b);
    }

    #[test]
    fn test_lock_does_not_mutate_and_unlock_restores() {
        let original =
            ItemIdentifier::library("uart", RefSpec::branch("main")).with_friendly_name("serial");
        let locked = original.lock(RefSpec::commit(SHA_A));

        assert!(!original.is_locked());
        assert!(locked.is_locked());

        let relocked = locked.lock(RefSpec::commit(SHA_B));
        assert_eq!(relocked.locked_refspec(), Some(&RefSpec::commit(SHA_B)));

        let unlocked = locked.unlock();
        assert!(!unlocked.is_locked());
        assert_eq!(unlocked.refspec(), original.refspec());
        assert_eq!(unlocked.name(), original.name());
        assert_eq!(unlocked.kind(), original.kind());
        assert_eq!(unlocked.friendly_name(), Some("serial"));
    }

    #[test]
    fn test_unlocked_key_ignores_lock() {
        let id = ItemIdentifier::library("uart", RefSpec::branch("main"));
        let locked = id.lock(RefSpec::commit(SHA_A));
        assert_eq!(locked.unlocked_key(), id.key());
        assert_eq!(locked.key().revision, SHA_A);
    }

    #[test]
    fn test_identifier_path_replaces_separators() {
        let id = ItemIdentifier::library("uart", RefSpec::branch("feature/fifo"));
        assert_eq!(id.identifier_path(), "uart-feature_fifo");
    }

    #[test]
    fn test_locked_identifier_path() {
        let id = ItemIdentifier::library("uart", RefSpec::branch("main"));
        assert!(matches!(
            id.locked_identifier_path(),
            Err(FrundlesError::UnlockedRefSpec { .. })
        ));

        let locked = id.lock(RefSpec::commit(SHA_A));
        assert_eq!(
            locked.locked_identifier_path().expect("locked"),
            format!("uart-{SHA_A}")
        );
    }

    #[test]
    fn test_display_name_defaults_to_identifier() {
        let id = ItemIdentifier::library("uart", RefSpec::tag("v2"));
        assert_eq!(id.display_name(), "uart:v2");
        assert_eq!(id.clone().with_friendly_name("serial").display_name(), "serial");
    }

    #[test]
    fn test_artifact_kind_tokens() {
        assert_eq!("lib".parse::<ArtifactKind>(), Ok(ArtifactKind::Library));
        assert_eq!("ext".parse::<ArtifactKind>(), Ok(ArtifactKind::External));
        assert!("library".parse::<ArtifactKind>().is_err());
    }
}
