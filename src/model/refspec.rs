//! Revision references

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

/// The kind of revision a [`RefSpec`] points at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RefSpecKind {
    Commit,
    Branch,
    Tag,
}

impl RefSpecKind {
    /// Token used in the lock file and the configuration file
    pub fn as_str(self) -> &'static str {
        match self {
            RefSpecKind::Commit => "commit",
            RefSpecKind::Branch => "branch",
            RefSpecKind::Tag => "tag",
        }
    }
}

impl FromStr for RefSpecKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "commit" => Ok(RefSpecKind::Commit),
            "branch" => Ok(RefSpecKind::Branch),
            "tag" => Ok(RefSpecKind::Tag),
            other => Err(format!("Invalid refspec kind: '{other}'")),
        }
    }
}

impl fmt::Display for RefSpecKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A reference to a revision: a commit, a branch or a tag
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct RefSpec {
    pub kind: RefSpecKind,
    pub value: String,
}

impl RefSpec {
    pub fn new(kind: RefSpecKind, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
        }
    }

    pub fn commit(sha: impl Into<String>) -> Self {
        Self::new(RefSpecKind::Commit, sha)
    }

    pub fn branch(name: impl Into<String>) -> Self {
        Self::new(RefSpecKind::Branch, name)
    }

    pub fn tag(name: impl Into<String>) -> Self {
        Self::new(RefSpecKind::Tag, name)
    }

    pub fn is_commit(&self) -> bool {
        self.kind == RefSpecKind::Commit
    }
}

impl fmt::Display for RefSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind, self.value)
    }
}

/// Check that `value` is a full 40-digit hexadecimal commit id
pub fn is_sha1(value: &str) -> bool {
    value.len() == 40 && value.chars().all(|c| c.is_ascii_hexdigit())
}
