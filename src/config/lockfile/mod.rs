//! Lock file (frundles.lock) main module
//!
//! The lock file pins every floating reference (branch or tag) of a workspace
//! tree to the exact commit it resolved to. It is plain text, one record per
//! line, five colon-separated fields:
//!
//! ```text
//! lib:uart:branch:main:4f1c0d2e9a8b7c6d5e4f3a2b1c0d9e8f7a6b5c4d
//! ext:sim:tag:v1.2.0:0a1b2c3d4e5f60718293a4b5c6d7e8f901234567
//! ```
//!
//! Records are keyed by the *unlocked* identifier: a given declaration appears
//! at most once. Record order is preserved, new pins are appended at the end.

use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::Path;

use crate::error::{self, FrundlesError, Result};
use crate::model::{ArtifactKind, IdentityKey, ItemIdentifier, RefSpec, RefSpecKind, is_sha1};

/// Lock file name, at the workspace root
pub const LOCKFILE_NAME: &str = "frundles.lock";

/// Parsed lock file: locked identifiers in file order
#[derive(Debug, Clone, Default)]
pub struct Lockfile {
    entries: Vec<ItemIdentifier>,
}

impl Lockfile {
    /// Create an empty lockfile
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Read and parse the lock file at `path`
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| FrundlesError::FileReadFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Self::parse_str(&content, path)
    }

    /// Read the lock file at `path`, or an empty one when the file is absent
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::new())
        }
    }

    /// Parse lock file content; `path` is only used for diagnostics
    pub fn parse_str(content: &str, path: &Path) -> Result<Self> {
        let mut lockfile = Self::new();

        for (index, raw_line) in content.lines().enumerate() {
            let line_number = index + 1;
            let line = raw_line.trim();
            if line.is_empty() {
                continue;
            }

            let identifier = parse_record(line)
                .map_err(|reason| error::lockfile::syntax(path, line_number, line, reason))?;

            if lockfile.position(&identifier).is_some() {
                return Err(error::lockfile::syntax(
                    path,
                    line_number,
                    line,
                    format!("Duplicate entry for '{}'", identifier.unlocked_key()),
                ));
            }

            lockfile.entries.push(identifier);
        }

        Ok(lockfile)
    }

    /// Locked identifiers, in file order
    pub fn entries(&self) -> &[ItemIdentifier] {
        &self.entries
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Pinned commit for the unlocked form of `identifier`, if any
    pub fn locked_refspec(&self, identifier: &ItemIdentifier) -> Option<&RefSpec> {
        self.position(identifier)
            .and_then(|pos| self.entries[pos].locked_refspec())
    }

    /// Map from unlocked identity to pinned commit
    pub fn resolved_refspecs(&self) -> HashMap<IdentityKey, RefSpec> {
        self.entries
            .iter()
            .filter_map(|id| {
                id.locked_refspec()
                    .map(|locked| (id.unlocked_key(), locked.clone()))
            })
            .collect()
    }

    /// Add a locked identifier
    ///
    /// An existing entry for the same unlocked identifier is replaced in place when
    /// `replace_existing` is set; otherwise the insertion fails with
    /// [`FrundlesError::DuplicateLockfileIdentifier`].
    pub fn insert(&mut self, identifier: ItemIdentifier, replace_existing: bool) -> Result<()> {
        identifier.require_locked()?;

        match self.position(&identifier) {
            Some(pos) if replace_existing => {
                self.entries[pos] = identifier;
                Ok(())
            }
            Some(_) => Err(error::lockfile::duplicate_identifier(
                identifier.unlocked_key().to_string(),
            )),
            None => {
                self.entries.push(identifier);
                Ok(())
            }
        }
    }

    /// Serialize all records, one per line
    pub fn to_lock_string(&self) -> Result<String> {
        let mut out = String::new();
        for identifier in &self.entries {
            out.push_str(&format_record(identifier)?);
            out.push('\n');
        }
        Ok(out)
    }

    /// Write the lock file to `path`
    ///
    /// The content goes to a temporary file in the same directory first and is
    /// renamed over `path`, so readers never observe a half-written file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = self.to_lock_string()?;
        let write_failed = |reason: String| FrundlesError::FileWriteFailed {
            path: path.display().to_string(),
            reason,
        };

        let dir = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));

        let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(|e| write_failed(e.to_string()))?;
        tmp.write_all(content.as_bytes())
            .map_err(|e| write_failed(e.to_string()))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            tmp.as_file()
                .set_permissions(fs::Permissions::from_mode(0o644))
                .map_err(|e| write_failed(e.to_string()))?;
        }

        tmp.persist(path).map_err(|e| write_failed(e.error.to_string()))?;
        Ok(())
    }

    /// Drop the entry for the unlocked form of `identifier`, returning it
    pub fn remove(&mut self, identifier: &ItemIdentifier) -> Option<ItemIdentifier> {
        self.position(identifier).map(|pos| self.entries.remove(pos))
    }

    fn position(&self, identifier: &ItemIdentifier) -> Option<usize> {
        let key = identifier.unlocked_key();
        self.entries.iter().position(|e| e.unlocked_key() == key)
    }
}

/// Parse the lock file at `path`
pub fn parse(path: &Path) -> Result<Lockfile> {
    Lockfile::load(path)
}

/// Write `identifiers` to `path`, replacing its content
///
/// Every identifier must be locked.
pub fn write(path: &Path, identifiers: &[ItemIdentifier]) -> Result<()> {
    let mut lockfile = Lockfile::new();
    for identifier in identifiers {
        lockfile.insert(identifier.clone(), false)?;
    }
    lockfile.save(path)
}

/// Record one locked identifier in the lock file at `path`
///
/// A missing file is treated as empty. Returns the entry that was replaced,
/// if any, so the change can be undone with [`revert`]. Not safe against
/// concurrent writers.
pub fn append(
    path: &Path,
    identifier: &ItemIdentifier,
    replace_existing: bool,
) -> Result<Option<ItemIdentifier>> {
    identifier.require_locked()?;

    let mut lockfile = if path.exists() {
        parse(path)?
    } else {
        Lockfile::new()
    };
    let replaced = lockfile
        .position(identifier)
        .map(|pos| lockfile.entries[pos].clone());
    lockfile.insert(identifier.clone(), replace_existing)?;
    lockfile.save(path)?;
    Ok(replaced)
}

/// Undo an [`append`] of `appended`
///
/// The entry it replaced is put back in place; without one, the appended
/// entry is dropped.
pub fn revert(
    path: &Path,
    appended: &ItemIdentifier,
    replaced: Option<&ItemIdentifier>,
) -> Result<()> {
    let mut lockfile = parse(path)?;
    match replaced {
        Some(previous) => lockfile.insert(previous.clone(), true)?,
        None => {
            lockfile.remove(appended);
        }
    }
    write(path, lockfile.entries())
}

fn parse_record(line: &str) -> std::result::Result<ItemIdentifier, String> {
    let tokens: Vec<&str> = line.split(':').map(str::trim).collect();
    let [kind, name, refspec_kind, refspec_value, locked_commit] = tokens.as_slice() else {
        return Err(format!(
            "Expected 5 fields separated by ':', found {}",
            tokens.len()
        ));
    };

    let kind: ArtifactKind = kind.parse()?;
    let refspec_kind: RefSpecKind = refspec_kind.parse()?;

    if name.is_empty() {
        return Err("Empty name".to_string());
    }

    if refspec_kind == RefSpecKind::Commit && !is_sha1(refspec_value) {
        return Err(format!(
            "'{refspec_value}' for refspec doesn't appear to be a valid SHA1"
        ));
    }

    if !is_sha1(locked_commit) {
        return Err(format!(
            "'{locked_commit}' doesn't appear to be a valid SHA1"
        ));
    }

    let refspec = RefSpec::new(refspec_kind, *refspec_value);
    Ok(ItemIdentifier::new(kind, *name, refspec).lock(RefSpec::commit(*locked_commit)))
}

fn format_record(identifier: &ItemIdentifier) -> Result<String> {
    let locked = identifier.require_locked()?;
    let refspec = identifier.refspec();
    Ok(format!(
        "{}:{}:{}:{}:{}",
        identifier.kind(),
        identifier.name(),
        refspec.kind,
        refspec.value,
        locked.value
    ))
}

#[cfg(test)]
mod tests;
