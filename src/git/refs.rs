//! Remote reference resolution
//!
//! Branches and tags are resolved to commits by listing the remote's
//! references (`git ls-remote`) through libgit2; nothing is cloned.

use git2::{Direction, Remote, RemoteCallbacks};

use super::auth::setup_auth_callbacks;
use super::error::interpret_git_error;
use super::url::normalize_for_libgit2;
use crate::error::{self, Result};
use crate::model::{RefSpec, RefSpecKind};

/// One advertised remote reference: full ref name and target commit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteRef {
    pub name: String,
    pub oid: String,
}

/// List all references advertised by the remote at `url`
pub fn ls_remote(url: &str) -> Result<Vec<RemoteRef>> {
    let normalized = normalize_for_libgit2(url);
    let fetch_failed = |e: &git2::Error| {
        error::git::fetch_failed(format!("{url}: {}", interpret_git_error(e)))
    };

    let mut remote = Remote::create_detached(normalized.as_ref()).map_err(|e| fetch_failed(&e))?;

    let mut callbacks = RemoteCallbacks::new();
    setup_auth_callbacks(&mut callbacks);

    let connection = remote
        .connect_auth(Direction::Fetch, Some(callbacks), None)
        .map_err(|e| fetch_failed(&e))?;

    let heads = connection.list().map_err(|e| fetch_failed(&e))?;
    Ok(heads
        .iter()
        .map(|head| RemoteRef {
            name: head.name().to_string(),
            oid: head.oid().to_string(),
        })
        .collect())
}

/// Pick the commit `refspec` designates among advertised references
///
/// An annotated tag is advertised twice; the peeled `^{}` entry names the
/// commit while the plain entry names the tag object, so the peeled one wins.
pub fn find_commit(refs: &[RemoteRef], refspec: &RefSpec) -> Option<String> {
    let lookup = |name: &str| refs.iter().find(|r| r.name == name).map(|r| r.oid.clone());

    match refspec.kind {
        RefSpecKind::Commit => Some(refspec.value.clone()),
        RefSpecKind::Branch => lookup(&format!("refs/heads/{}", refspec.value)),
        RefSpecKind::Tag => {
            let tag = format!("refs/tags/{}", refspec.value);
            lookup(&format!("{tag}^{{}}")).or_else(|| lookup(&tag))
        }
    }
}

/// Resolve `refspec` on the remote at `url` to a full commit SHA
pub fn resolve_remote_ref(url: &str, refspec: &RefSpec) -> Result<String> {
    if refspec.is_commit() {
        return Ok(refspec.value.clone());
    }

    let refs = ls_remote(url)?;
    find_commit(&refs, refspec).ok_or_else(|| {
        error::git::ref_resolve_failed(
            refspec.to_string(),
            format!("no such {} on {url}", refspec.kind),
        )
    })
}
