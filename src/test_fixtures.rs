//! Test fixtures shared by unit tests
//!
//! Throwaway git repositories and workspace files, created under the system
//! temp directory and removed when the returned `TempDir` drops.
//!
//! ```ignore
//! let (_temp, repo) = create_git_repo();
//! let sha = commit_file(&repo, "README.md", "hello", "initial");
//! tag_head(&repo, "v1.0");
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use git2::{Repository, RepositoryInitOptions, Signature};
use tempfile::TempDir;

/// Branch created by [`create_git_repo`]
pub const DEFAULT_BRANCH: &str = "main";

fn temp_dir_base() -> PathBuf {
    let dir = std::env::temp_dir();
    if dir.is_absolute() {
        dir
    } else {
        PathBuf::from("/tmp")
    }
}

fn signature() -> Signature<'static> {
    Signature::now("Frundles Test", "test@frundles.invalid").expect("Failed to create signature")
}

/// Create a temp directory outside the current working directory
///
/// # Panics
///
/// Panics if the temp directory cannot be created.
#[must_use]
pub fn create_temp_dir() -> TempDir {
    TempDir::new_in(temp_dir_base()).expect("Failed to create temp directory")
}

/// Create a temp directory holding an empty repository on [`DEFAULT_BRANCH`]
///
/// # Panics
///
/// Panics if the temp directory or git repository cannot be created.
#[must_use]
pub fn create_git_repo() -> (TempDir, PathBuf) {
    let temp = create_temp_dir();
    let path = temp.path().to_path_buf();
    init_repo(&path);
    (temp, path)
}

/// Initialize a repository at `path` on [`DEFAULT_BRANCH`]
///
/// # Panics
///
/// Panics if the repository cannot be created.
pub fn init_repo(path: &Path) {
    let mut options = RepositoryInitOptions::new();
    options.initial_head(DEFAULT_BRANCH);
    Repository::init_opts(path, &options).expect("Failed to init git repository");
}

/// Write `file` in the repository at `repo_path` and commit it; returns the commit SHA
///
/// # Panics
///
/// Panics if any git operation fails.
pub fn commit_file(repo_path: &Path, file: &str, content: &str, message: &str) -> String {
    let repo = Repository::open(repo_path).expect("Failed to open repository");

    let full_path = repo_path.join(file);
    if let Some(parent) = full_path.parent() {
        fs::create_dir_all(parent).expect("Failed to create parent directory");
    }
    fs::write(&full_path, content).expect("Failed to write file");

    let mut index = repo.index().expect("Failed to open index");
    index
        .add_path(Path::new(file))
        .expect("Failed to stage file");
    index.write().expect("Failed to write index");
    let tree_id = index.write_tree().expect("Failed to write tree");
    let tree = repo.find_tree(tree_id).expect("Failed to find tree");

    let parent = repo.head().ok().and_then(|head| head.peel_to_commit().ok());
    let parents: Vec<&git2::Commit<'_>> = parent.iter().collect();

    let sig = signature();
    repo.commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
        .expect("Failed to commit")
        .to_string()
}

/// Create an annotated tag `name` on HEAD
///
/// # Panics
///
/// Panics if any git operation fails.
pub fn tag_head(repo_path: &Path, name: &str) {
    let repo = Repository::open(repo_path).expect("Failed to open repository");
    let head = repo
        .head()
        .and_then(|head| head.peel_to_commit())
        .expect("Failed to read HEAD");
    repo.tag(name, head.as_object(), &signature(), name, false)
        .expect("Failed to create tag");
}

/// Write a `frundles.yml` with `content` into `dir`
///
/// # Panics
///
/// Panics if the file cannot be written.
pub fn write_workspace_file(dir: &Path, content: &str) -> PathBuf {
    fs::create_dir_all(dir).expect("Failed to create workspace directory");
    let path = dir.join(crate::config::WORKSPACE_FILE_NAME);
    fs::write(&path, content).expect("Failed to write workspace file");
    path
}

/// Create nested directories below `base`
///
/// # Panics
///
/// Panics if the directory cannot be created.
#[must_use]
pub fn create_nested_dir(base: &Path, path: &str) -> PathBuf {
    let nested = base.join(path);
    fs::create_dir_all(&nested).expect("Failed to create nested directory");
    nested
}

/// Canonical form of an existing path, for comparisons
///
/// # Panics
///
/// Panics if the path does not exist.
#[must_use]
pub fn canonical(path: &Path) -> PathBuf {
    dunce::canonicalize(path).expect("Failed to canonicalize path")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_git_repo() {
        let (temp, path) = create_git_repo();
        assert!(path.join(".git").exists());
        assert!(temp.path().exists());
    }

    #[test]
    fn test_commit_file_chains_commits() {
        let (_temp, path) = create_git_repo();
        let first = commit_file(&path, "a.txt", "1", "first");
        let second = commit_file(&path, "dir/b.txt", "2", "second");
        assert_ne!(first, second);

        let repo = Repository::open(&path).expect("open");
        let head = repo.head().expect("head");
        assert_eq!(head.shorthand(), Some(DEFAULT_BRANCH));
        let commit = head.peel_to_commit().expect("commit");
        assert_eq!(commit.id().to_string(), second);
        assert_eq!(commit.parent_id(0).expect("parent").to_string(), first);
    }

    #[test]
    fn test_tag_head() {
        let (_temp, path) = create_git_repo();
        let sha = commit_file(&path, "a.txt", "1", "first");
        tag_head(&path, "v1");

        let repo = Repository::open(&path).expect("open");
        let tagged = repo
            .revparse_single("v1^{commit}")
            .expect("tag resolves");
        assert_eq!(tagged.id().to_string(), sha);
    }
}
