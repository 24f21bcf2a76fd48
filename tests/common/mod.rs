//! Common test utilities for Frundles integration tests

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use git2::{IndexAddOption, Repository, RepositoryInitOptions, Signature};
use tempfile::TempDir;

/// Build a `frundles` command isolated from the developer's environment
#[allow(deprecated)]
pub fn frundles_cmd() -> Command {
    let mut cmd = Command::cargo_bin("frundles").expect("frundles binary");
    cmd.env_remove("FRUNDLES_WORKSPACE");
    cmd.env_remove("FRUNDLES_OUTPUT");
    cmd.env("GIT_TERMINAL_PROMPT", "0");
    cmd.env("NO_COLOR", "1");
    cmd
}

/// A temporary directory holding a root workspace and local origin repositories
pub struct TestWorkspace {
    pub temp: TempDir,
    /// Root workspace directory
    pub path: PathBuf,
    /// Directory holding the origin repositories
    pub origins: PathBuf,
}

impl TestWorkspace {
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let base = dunce::canonicalize(temp.path()).expect("Failed to canonicalize temp dir");
        let path = base.join("project");
        let origins = base.join("origins");
        fs::create_dir_all(&path).expect("Failed to create workspace directory");
        fs::create_dir_all(&origins).expect("Failed to create origins directory");
        Self {
            temp,
            path,
            origins,
        }
    }

    /// Write a file in the workspace
    pub fn write_file(&self, path: &str, content: &str) {
        let file_path = self.path.join(path);
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        fs::write(&file_path, content).expect("Failed to write file");
    }

    /// Read a file from the workspace
    pub fn read_file(&self, path: &str) -> String {
        fs::read_to_string(self.path.join(path)).expect("Failed to read file")
    }

    pub fn file_exists(&self, path: &str) -> bool {
        self.path.join(path).exists()
    }

    /// Write the root `frundles.yml`
    pub fn write_config(&self, content: &str) {
        self.write_file("frundles.yml", content);
    }

    pub fn lockfile(&self) -> String {
        self.read_file("frundles.lock")
    }

    /// Create an origin repository on branch `main` with one commit
    pub fn create_origin(&self, name: &str) -> GitOrigin {
        let path = self.origins.join(name);
        let mut opts = RepositoryInitOptions::new();
        opts.initial_head("main");
        Repository::init_opts(&path, &opts).expect("Failed to init origin");

        let origin = GitOrigin { path };
        origin.commit("README.md", &format!("# {name}\n"), "Initial commit");
        origin
    }
}

/// A local repository used as a dependency origin
pub struct GitOrigin {
    pub path: PathBuf,
}

impl GitOrigin {
    /// Origin as written in `frundles.yml`
    pub fn url(&self) -> String {
        self.path.display().to_string()
    }

    /// Write `file` and commit it on the current branch, returning the commit id
    pub fn commit(&self, file: &str, content: &str, message: &str) -> String {
        let repo = Repository::open(&self.path).expect("Failed to open origin");
        let file_path = self.path.join(file);
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        fs::write(&file_path, content).expect("Failed to write file");

        let mut index = repo.index().expect("Failed to open index");
        index
            .add_all(["*"].iter(), IndexAddOption::DEFAULT, None)
            .expect("Failed to stage files");
        index.write().expect("Failed to write index");
        let tree_id = index.write_tree().expect("Failed to write tree");
        let tree = repo.find_tree(tree_id).expect("Failed to find tree");

        let signature = Signature::now("Test", "test@example.com").expect("signature");
        let parents: Vec<git2::Commit<'_>> = repo
            .head()
            .ok()
            .and_then(|head| head.peel_to_commit().ok())
            .into_iter()
            .collect();
        let parent_refs: Vec<&git2::Commit<'_>> = parents.iter().collect();

        repo.commit(
            Some("HEAD"),
            &signature,
            &signature,
            message,
            &tree,
            &parent_refs,
        )
        .expect("Failed to commit")
        .to_string()
    }

    /// Annotated tag on HEAD
    pub fn tag(&self, name: &str) {
        let repo = Repository::open(&self.path).expect("Failed to open origin");
        let head = repo
            .head()
            .and_then(|head| head.peel_to_commit())
            .expect("Failed to read HEAD");
        let signature = Signature::now("Test", "test@example.com").expect("signature");
        repo.tag(name, head.as_object(), &signature, name, false)
            .expect("Failed to tag");
    }

    /// Current HEAD commit id
    pub fn head(&self) -> String {
        let repo = Repository::open(&self.path).expect("Failed to open origin");
        repo.head()
            .and_then(|head| head.peel_to_commit())
            .expect("Failed to read HEAD")
            .id()
            .to_string()
    }
}

/// `frundles.yml` content declaring libraries by (origin, branch)
pub fn config_with_branches(mode: &str, libraries: &[(&GitOrigin, &str)]) -> String {
    let mut yaml = format!("workspace:\n  catalog_dir: catalog\n  mode: {mode}\nlibraries:\n");
    for (origin, branch) in libraries {
        yaml.push_str(&format!(
            "  - origin: {}\n    branch: {branch}\n",
            origin.url()
        ));
    }
    yaml
}

/// Whether `path` is a checkout whose HEAD is `sha`
pub fn checkout_at(path: &Path, sha: &str) -> bool {
    Repository::open(path)
        .ok()
        .and_then(|repo| {
            repo.head()
                .ok()
                .and_then(|head| head.peel_to_commit().ok())
                .map(|commit| commit.id().to_string())
        })
        .is_some_and(|head| head == sha)
}
