//! Shared test utilities for integration tests.
//!
//! Not all functions are used by every test file, but they're shared across tests.
#![allow(dead_code)]

use std::path::{Path, PathBuf};

use git2::{Oid, Repository, Signature};

use bentoo::config::ConfigStore;

/// A temporary overlay git repository for integration tests.
pub struct TestOverlay {
    pub dir: tempfile::TempDir,
    pub repo: Repository,
}

impl TestOverlay {
    /// Create a new empty overlay repository in a temp directory.
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp directory");
        let repo = Repository::init(dir.path()).expect("Failed to init git repo");
        Self { dir, repo }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Write a file relative to the overlay root, creating parent directories.
    pub fn write(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.root().join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent dirs");
        }
        std::fs::write(&path, content).expect("Failed to write file");
        path
    }

    /// Write an ebuild at `<category>/<package>/<package>-<version>.ebuild`.
    pub fn ebuild(&self, category: &str, package: &str, version: &str) -> PathBuf {
        self.write(
            &format!("{category}/{package}/{package}-{version}.ebuild"),
            &format!("EAPI=8\nDESCRIPTION=\"{package}\"\n"),
        )
    }

    /// Stage everything and commit through git2. Returns the commit OID.
    pub fn commit_all(&self, message: &str) -> Oid {
        let sig = Signature::now("Test User", "test@example.com").expect("Failed to create signature");

        let mut index = self.repo.index().expect("Failed to get index");
        index
            .add_all(["*"].iter(), git2::IndexAddOption::DEFAULT, None)
            .expect("Failed to add files");
        index.write().expect("Failed to write index");
        let tree_id = index.write_tree().expect("Failed to write tree");
        let tree = self.repo.find_tree(tree_id).expect("Failed to find tree");

        let parent = self.repo.head().ok().and_then(|h| h.peel_to_commit().ok());
        let parents: Vec<&git2::Commit> = parent.iter().collect();

        self.repo
            .commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
            .expect("Failed to create commit")
    }

    /// Message of the HEAD commit.
    pub fn head_message(&self) -> String {
        self.repo
            .head()
            .and_then(|h| h.peel_to_commit())
            .map(|c| c.message().unwrap_or("").to_string())
            .expect("Failed to read HEAD commit")
    }
}

/// A bentoo home directory with a config pointing at `overlay`.
pub fn config_store_for(overlay: &Path, home: &Path) -> ConfigStore {
    let store = ConfigStore::new(home.join(".bentoo"));
    store.ensure_structure().expect("Failed to create bentoo home");
    let config = serde_json::json!({
        "overlay": {
            "local": overlay.display().to_string(),
            "repo": { "user": "Overlay Dev", "email": "dev@example.com" }
        }
    });
    std::fs::write(store.config_path(), config.to_string()).expect("Failed to write config");
    store
}
