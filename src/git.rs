//! Git operations on the overlay repository.
//!
//! All operations shell out to the system `git` binary with the overlay root
//! as the working directory, inheriting the user's SSH agent and credential
//! store. The process-wide current directory is never changed.

use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::{debug, error};

use crate::error::GitError;
use crate::identity::Identity;

/// Version-control operations the commit workflow relies on.
///
/// This abstraction allows mocking git in tests.
#[cfg_attr(test, mockall::automock)]
pub trait VersionControl {
    /// Porcelain status listing; empty when the tree is clean.
    fn status(&self) -> Result<String, GitError>;

    /// Stage a path relative to the repository root.
    fn add(&self, path: &str) -> Result<(), GitError>;

    /// Commit staged changes with an explicit author/committer identity.
    fn commit(&self, message: &str, identity: &Identity) -> Result<String, GitError>;

    fn push(&self) -> Result<String, GitError>;
}

/// Runs the `git` executable inside a fixed repository root.
#[derive(Debug, Clone)]
pub struct GitCli {
    git: PathBuf,
    root: PathBuf,
}

impl GitCli {
    /// Locate `git` on `PATH` and bind it to `root`.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self, GitError> {
        let git = which::which("git").map_err(|_| GitError::NotInstalled)?;
        debug!("Using git executable: {}", git.display());
        Ok(Self::with_executable(git, root))
    }

    /// Bind an explicit `git` executable to `root`.
    pub fn with_executable(git: impl Into<PathBuf>, root: impl Into<PathBuf>) -> Self {
        Self {
            git: git.into(),
            root: root.into(),
        }
    }

    /// The repository root every command runs in.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Run a git command and return its stdout, or a descriptive error.
    fn run_git(&self, args: &[&str], operation: &str) -> Result<String, GitError> {
        debug!(
            "Executing git command in {}: git {}",
            self.root.display(),
            args.join(" ")
        );

        let output = Command::new(&self.git)
            .args(args)
            .current_dir(&self.root)
            .output()
            .map_err(|source| GitError::SpawnFailed {
                operation: operation.to_string(),
                source,
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            error!("Error executing git {}: {}", operation, stderr);
            return Err(GitError::NonZeroExit {
                operation: operation.to_string(),
                code: output.status.code(),
                stderr,
            });
        }

        debug!("Command executed successfully");
        String::from_utf8(output.stdout).map_err(|_| GitError::InvalidOutput {
            operation: operation.to_string(),
        })
    }
}

impl VersionControl for GitCli {
    fn status(&self) -> Result<String, GitError> {
        self.run_git(&["status", "--porcelain"], "status")
    }

    fn add(&self, path: &str) -> Result<(), GitError> {
        debug!("Adding path: {}", path);
        self.run_git(&["add", "--", path], "add").map(|_| ())
    }

    fn commit(&self, message: &str, identity: &Identity) -> Result<String, GitError> {
        let name = format!("user.name={}", identity.name);
        let email = format!("user.email={}", identity.email);
        self.run_git(
            &["-c", &name, "-c", &email, "commit", "-m", message],
            "commit",
        )
    }

    fn push(&self) -> Result<String, GitError> {
        debug!("Pushing changes to remote");
        self.run_git(&["push"], "push")
    }
}
