//! Error types for bentoo modules using thiserror.

use std::path::PathBuf;

use thiserror::Error;

/// Errors from invoking the git executable.
#[derive(Error, Debug)]
pub enum GitError {
    #[error("git executable not found in PATH. Install git and try again.")]
    NotInstalled,

    #[error("Failed to run git {operation}: {source}")]
    SpawnFailed {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("git {operation} failed{}: {stderr}",
             code.map_or(String::new(), |c| format!(" with code {c}")))]
    NonZeroExit {
        operation: String,
        code: Option<i32>,
        stderr: String,
    },

    #[error("git {operation} produced non-UTF-8 output")]
    InvalidOutput { operation: String },
}

/// Errors from the bentoo config directory and config.json.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Could not determine home directory. Set BENTOO_HOME to choose a config location.")]
    NoHomeDirectory,

    #[error("Failed to create {}: {source}", path.display())]
    CreateFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read {}: {source}", path.display())]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {}: {source}", path.display())]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Error parsing {}: {source}", path.display())]
    ParseFailed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Error serializing config for {}: {source}", path.display())]
    SerializeFailed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Overlay path not configured. Set overlay.local in {}", path.display())]
    OverlayNotConfigured { path: PathBuf },

    #[error("Configured overlay path does not exist: {}", path.display())]
    OverlayMissing { path: PathBuf },
}

/// Errors from resolving or storing the committer identity.
#[derive(Error, Debug)]
pub enum IdentityError {
    #[error(
        "No git identity found. Set user.name and user.email in ~/.gitconfig or run 'bentoo overlay repo set-identity <name> <email>'"
    )]
    Missing,

    #[error("Failed to access git config {}: {source}", path.display())]
    GitConfig {
        path: PathBuf,
        #[source]
        source: git2::Error,
    },

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Errors from the interactive confirmation prompt.
#[derive(Error, Debug)]
pub enum PromptError {
    #[error("Interactive prompt failed: {0}")]
    Interaction(String),
}

/// Errors from the commit workflow.
#[derive(Error, Debug)]
pub enum WorkflowError {
    #[error(transparent)]
    Git(#[from] GitError),

    #[error(transparent)]
    Identity(#[from] IdentityError),

    #[error(transparent)]
    Prompt(#[from] PromptError),
}
