//! bentoo - summarize ebuild overlay changes into commit messages.
//!
//! # Overview
//!
//! bentoo reads `git status --porcelain` for a Gentoo-style overlay,
//! classifies ebuild and eclass changes (additions, removals, modifications,
//! version bumps via renames), and composes a compact one-line description
//! such as `add(cat/foo{,bar}-1.0), up(cat/pkg-1.0 -> 2.0)`. The commit
//! workflow proposes that description, lets the user accept, edit or cancel
//! it, and commits with an identity from `~/.gitconfig` or the bentoo config.

pub mod changes;
pub mod config;
pub mod confirm;
pub mod error;
pub mod git;
pub mod identity;
pub mod logging;
pub mod workflow;

// Re-export commonly used types
pub use changes::{ChangeKind, ChangeRecord, GroupedChanges, VersionString, compose, parse_status};
pub use error::{ConfigError, GitError, IdentityError, PromptError, WorkflowError};
pub use git::{GitCli, VersionControl};
pub use workflow::{CommitOutcome, StatusReport};
