//! The commit workflow: status -> description -> confirmation -> commit.

use tracing::{debug, info, warn};

use crate::changes::{compose, parse_status};
use crate::confirm::{Confirm, Confirmation};
use crate::error::WorkflowError;
use crate::git::VersionControl;
use crate::identity::IdentityResolver;

/// Snapshot of the working tree with its proposed description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusReport {
    pub listing: String,
    /// Empty when no line matched an overlay pattern.
    pub description: String,
}

/// How a commit attempt ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitOutcome {
    Committed { message: String, output: String },
    /// The working tree had no changes.
    Clean,
    Cancelled,
    /// Nothing was recognised and no description was supplied.
    NoDescription,
}

/// Read the status and describe it. `None` means the tree is clean.
pub fn status_report(vcs: &dyn VersionControl) -> Result<Option<StatusReport>, WorkflowError> {
    debug!("Getting git status");
    let listing = vcs.status()?;
    if listing.trim().is_empty() {
        return Ok(None);
    }

    let records = parse_status(&listing);
    debug!("Classified {} change record(s)", records.len());
    let description = compose(&records);

    Ok(Some(StatusReport {
        listing,
        description,
    }))
}

/// Propose a description, confirm it, and commit with the resolved identity.
///
/// Nothing is committed on cancellation, on an empty final description, or
/// when identity resolution fails.
pub fn commit(
    vcs: &dyn VersionControl,
    confirm: &dyn Confirm,
    identities: &IdentityResolver,
) -> Result<CommitOutcome, WorkflowError> {
    debug!("Preparing to commit");
    let Some(report) = status_report(vcs)? else {
        debug!("Working tree is clean");
        return Ok(CommitOutcome::Clean);
    };

    if report.description.is_empty() {
        warn!("No recognised overlay changes; enter a description manually.");
    } else {
        info!("Proposed commit description:");
        info!("{}", report.description);
    }

    let message = match confirm.confirm(&report.description)? {
        Confirmation::Accept => report.description,
        Confirmation::Edit(text) => text,
        Confirmation::Cancel => {
            debug!("Commit cancelled by user");
            return Ok(CommitOutcome::Cancelled);
        }
    };

    if message.trim().is_empty() {
        warn!("Empty commit description; nothing committed.");
        return Ok(CommitOutcome::NoDescription);
    }

    let (identity, source) = identities.resolve()?;
    debug!("Committing as {} (from {})", identity, source);

    let output = vcs.commit(&message, &identity)?;
    info!("Changes committed successfully.");

    Ok(CommitOutcome::Committed { message, output })
}
