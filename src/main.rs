//! bentoo - CLI entry point.

use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{debug, error, info};

use bentoo::config::ConfigStore;
use bentoo::confirm::TerminalConfirm;
use bentoo::git::{GitCli, VersionControl};
use bentoo::identity::{Identity, IdentityResolver};
use bentoo::logging;
use bentoo::workflow::{self, CommitOutcome};

/// Summarize overlay changes and drive the commit workflow.
#[derive(Parser, Debug)]
#[command(name = "bentoo")]
#[command(about = "Summarize ebuild overlay changes and drive the commit workflow")]
#[command(version)]
struct Cli {
    /// Show debug output on the console
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Work with the configured overlay
    Overlay {
        #[command(subcommand)]
        command: OverlayCommand,
    },
}

#[derive(Subcommand, Debug)]
enum OverlayCommand {
    /// Operate on the overlay git repository
    Repo {
        #[command(subcommand)]
        action: RepoAction,
    },
}

#[derive(Subcommand, Debug)]
enum RepoAction {
    /// Stage a path in the overlay
    Add {
        /// Path relative to the overlay root
        #[arg(default_value = ".")]
        path: String,
    },
    /// Show changes and the proposed commit description
    Status,
    /// Commit staged changes with a generated description
    Commit,
    /// Push committed changes to the remote
    Push,
    /// Show the identity commits will be made with
    Identity,
    /// Store the identity commits will be made with
    SetIdentity {
        /// Committer name
        name: String,
        /// Committer email
        email: String,
    },
}

/// Errors are reported through tracing rather than returned, so they also
/// reach the file log.
fn main() -> ExitCode {
    let cli = Cli::parse();

    let store = match prepare_home() {
        Ok(store) => store,
        Err(e) => {
            eprintln!("Error: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    logging::init(&store.log_file(), cli.verbose);
    debug!("Starting bentoo utility...");
    debug!("Arguments received: {:?}", std::env::args().collect::<Vec<_>>());

    let Command::Overlay {
        command: OverlayCommand::Repo { action },
    } = cli.command;

    match run_repo(action, store) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn prepare_home() -> Result<ConfigStore> {
    let store = ConfigStore::discover()?;
    store
        .ensure_structure()
        .context("Failed to prepare the bentoo home directory")?;
    Ok(store)
}

fn run_repo(action: RepoAction, store: ConfigStore) -> Result<()> {
    let config = store.load()?;
    debug!("Full config: {:?}", config);

    let open_overlay = || -> Result<GitCli> {
        let overlay = store.overlay_root(&config)?;
        GitCli::new(overlay).context("git is required")
    };

    match action {
        RepoAction::Add { path } => {
            let git = open_overlay()?;
            git.add(&path)
                .with_context(|| format!("Failed to add {path}"))?;
            info!("Files added successfully.");
        }
        RepoAction::Status => {
            let git = open_overlay()?;
            match workflow::status_report(&git)? {
                Some(report) => {
                    println!("Changes:\n{}", report.listing.trim_end());
                    if report.description.is_empty() {
                        println!("\nNo recognised overlay changes to describe.");
                    } else {
                        println!("\nProposed description: {}", report.description);
                    }
                }
                None => info!("Working directory is clean."),
            }
        }
        RepoAction::Commit => {
            let git = open_overlay()?;
            let resolver = IdentityResolver::discover(store.clone());
            let outcome = workflow::commit(&git, &TerminalConfirm, &resolver)
                .context("Failed to commit changes")?;
            report_commit(outcome, git.root());
        }
        RepoAction::Push => {
            let git = open_overlay()?;
            git.push().context("Push failed")?;
            info!("Changes pushed successfully.");
        }
        RepoAction::Identity => {
            let (identity, source) = IdentityResolver::discover(store.clone()).resolve()?;
            println!("{identity} (from {source})");
        }
        RepoAction::SetIdentity { name, email } => {
            IdentityResolver::discover(store.clone()).store_identity(&Identity { name, email })?;
        }
    }

    Ok(())
}

fn report_commit(outcome: CommitOutcome, overlay: &Path) {
    match outcome {
        CommitOutcome::Committed { output, .. } => {
            if !output.trim().is_empty() {
                println!("{}", output.trim_end());
            }
        }
        CommitOutcome::Clean => info!("No changes to commit in {}.", overlay.display()),
        CommitOutcome::Cancelled => info!("Commit cancelled."),
        CommitOutcome::NoDescription => info!("Commit aborted: empty description."),
    }
}
