//! Interactive confirmation of a proposed commit description.

use dialoguer::{Input, Select};

use crate::error::PromptError;

/// Outcome of presenting a description to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Confirmation {
    Accept,
    /// Replace the description with this text verbatim.
    Edit(String),
    Cancel,
}

/// Asks a human whether a proposed description should be used.
#[cfg_attr(test, mockall::automock)]
pub trait Confirm {
    fn confirm(&self, description: &str) -> Result<Confirmation, PromptError>;
}

/// Terminal prompt backed by dialoguer.
pub struct TerminalConfirm;

const CHOICES: [&str; 3] = ["Yes, commit it", "Edit the description", "No, cancel"];

impl Confirm for TerminalConfirm {
    fn confirm(&self, description: &str) -> Result<Confirmation, PromptError> {
        let choice = Select::new()
            .with_prompt("Is this description correct?")
            .items(&CHOICES)
            .default(0)
            .interact_opt()
            .map_err(|e| PromptError::Interaction(e.to_string()))?;

        match choice {
            Some(0) => Ok(Confirmation::Accept),
            Some(1) => {
                let edited: String = Input::new()
                    .with_prompt("Enter your commit description")
                    .with_initial_text(description)
                    .interact_text()
                    .map_err(|e| PromptError::Interaction(e.to_string()))?;
                Ok(Confirmation::Edit(edited))
            }
            // Esc/q or the explicit "No" entry.
            _ => Ok(Confirmation::Cancel),
        }
    }
}
