//! Change classification and commit description synthesis for overlay trees.

pub mod compose;
pub mod parser;
pub mod record;
pub mod version;

pub use compose::{GroupedChanges, KindGroup, compose};
pub use parser::{match_recipe, parse_line, parse_status};
pub use record::{ChangeKind, ChangeRecord, ChangeSubject, Recipe, VersionInfo};
pub use version::VersionString;

/// Parse a status listing and compose its description in one step.
pub fn describe_status(status: &str) -> String {
    compose(&parse_status(status))
}
