//! Typed change records produced from a status listing.

use std::fmt;

/// Kind of change. Variant order is the order segments appear in a description.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ChangeKind {
    Added,
    Deleted,
    Modified,
    Upgraded,
    Downgraded,
}

impl ChangeKind {
    /// Short label used in commit descriptions.
    pub fn label(&self) -> &'static str {
        match self {
            ChangeKind::Added => "add",
            ChangeKind::Deleted => "del",
            ChangeKind::Modified => "mod",
            ChangeKind::Upgraded => "up",
            ChangeKind::Downgraded => "down",
        }
    }
}

impl fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Version carried by a recipe change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionInfo {
    Single(String),
    Transition { from: String, to: String },
}

impl VersionInfo {
    /// The version the tree ends up with after this change.
    pub fn current(&self) -> &str {
        match self {
            VersionInfo::Single(v) => v,
            VersionInfo::Transition { to, .. } => to,
        }
    }
}

impl fmt::Display for VersionInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VersionInfo::Single(v) => f.write_str(v),
            VersionInfo::Transition { from, to } => write!(f, "{from} -> {to}"),
        }
    }
}

/// A versioned ebuild at `<category>/<package>/<name>-<version>.ebuild`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recipe {
    pub category: String,
    pub package: String,
    pub name: String,
    pub version: VersionInfo,
}

/// What a change touched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangeSubject {
    Recipe(Recipe),
    /// Shared eclass, identified by its file name.
    HelperScript(String),
}

/// A single classified change from the status listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeRecord {
    pub kind: ChangeKind,
    pub subject: ChangeSubject,
}

impl ChangeRecord {
    /// True for `.eclass` changes, which render ahead of recipes.
    pub fn is_helper_script(&self) -> bool {
        matches!(self.subject, ChangeSubject::HelperScript(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_labels() {
        assert_eq!(ChangeKind::Added.to_string(), "add");
        assert_eq!(ChangeKind::Deleted.to_string(), "del");
        assert_eq!(ChangeKind::Modified.to_string(), "mod");
        assert_eq!(ChangeKind::Upgraded.to_string(), "up");
        assert_eq!(ChangeKind::Downgraded.to_string(), "down");
    }

    #[test]
    fn test_kind_order_is_emission_priority() {
        let mut kinds = vec![
            ChangeKind::Downgraded,
            ChangeKind::Modified,
            ChangeKind::Upgraded,
            ChangeKind::Added,
            ChangeKind::Deleted,
        ];
        kinds.sort();
        assert_eq!(
            kinds,
            vec![
                ChangeKind::Added,
                ChangeKind::Deleted,
                ChangeKind::Modified,
                ChangeKind::Upgraded,
                ChangeKind::Downgraded,
            ]
        );
    }

    #[test]
    fn test_version_info_display() {
        assert_eq!(VersionInfo::Single("1.2".into()).to_string(), "1.2");
        let t = VersionInfo::Transition {
            from: "1.0".into(),
            to: "2.0".into(),
        };
        assert_eq!(t.to_string(), "1.0 -> 2.0");
        assert_eq!(t.current(), "2.0");
    }
}
