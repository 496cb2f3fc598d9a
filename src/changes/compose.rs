//! Commit description synthesis from change records.

use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, BTreeSet};

use super::parser::HELPER_EXTENSION;
use super::record::{ChangeKind, ChangeRecord, ChangeSubject, VersionInfo};
use super::version::VersionString;

/// Packages of one category, keyed by package name.
pub type PackageVersions = BTreeMap<String, VersionInfo>;

/// Changes of a single kind.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct KindGroup {
    pub helpers: BTreeSet<String>,
    pub categories: BTreeMap<String, PackageVersions>,
}

impl KindGroup {
    fn is_empty(&self) -> bool {
        self.helpers.is_empty() && self.categories.is_empty()
    }
}

/// Change records folded by kind, then category, then package.
///
/// Ordered maps keep iteration independent of the order records arrive in.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct GroupedChanges {
    kinds: BTreeMap<ChangeKind, KindGroup>,
}

impl GroupedChanges {
    /// Group records by kind, then category, then package.
    pub fn from_records<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a ChangeRecord>,
    {
        let mut grouped = Self::default();
        for record in records {
            grouped.insert(record);
        }
        grouped
    }

    /// Add one record. A package already present under the same kind and
    /// category keeps whichever version sorts highest.
    pub fn insert(&mut self, record: &ChangeRecord) {
        let group = self.kinds.entry(record.kind).or_default();

        match &record.subject {
            ChangeSubject::HelperScript(name) => {
                group.helpers.insert(name.clone());
            }
            ChangeSubject::Recipe(recipe) => {
                let packages = group.categories.entry(recipe.category.clone()).or_default();
                match packages.entry(recipe.package.clone()) {
                    Entry::Vacant(slot) => {
                        slot.insert(recipe.version.clone());
                    }
                    // Several ebuilds of one package: describe the newest.
                    Entry::Occupied(mut slot) => {
                        if supersedes(&recipe.version, slot.get()) {
                            slot.insert(recipe.version.clone());
                        }
                    }
                }
            }
        }
    }

    pub fn get(&self, kind: ChangeKind) -> Option<&KindGroup> {
        self.kinds.get(&kind)
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.values().all(KindGroup::is_empty)
    }

    /// Render the one-line description.
    pub fn render(&self) -> String {
        let mut segments = Vec::new();

        for (kind, group) in &self.kinds {
            if !group.helpers.is_empty() {
                let names: Vec<&str> = group.helpers.iter().map(String::as_str).collect();
                segments.push(format!(
                    "{}_{}({})",
                    kind.label(),
                    helper_label(),
                    names.join(", ")
                ));
            }

            if !group.categories.is_empty() {
                let parts: Vec<String> = group
                    .categories
                    .iter()
                    .map(|(category, packages)| format_category(category, packages))
                    .collect();
                segments.push(format!("{}({})", kind.label(), parts.join(", ")));
            }
        }

        segments.join(", ")
    }
}

/// Compose the commit description for a set of change records.
///
/// Returns an empty string when there is nothing recognisable to describe.
pub fn compose(records: &[ChangeRecord]) -> String {
    GroupedChanges::from_records(records).render()
}

fn helper_label() -> &'static str {
    HELPER_EXTENSION.trim_start_matches('.')
}

fn supersedes(candidate: &VersionInfo, existing: &VersionInfo) -> bool {
    let key = |v: &VersionInfo| (VersionString::parse(v.current()), v.to_string());
    key(candidate) > key(existing)
}

/// Format the packages of one category.
fn format_category(category: &str, packages: &PackageVersions) -> String {
    let entries: Vec<(&str, String)> = packages
        .iter()
        .map(|(package, version)| (package.as_str(), version.to_string()))
        .collect();

    match entries.as_slice() {
        [(package, version)] => format!("{category}/{package}-{version}"),
        [(first, v1), (second, v2)] if v1 == v2 => match brace_pair(first, second) {
            Some(compact) => format!("{category}/{compact}-{v1}"),
            None => format_list(category, &entries),
        },
        _ => format_list(category, &entries),
    }
}

fn format_list(category: &str, entries: &[(&str, String)]) -> String {
    let items: Vec<String> = entries
        .iter()
        .map(|(package, version)| format!("{package}-{version}"))
        .collect();
    format!("{category}/{{{}}}", items.join(", "))
}

/// Brace-expansion form for two names where one contains the other at an edge.
///
/// `foo` + `foobar` -> `foo{,bar}`, `lib` + `pylib` -> `{,py}lib`.
fn brace_pair(a: &str, b: &str) -> Option<String> {
    let (short, long) = if a.len() <= b.len() { (a, b) } else { (b, a) };

    if let Some(rest) = long.strip_prefix(short) {
        return Some(format!("{short}{{,{rest}}}"));
    }
    if let Some(rest) = long.strip_suffix(short) {
        return Some(format!("{{,{rest}}}{short}"));
    }
    None
}
