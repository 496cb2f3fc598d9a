//! Porcelain status parsing and ebuild path classification.

use std::cmp::Ordering;
use std::sync::LazyLock;

use regex_lite::Regex;
use tracing::debug;

use super::record::{ChangeKind, ChangeRecord, ChangeSubject, Recipe, VersionInfo};
use super::version::VersionString;

/// Files every package directory carries that never describe a change on their own.
pub const BOOKKEEPING_FILES: [&str; 2] = ["metadata.xml", "Manifest"];

/// Extension of shared helper scripts.
pub const HELPER_EXTENSION: &str = ".eclass";

const RENAME_ARROW: &str = " -> ";

/// `<category>/<package>/<name>-<version>.ebuild`, version optionally carrying a `-rN` revision.
static RECIPE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(.+)/([^/]+)/([^/]+)-(\d[\w.]*(?:-r\d+)?)\.ebuild$")
        .expect("recipe pattern is a valid regex")
});

/// Parse a porcelain status listing into change records.
///
/// Lines that are blank, malformed, refer to bookkeeping files, or match
/// neither the recipe nor the helper-script pattern produce no record.
pub fn parse_status(status: &str) -> Vec<ChangeRecord> {
    status.lines().filter_map(parse_line).collect()
}

/// Classify a single status line.
pub fn parse_line(line: &str) -> Option<ChangeRecord> {
    let (code, paths) = split_status_line(line)?;
    let status = code.chars().find(|c| !c.is_whitespace())?;

    let (old_path, path) = match paths.split_once(RENAME_ARROW) {
        Some((old, new)) => (Some(unquote(old)), unquote(new)),
        None => (None, unquote(paths)),
    };

    if is_bookkeeping(&path) {
        debug!("Skipping bookkeeping file: {}", path);
        return None;
    }

    let kind = match status {
        'A' => ChangeKind::Added,
        'M' => ChangeKind::Modified,
        'D' => ChangeKind::Deleted,
        'R' => {
            let Some(old_path) = old_path else {
                debug!("Skipping rename without source path: {}", line);
                return None;
            };
            return classify_rename(&old_path, &path);
        }
        other => {
            debug!("Skipping unsupported status '{}': {}", other, path);
            return None;
        }
    };

    classify_path(kind, &path)
}

/// Match a path against the recipe pattern.
pub fn match_recipe(path: &str) -> Option<Recipe> {
    let caps = RECIPE_PATTERN.captures(path)?;
    Some(Recipe {
        category: caps[1].to_string(),
        package: caps[2].to_string(),
        name: caps[3].to_string(),
        version: VersionInfo::Single(caps[4].to_string()),
    })
}

fn classify_path(kind: ChangeKind, path: &str) -> Option<ChangeRecord> {
    if let Some(recipe) = match_recipe(path) {
        return Some(ChangeRecord {
            kind,
            subject: ChangeSubject::Recipe(recipe),
        });
    }

    if path.ends_with(HELPER_EXTENSION) {
        let name = path.rsplit('/').next().unwrap_or(path);
        return Some(ChangeRecord {
            kind,
            subject: ChangeSubject::HelperScript(name.to_string()),
        });
    }

    debug!("Path matches no overlay pattern: {}", path);
    None
}

/// Both sides of a rename must be recipes; equal versions count as an upgrade.
fn classify_rename(old_path: &str, new_path: &str) -> Option<ChangeRecord> {
    let (Some(old), Some(new)) = (match_recipe(old_path), match_recipe(new_path)) else {
        debug!("Skipping rename outside recipe layout: {} -> {}", old_path, new_path);
        return None;
    };

    let from = old.version.current().to_string();
    let to = new.version.current().to_string();

    let kind = match VersionString::parse(&to).cmp(&VersionString::parse(&from)) {
        Ordering::Less => ChangeKind::Downgraded,
        Ordering::Greater | Ordering::Equal => ChangeKind::Upgraded,
    };

    Some(ChangeRecord {
        kind,
        subject: ChangeSubject::Recipe(Recipe {
            version: VersionInfo::Transition { from, to },
            ..new
        }),
    })
}

fn is_bookkeeping(path: &str) -> bool {
    BOOKKEEPING_FILES.iter().any(|name| path.ends_with(name))
}

/// Split a line into its status code and path field.
fn split_status_line(line: &str) -> Option<(&str, &str)> {
    let line = line.trim_end();
    if line.trim_start().is_empty() {
        return None;
    }

    // Porcelain v1: two status columns, a space, then the path.
    let bytes = line.as_bytes();
    if bytes.len() > 3 && bytes[2] == b' ' && bytes[..2].is_ascii() {
        let path = line[3..].trim_start();
        return (!path.is_empty()).then_some((&line[..2], path));
    }

    // Tolerate listings whose leading blank column was stripped.
    let (code, path) = line.trim_start().split_once(char::is_whitespace)?;
    let path = path.trim_start();
    if code.chars().count() > 2 || path.is_empty() {
        return None;
    }
    Some((code, path))
}

/// Undo git's C-style quoting of paths with unusual characters.
///
/// Octal escapes are raw bytes (`\303\251` is `é` in UTF-8), so the path is
/// rebuilt as bytes and decoded once at the end.
fn unquote(path: &str) -> String {
    let path = path.trim();
    let Some(inner) = path
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
    else {
        return path.to_string();
    };

    let bytes = inner.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] != b'\\' {
            out.push(bytes[i]);
            i += 1;
            continue;
        }

        let Some(&escaped) = bytes.get(i + 1) else {
            out.push(b'\\');
            break;
        };

        let octal = bytes[i + 1..]
            .iter()
            .take(3)
            .take_while(|&&b| (b'0'..=b'7').contains(&b))
            .count();
        if octal == 3 {
            let value = bytes[i + 1..i + 4]
                .iter()
                .fold(0u32, |acc, b| acc * 8 + u32::from(b - b'0'));
            // Out-of-range escapes never come from git; keep them literal.
            match u8::try_from(value) {
                Ok(byte) => out.push(byte),
                Err(_) => out.extend_from_slice(&bytes[i..i + 4]),
            }
            i += 4;
            continue;
        }

        out.push(match escaped {
            b'a' => 0x07,
            b'b' => 0x08,
            b'f' => 0x0c,
            b'n' => b'\n',
            b'r' => b'\r',
            b't' => b'\t',
            b'v' => 0x0b,
            other => other,
        });
        i += 2;
    }

    String::from_utf8_lossy(&out).into_owned()
}
