//! Numeric version comparison for ebuild versions.

use std::cmp::Ordering;
use std::fmt;

/// The integer components of a version token, compared lexicographically.
///
/// Every maximal run of ASCII digits becomes one component, so `1.2_p3-r1`
/// reads as `[1, 2, 3, 1]`. Non-digit characters only separate components.
#[derive(Debug, Clone)]
pub struct VersionString {
    raw: String,
    parts: Vec<u64>,
}

impl VersionString {
    /// Split `raw` into its numeric components. Never fails; a token with
    /// no digits has no components and sorts before every other version.
    pub fn parse(raw: &str) -> Self {
        let parts = raw
            .split(|c: char| !c.is_ascii_digit())
            .filter(|run| !run.is_empty())
            // Absurdly long digit runs saturate rather than fail.
            .map(|run| run.parse::<u64>().unwrap_or(u64::MAX))
            .collect();

        Self {
            raw: raw.to_string(),
            parts,
        }
    }

    pub fn parts(&self) -> &[u64] {
        &self.parts
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl PartialEq for VersionString {
    fn eq(&self, other: &Self) -> bool {
        self.parts == other.parts
    }
}

impl Eq for VersionString {}

impl Ord for VersionString {
    fn cmp(&self, other: &Self) -> Ordering {
        self.parts.cmp(&other.parts)
    }
}

impl PartialOrd for VersionString {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for VersionString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_dotted() {
        assert_eq!(VersionString::parse("1.22.3").parts(), &[1, 22, 3]);
    }

    #[test]
    fn test_parse_mixed_suffixes() {
        assert_eq!(VersionString::parse("2.0_rc1-r2").parts(), &[2, 0, 1, 2]);
        assert_eq!(VersionString::parse("9999").parts(), &[9999]);
    }

    #[test]
    fn test_numeric_not_string_comparison() {
        // "1.10" < "1.9" as strings, but not as versions
        assert!(VersionString::parse("1.10") > VersionString::parse("1.9"));
        assert!(VersionString::parse("10") > VersionString::parse("9"));
    }

    #[test]
    fn test_longer_sequence_wins_on_common_prefix() {
        assert!(VersionString::parse("1.2.1") > VersionString::parse("1.2"));
        assert!(VersionString::parse("1.2-r1") > VersionString::parse("1.2"));
    }

    #[test]
    fn test_equal_components_compare_equal() {
        let a = VersionString::parse("1.0");
        let b = VersionString::parse("1_0");
        assert_eq!(a.cmp(&b), Ordering::Equal);
        assert_eq!(a, b);
        assert_ne!(a.as_str(), b.as_str());
    }

    #[test]
    fn test_overflowing_component_saturates() {
        let v = VersionString::parse("99999999999999999999999");
        assert_eq!(v.parts(), &[u64::MAX]);
    }

    #[test]
    fn test_digitless_token_sorts_first() {
        let v = VersionString::parse("beta");
        assert!(v.parts().is_empty());
        assert!(v < VersionString::parse("0"));
    }
}
