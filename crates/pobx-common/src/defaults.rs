//! Default values for fields missing from an export.
//!
//! Every optional extraction site resolves an absent value through one of
//! these helpers, so the fallback contract lives in one place.

/// Placeholder for any absent scalar field.
pub const UNKNOWN: &str = "Unknown";

/// Placeholder for a skill with neither a label nor text.
pub const UNKNOWN_SKILL: &str = "Unknown Skill";

/// Placeholder for a gem without a `nameSpec`.
pub const UNKNOWN_GEM: &str = "Unknown Gem";

/// Enabled flag used when a skill or gem does not say.
pub const DISABLED: &str = "false";

/// Return the value, or `fallback` when it is absent.
#[inline]
pub fn or_default(value: Option<&str>, fallback: &str) -> String {
    value.unwrap_or(fallback).to_string()
}

/// Return the value, or [`UNKNOWN`] when it is absent.
#[inline]
pub fn or_unknown(value: Option<&str>) -> String {
    or_default(value, UNKNOWN)
}

/// Return the line at `index`, or [`UNKNOWN`] when there are too few lines.
#[inline]
pub fn nth_or_unknown(lines: &[&str], index: usize) -> String {
    or_unknown(lines.get(index).copied())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_present_value_wins() {
        assert_eq!(or_unknown(Some("90")), "90");
        assert_eq!(or_default(Some(""), DISABLED), "");
    }

    #[test]
    fn test_absent_value_falls_back() {
        assert_eq!(or_unknown(None), UNKNOWN);
        assert_eq!(or_default(None, UNKNOWN_GEM), "Unknown Gem");
    }

    #[test]
    fn test_nth_line() {
        let lines = ["Rare", "Titanguard"];
        assert_eq!(nth_or_unknown(&lines, 1), "Titanguard");
        assert_eq!(nth_or_unknown(&lines, 2), UNKNOWN);
    }
}
