//! Address and name normalization for the fuzzy name+address strategy.

/// Street-level portion of a formatted address: everything before the first
/// comma, trimmed.
///
/// `"12 Main St, Springfield, IL"` becomes `"12 Main St"`. An address with
/// no comma is returned whole (trimmed). A leading comma yields `""`.
#[must_use]
pub fn street_fragment(address: &str) -> &str {
    address.split(',').next().unwrap_or_default().trim()
}

/// `%value%`, a "contains" pattern for `LIKE`-style matching.
///
/// `%` and `_` inside `value` are not escaped.
#[must_use]
pub fn contains_pattern(value: &str) -> String {
    format!("%{value}%")
}

/// The two patterns sent to the store for a name+address lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchPatterns {
    pub name: String,
    pub street: String,
}

impl MatchPatterns {
    /// An empty street fragment produces `%%`, which matches any non-null
    /// address.
    #[must_use]
    pub fn new(name: &str, address: &str) -> Self {
        Self {
            name: contains_pattern(name),
            street: contains_pattern(street_fragment(address)),
        }
    }
}

/// Case-insensitive `LIKE` evaluation: `%` matches any run of characters,
/// `_` matches exactly one.
#[must_use]
pub fn ilike(pattern: &str, value: &str) -> bool {
    let pattern: Vec<char> = pattern.to_lowercase().chars().collect();
    let value: Vec<char> = value.to_lowercase().chars().collect();

    let (mut p, mut v) = (0usize, 0usize);
    let mut backtrack: Option<(usize, usize)> = None;

    while v < value.len() {
        match pattern.get(p) {
            Some('%') => {
                backtrack = Some((p, v));
                p += 1;
            }
            Some(&c) if c == '_' || c == value[v] => {
                p += 1;
                v += 1;
            }
            _ => match backtrack {
                Some((bp, bv)) => {
                    p = bp + 1;
                    v = bv + 1;
                    backtrack = Some((bp, bv + 1));
                }
                None => return false,
            },
        }
    }

    pattern[p..].iter().all(|&c| c == '%')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn street_fragment_takes_text_before_first_comma() {
        assert_eq!(street_fragment("12 Main St, Springfield, IL"), "12 Main St");
    }

    #[test]
    fn street_fragment_without_comma_is_whole_trimmed_address() {
        assert_eq!(street_fragment("  12 Main St  "), "12 Main St");
    }

    #[test]
    fn street_fragment_with_leading_comma_is_empty() {
        assert_eq!(street_fragment(", Springfield"), "");
    }

    #[test]
    fn patterns_wrap_name_and_street() {
        let patterns = MatchPatterns::new("Joe's Diner", "12 Main St, Springfield");
        assert_eq!(patterns.name, "%Joe's Diner%");
        assert_eq!(patterns.street, "%12 Main St%");
    }

    #[test]
    fn empty_fragment_yields_match_all_pattern() {
        let patterns = MatchPatterns::new("Joe's Diner", "   , Springfield");
        assert_eq!(patterns.street, "%%");
        assert!(ilike(&patterns.street, "anything at all"));
        assert!(ilike(&patterns.street, ""));
    }

    #[test]
    fn ilike_contains_is_case_insensitive() {
        assert!(ilike("%joe's diner%", "JOE'S DINER Downtown"));
        assert!(ilike("%12 Main St%", "12 main st, Springfield, IL 62701"));
        assert!(!ilike("%12 Main St%", "14 Main St, Springfield"));
    }

    #[test]
    fn ilike_anchors_without_percent() {
        assert!(ilike("diner", "Diner"));
        assert!(!ilike("diner", "Diner Downtown"));
        assert!(ilike("diner%", "Diner Downtown"));
        assert!(!ilike("%diner", "Diner Downtown"));
    }

    #[test]
    fn ilike_underscore_matches_single_char() {
        assert!(ilike("%caf_%", "Blue Cafe"));
        assert!(!ilike("caf_", "caf"));
    }

    #[test]
    fn ilike_backtracks_across_repeated_prefixes() {
        assert!(ilike("%aab%", "aaab"));
        assert!(ilike("%a%b%c%", "xxaxxbxxcxx"));
        assert!(!ilike("%a%b%c%", "xxcxxbxxaxx"));
    }
}
