//! Fuzzy application/window name matching.
//!
//! Application ports resolve spoken names ("visual studio code") against
//! process and window titles. The scoring function is pluggable through
//! `NameMatcher`; `CharOverlapMatcher` is the default.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

/// Scores how similar two names are, in `[0, 1]`.
pub trait NameMatcher: Send + Sync {
    fn score(&self, a: &str, b: &str) -> f64;
}

/// Exact match scores 1.0, containment 0.8, otherwise the Jaccard index of
/// the two character sets. An empty name never matches.
#[derive(Debug, Clone, Copy, Default)]
pub struct CharOverlapMatcher;

impl NameMatcher for CharOverlapMatcher {
    fn score(&self, a: &str, b: &str) -> f64 {
        let a = a.to_lowercase();
        let b = b.to_lowercase();

        if a.is_empty() || b.is_empty() {
            return 0.0;
        }
        if a == b {
            return 1.0;
        }
        if a.contains(&b) || b.contains(&a) {
            return 0.8;
        }

        let set_a: HashSet<char> = a.chars().collect();
        let set_b: HashSet<char> = b.chars().collect();
        let total = set_a.union(&set_b).count();
        set_a.intersection(&set_b).count() as f64 / total as f64
    }
}

static EXECUTABLE_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\.(exe|app)$").expect("static regex"));
static VERSION_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*\d+(\.\d+)*\s*").expect("static regex"));
static SPECIAL_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9\s]").expect("static regex"));

/// Normalize an application name for matching: lower-case, drop `.exe`/`.app`,
/// version numbers and punctuation, collapse whitespace.
pub fn normalize_app_name(name: &str) -> String {
    let lower = name.to_lowercase();
    let name = EXECUTABLE_SUFFIX.replace(&lower, "");
    let name = VERSION_NUMBER.replace_all(&name, "");
    let name = SPECIAL_CHARS.replace_all(&name, "");
    name.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_match_is_one() {
        assert_eq!(CharOverlapMatcher.score("Chrome", "chrome"), 1.0);
    }

    #[test]
    fn containment_is_point_eight() {
        assert_eq!(CharOverlapMatcher.score("code", "visual studio code"), 0.8);
    }

    #[test]
    fn disjoint_names_score_zero() {
        assert_eq!(CharOverlapMatcher.score("abc", "xyz"), 0.0);
    }

    #[test]
    fn empty_name_never_matches() {
        assert_eq!(CharOverlapMatcher.score("", ""), 0.0);
        assert_eq!(CharOverlapMatcher.score("abc", ""), 0.0);
        assert_eq!(CharOverlapMatcher.score("", "google chrome"), 0.0);
    }

    #[test]
    fn partial_overlap_is_jaccard() {
        // {c,h,r,o,m,e} vs {c,h,r,o,m,i,u}: 5 shared of 8
        let s = CharOverlapMatcher.score("chrome", "chromiu");
        assert!((s - 0.625).abs() < 1e-9);
    }

    #[test]
    fn normalize_strips_suffix_and_version() {
        assert_eq!(normalize_app_name("Chrome.exe"), "chrome");
        assert_eq!(normalize_app_name("Python 3.12"), "python");
        assert_eq!(normalize_app_name("Notepad++"), "notepad");
        assert_eq!(normalize_app_name("  Visual   Studio Code "), "visual studio code");
        assert_eq!(normalize_app_name("2048"), "");
    }
}
