//! Substring search over fragments and tag names.
//!
//! All functions here are pure reads over a snapshot. Matching is
//! case-insensitive and unranked: results keep the order of the input.

use crate::model::Fragment;

/// Fragments whose title, body or any tag name contains `term`.
///
/// A blank `term` matches everything.
pub fn search(fragments: &[Fragment], term: &str) -> Vec<Fragment> {
    if term.trim().is_empty() {
        return fragments.to_vec();
    }
    let needle = term.to_lowercase();
    fragments
        .iter()
        .filter(|f| matches_fragment(f, &needle))
        .cloned()
        .collect()
}

/// `needle` must already be lowercase.
fn matches_fragment(fragment: &Fragment, needle: &str) -> bool {
    fragment.title.to_lowercase().contains(needle)
        || fragment.body.to_lowercase().contains(needle)
        || fragment
            .tags
            .iter()
            .any(|t| t.to_lowercase().contains(needle))
}

/// Names containing `term`. A blank `term` returns every name.
pub fn filter_names(names: &[String], term: &str) -> Vec<String> {
    let needle = term.trim().to_lowercase();
    names
        .iter()
        .filter(|name| needle.is_empty() || name.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

/// Autocomplete over tag names.
///
/// Unlike [`filter_names`], blank input yields nothing, and names listed in
/// `exclude` (already picked) are skipped.
pub fn suggest_names(names: &[String], input: &str, exclude: &[String]) -> Vec<String> {
    let needle = input.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }
    names
        .iter()
        .filter(|name| !exclude.contains(name))
        .filter(|name| name.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}
