//! Display indexes and fragment selectors.
//!
//! Fragments are shown with a 1-based index in collection (insertion) order.
//! Users refer to fragments by that index, by a range of indexes (`2-4`), or
//! by full UUID.

use crate::model::Fragment;
use std::str::FromStr;
use uuid::Uuid;

/// A fragment paired with its display index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayFragment {
    pub index: usize,
    pub fragment: Fragment,
}

/// A user input selecting one fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FragmentSelector {
    Index(usize),
    Id(Uuid),
}

impl std::fmt::Display for FragmentSelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FragmentSelector::Index(i) => write!(f, "{}", i),
            FragmentSelector::Id(id) => write!(f, "{}", id),
        }
    }
}

impl FromStr for FragmentSelector {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(id) = Uuid::parse_str(s) {
            return Ok(FragmentSelector::Id(id));
        }
        match s.parse::<usize>() {
            Ok(0) => Err("Indexes start at 1".to_string()),
            Ok(n) => Ok(FragmentSelector::Index(n)),
            Err(_) => Err(format!("Invalid index format: {}", s)),
        }
    }
}

/// Assigns display indexes to fragments, keeping their order.
pub fn index_fragments(fragments: Vec<Fragment>) -> Vec<DisplayFragment> {
    fragments
        .into_iter()
        .enumerate()
        .map(|(i, fragment)| DisplayFragment {
            index: i + 1,
            fragment,
        })
        .collect()
}

/// Parses a single input that may be an index, a UUID or a range.
///
/// A range `a-b` expands to every index from `a` to `b` inclusive; start
/// must not exceed end. UUIDs contain dashes too, so they are tried first.
pub fn parse_index_or_range(s: &str) -> Result<Vec<FragmentSelector>, String> {
    let s = s.trim();
    if Uuid::parse_str(s).is_ok() {
        return FragmentSelector::from_str(s).map(|sel| vec![sel]);
    }

    if let Some((start, end)) = s.split_once('-') {
        let start = parse_range_end(start)?;
        let end = parse_range_end(end)?;
        if start > end {
            return Err(format!(
                "Invalid range: start ({}) must be <= end ({})",
                start, end
            ));
        }
        return Ok((start..=end).map(FragmentSelector::Index).collect());
    }

    FragmentSelector::from_str(s).map(|sel| vec![sel])
}

fn parse_range_end(s: &str) -> Result<usize, String> {
    match FragmentSelector::from_str(s)? {
        FragmentSelector::Index(n) => Ok(n),
        FragmentSelector::Id(_) => Err(format!("Invalid range endpoint: {}", s)),
    }
}

/// Parses a list of inputs, expanding ranges and dropping repeats.
pub fn parse_selectors<S: AsRef<str>>(inputs: &[S]) -> Result<Vec<FragmentSelector>, String> {
    let mut out = Vec::new();
    for input in inputs {
        for sel in parse_index_or_range(input.as_ref())? {
            if !out.contains(&sel) {
                out.push(sel);
            }
        }
    }
    Ok(out)
}
