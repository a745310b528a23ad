//! Tag support for codewallet.
//!
//! A tag is identified by its name alone. The store keeps two collections for
//! tags:
//! - the **registry**: an ordered list of unique names
//! - the **color map**: name → display color
//!
//! Tags are registered implicitly the first time a fragment uses them, or
//! explicitly through `add_tag`. Renaming and removing a tag cascade to every
//! fragment that carries it, see [`crate::store::fragment_store`].

pub mod validation;

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

pub use validation::{normalize_tag_name, ValidationError};

/// Color given to tags that never had one set explicitly.
pub const DEFAULT_TAG_COLOR: &str = "#6c757d";

/// A tag as presented to callers: the registered name with its resolved color.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub name: String,
    pub color: String,
}

impl Tag {
    pub fn new(name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            color: color.into(),
        }
    }
}

/// A tag together with the number of fragments that carry it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagSummary {
    pub tag: Tag,
    pub usage: usize,
}

/// Normalizes a list of tag names for attaching to a fragment.
///
/// Names are trimmed, blank names are dropped and later duplicates are
/// suppressed. Order of first appearance is kept.
pub fn normalize_tag_list<I, S>(names: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    names
        .into_iter()
        .filter_map(|name| normalize_tag_name(name.as_ref()).ok())
        .filter(|name| seen.insert(name.clone()))
        .collect()
}
