use crate::commands::CmdResult;
use crate::error::Result;
use crate::store::fragment_store::FragmentStore;
use crate::store::StorageBackend;

use super::helpers::indexed_fragments;

/// Lists fragments, optionally only those carrying `tag`.
///
/// Indexes always come from the full listing so they stay valid as
/// selectors for other commands.
pub fn run<B: StorageBackend>(store: &FragmentStore<B>, tag: Option<&str>) -> Result<CmdResult> {
    let listed: Vec<_> = indexed_fragments(store)
        .into_iter()
        .filter(|df| tag.map_or(true, |t| df.fragment.has_tag(t)))
        .collect();
    Ok(CmdResult::default().with_listed_fragments(listed))
}
