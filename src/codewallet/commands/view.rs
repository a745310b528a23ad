use crate::commands::CmdResult;
use crate::error::Result;
use crate::index::FragmentSelector;
use crate::store::fragment_store::FragmentStore;
use crate::store::StorageBackend;

use super::helpers::fragments_by_selectors;

pub fn run<B: StorageBackend>(
    store: &FragmentStore<B>,
    selectors: &[FragmentSelector],
) -> Result<CmdResult> {
    let fragments = fragments_by_selectors(store, selectors)?;
    Ok(CmdResult::default().with_listed_fragments(fragments))
}
