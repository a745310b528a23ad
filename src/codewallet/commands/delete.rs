use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::index::FragmentSelector;
use crate::store::fragment_store::FragmentStore;
use crate::store::StorageBackend;

use super::helpers::fragments_by_selectors;

/// Deletes every selected fragment.
///
/// Selectors are resolved before anything is deleted, so indexes refer to
/// the listing the user saw.
pub fn run<B: StorageBackend>(
    store: &mut FragmentStore<B>,
    selectors: &[FragmentSelector],
) -> Result<CmdResult> {
    let targets = fragments_by_selectors(store, selectors)?;
    let mut result = CmdResult::default();

    for target in targets {
        if store.delete_fragment(&target.fragment.id) {
            result.add_message(CmdMessage::success(format!(
                "Fragment deleted ({}): {}",
                target.index, target.fragment.title
            )));
            result.affected_fragments.push(target.fragment);
        }
    }

    Ok(result.with_durability_warning(store.is_degraded()))
}
