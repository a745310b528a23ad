use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::fragment_store::FragmentStore;
use crate::store::StorageBackend;

pub fn run<B: StorageBackend>(
    store: &mut FragmentStore<B>,
    title: String,
    body: String,
    tags: Vec<String>,
) -> Result<CmdResult> {
    let before = store.tag_names().len();
    let fragment = store.add_fragment(title, body, tags)?;
    let registered = store.tag_names().len() - before;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Fragment created ({}): {}",
        store.fragments().len(),
        fragment.title
    )));
    if registered > 0 {
        result.add_message(CmdMessage::info(format!(
            "Registered {} new tag(s)",
            registered
        )));
    }
    Ok(result
        .with_affected_fragments(vec![fragment])
        .with_durability_warning(store.is_degraded()))
}
