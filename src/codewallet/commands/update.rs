use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::index::FragmentSelector;
use crate::model::FragmentPatch;
use crate::store::fragment_store::FragmentStore;
use crate::store::StorageBackend;

use super::helpers::fragments_by_selectors;

pub fn run<B: StorageBackend>(
    store: &mut FragmentStore<B>,
    selector: FragmentSelector,
    patch: FragmentPatch,
) -> Result<CmdResult> {
    let target = fragments_by_selectors(store, &[selector])?.remove(0);
    let mut result = CmdResult::default();

    if patch.is_empty() {
        result.add_message(CmdMessage::info("Nothing to update."));
        return Ok(result);
    }

    let fragment = store.update_fragment(&target.fragment.id, patch)?;
    result.add_message(CmdMessage::success(format!(
        "Fragment updated ({}): {}",
        target.index, fragment.title
    )));
    Ok(result
        .with_affected_fragments(vec![fragment])
        .with_durability_warning(store.is_degraded()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{create, view};
    use crate::store::mem_backend::MemBackend;

    #[test]
    fn updates_body_only() {
        let mut store = FragmentStore::open(MemBackend::new());
        create::run(&mut store, "Title".into(), "Old".into(), vec!["a".into()]).unwrap();

        run(
            &mut store,
            FragmentSelector::Index(1),
            FragmentPatch::new().body("New"),
        )
        .unwrap();

        let listed = view::run(&store, &[FragmentSelector::Index(1)])
            .unwrap()
            .listed_fragments;
        assert_eq!(listed[0].fragment.body, "New");
        assert_eq!(listed[0].fragment.title, "Title");
        assert_eq!(listed[0].fragment.tags, vec!["a"]);
    }

    #[test]
    fn empty_patch_is_reported() {
        let mut store = FragmentStore::open(MemBackend::new());
        create::run(&mut store, "Title".into(), "Body".into(), vec![]).unwrap();
        let before = store.list_fragments();

        let result = run(&mut store, FragmentSelector::Index(1), FragmentPatch::new()).unwrap();

        assert!(result.affected_fragments.is_empty());
        assert_eq!(store.list_fragments(), before);
    }
}
