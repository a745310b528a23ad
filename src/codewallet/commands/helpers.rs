use crate::error::{Result, WalletError};
use crate::index::{index_fragments, DisplayFragment, FragmentSelector};
use crate::store::fragment_store::FragmentStore;
use crate::store::StorageBackend;

pub fn indexed_fragments<B: StorageBackend>(store: &FragmentStore<B>) -> Vec<DisplayFragment> {
    index_fragments(store.list_fragments())
}

/// Resolves selectors to indexed fragments, in selector order.
///
/// Fails on the first selector that matches nothing.
pub fn fragments_by_selectors<B: StorageBackend>(
    store: &FragmentStore<B>,
    selectors: &[FragmentSelector],
) -> Result<Vec<DisplayFragment>> {
    let indexed = indexed_fragments(store);

    selectors
        .iter()
        .map(|sel| {
            let found = match sel {
                FragmentSelector::Index(i) => indexed.iter().find(|df| df.index == *i),
                FragmentSelector::Id(id) => indexed.iter().find(|df| &df.fragment.id == id),
            };
            match (found, sel) {
                (Some(df), _) => Ok(df.clone()),
                (None, FragmentSelector::Id(id)) => Err(WalletError::FragmentNotFound(*id)),
                (None, FragmentSelector::Index(i)) => {
                    Err(WalletError::Api(format!("Index {} not found", i)))
                }
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::mem_backend::MemBackend;
    use uuid::Uuid;

    #[test]
    fn resolves_index_and_id() {
        let mut store = FragmentStore::open(MemBackend::new());
        store.add_fragment("A", "a", ["x"]).unwrap();
        let b = store.add_fragment("B", "b", ["x"]).unwrap();

        let found = fragments_by_selectors(
            &store,
            &[FragmentSelector::Id(b.id), FragmentSelector::Index(1)],
        )
        .unwrap();
        assert_eq!(found[0].index, 2);
        assert_eq!(found[1].fragment.title, "A");
    }

    #[test]
    fn missing_selector_fails() {
        let store = FragmentStore::open(MemBackend::new());
        let err = fragments_by_selectors(&store, &[FragmentSelector::Index(1)]).unwrap_err();
        assert!(matches!(err, WalletError::Api(_)));

        let id = Uuid::new_v4();
        let err = fragments_by_selectors(&store, &[FragmentSelector::Id(id)]).unwrap_err();
        assert!(err.is_not_found());
    }
}
