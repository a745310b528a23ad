use crate::commands::CmdResult;
use crate::error::Result;
use crate::store::fragment_store::FragmentStore;
use crate::store::StorageBackend;

use super::helpers::indexed_fragments;

/// Fragments matching `term` in title, body or tags, with their display
/// indexes from the full listing.
pub fn run<B: StorageBackend>(store: &FragmentStore<B>, term: &str) -> Result<CmdResult> {
    let matched: Vec<_> = store.search(term).into_iter().map(|f| f.id).collect();
    let listed = indexed_fragments(store)
        .into_iter()
        .filter(|df| matched.contains(&df.fragment.id))
        .collect();
    Ok(CmdResult::default().with_listed_fragments(listed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::create;
    use crate::store::mem_backend::MemBackend;

    #[test]
    fn matches_tags_case_insensitively() {
        let mut store = FragmentStore::open(MemBackend::new());
        create::run(&mut store, "Loop".into(), "pass".into(), vec!["python".into()]).unwrap();
        create::run(&mut store, "Copy".into(), "cp a b".into(), vec!["shell".into()]).unwrap();

        let result = run(&store, "SHELL").unwrap();
        assert_eq!(result.listed_fragments.len(), 1);
        assert_eq!(result.listed_fragments[0].index, 2);
    }

    #[test]
    fn blank_term_lists_everything() {
        let mut store = FragmentStore::open(MemBackend::new());
        create::run(&mut store, "Loop".into(), "pass".into(), vec![]).unwrap();
        create::run(&mut store, "Copy".into(), "cp".into(), vec![]).unwrap();
        assert_eq!(run(&store, " ").unwrap().listed_fragments.len(), 2);
    }
}
