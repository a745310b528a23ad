//! Tag management commands.
//!
//! The store merges two tags when one is renamed onto the other. These
//! commands only let that happen when the caller asks for it.

use crate::commands::{CmdMessage, CmdResult};
use crate::error::{Result, WalletError};
use crate::store::fragment_store::{FragmentStore, RenameOutcome};
use crate::store::StorageBackend;
use crate::tags::TagSummary;

/// Lists tags with usage counts, optionally filtered by a search term.
pub fn list<B: StorageBackend>(
    store: &FragmentStore<B>,
    filter: Option<&str>,
) -> Result<CmdResult> {
    let summaries: Vec<TagSummary> = match filter {
        None => store.tag_summaries(),
        Some(term) => store
            .filter_tags(term)
            .into_iter()
            .map(|tag| {
                let usage = store.tag_usage(&tag.name);
                TagSummary { tag, usage }
            })
            .collect(),
    };

    let mut result = CmdResult::default();
    if summaries.is_empty() {
        result.add_message(CmdMessage::info(match filter {
            Some(term) => format!("No tags match '{}'.", term),
            None => "No tags defined.".to_string(),
        }));
    }
    Ok(result.with_listed_tags(summaries))
}

pub fn add<B: StorageBackend>(
    store: &mut FragmentStore<B>,
    name: &str,
    color: Option<&str>,
) -> Result<CmdResult> {
    let tag = store.add_tag(name, color)?;
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!("Tag '{}' created", tag.name)));
    Ok(result
        .with_listed_tags(vec![TagSummary { tag, usage: 0 }])
        .with_durability_warning(store.is_degraded()))
}

pub fn remove<B: StorageBackend>(
    store: &mut FragmentStore<B>,
    names: &[String],
) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    for name in names {
        let usage = store.tag_usage(name);
        if store.remove_tag(name) {
            result.add_message(CmdMessage::success(format!(
                "Tag '{}' removed from {} fragment(s)",
                name, usage
            )));
        } else {
            result.add_message(CmdMessage::warning(format!("Tag '{}' not found", name)));
        }
    }
    Ok(result.with_durability_warning(store.is_degraded()))
}

/// Renames `old_name` to `new_name`. Renaming onto an existing tag fails
/// unless `merge` is set.
pub fn rename<B: StorageBackend>(
    store: &mut FragmentStore<B>,
    old_name: &str,
    new_name: &str,
    merge: bool,
) -> Result<CmdResult> {
    let target = new_name.trim();
    if !merge && target != old_name && store.tag_exists(target) && store.tag_exists(old_name) {
        return Err(WalletError::Api(format!(
            "Tag '{}' already exists (use --merge to combine '{}' into it)",
            target, old_name
        )));
    }

    let mut result = CmdResult::default();
    match store.rename_tag(old_name, new_name)? {
        RenameOutcome::Unchanged => {
            result.add_message(CmdMessage::info("Nothing to rename."));
        }
        RenameOutcome::Renamed { fragments } => {
            result.add_message(CmdMessage::success(format!(
                "Tag '{}' renamed to '{}' ({} fragment(s) updated)",
                old_name, target, fragments
            )));
        }
        RenameOutcome::Merged { fragments } => {
            result.add_message(CmdMessage::success(format!(
                "Tag '{}' merged into '{}' ({} fragment(s) updated)",
                old_name, target, fragments
            )));
        }
    }
    Ok(result.with_durability_warning(store.is_degraded()))
}

pub fn color<B: StorageBackend>(
    store: &mut FragmentStore<B>,
    name: &str,
    color: &str,
) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    if !store.tag_exists(name) {
        result.add_message(CmdMessage::warning(format!(
            "Tag '{}' is not registered; color stored anyway",
            name
        )));
    }
    store.set_tag_color(name, color);
    result.add_message(CmdMessage::success(format!(
        "Tag '{}' color set to {}",
        name, color
    )));
    Ok(result.with_durability_warning(store.is_degraded()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::MessageLevel;
    use crate::store::mem_backend::MemBackend;

    fn store() -> FragmentStore<MemBackend> {
        let mut store = FragmentStore::open(MemBackend::new());
        store.add_fragment("Loop", "pass", ["python"]).unwrap();
        store.add_fragment("Copy", "cp a b", ["shell", "python"]).unwrap();
        store
    }

    #[test]
    fn lists_with_usage() {
        let s = store();
        let result = list(&s, None).unwrap();
        assert_eq!(result.listed_tags.len(), 2);
        assert_eq!(result.listed_tags[0].tag.name, "python");
        assert_eq!(result.listed_tags[0].usage, 2);
    }

    #[test]
    fn filter_with_no_match_says_so() {
        let s = store();
        let result = list(&s, Some("rust")).unwrap();
        assert!(result.listed_tags.is_empty());
        assert_eq!(result.messages.len(), 1);
    }

    #[test]
    fn add_duplicate_fails() {
        let mut s = store();
        assert!(add(&mut s, "python", None).is_err());
        assert!(add(&mut s, "rust", Some("#dea584")).is_ok());
    }

    #[test]
    fn remove_unknown_warns() {
        let mut s = store();
        let result = remove(&mut s, &["python".into(), "nope".into()]).unwrap();
        assert_eq!(result.messages[0].level, MessageLevel::Success);
        assert_eq!(result.messages[1].level, MessageLevel::Warning);
        assert!(!s.tag_exists("python"));
    }

    #[test]
    fn rename_collision_requires_merge() {
        let mut s = store();
        let err = rename(&mut s, "python", "shell", false).unwrap_err();
        assert!(matches!(err, WalletError::Api(_)));
        assert!(s.tag_exists("python"));

        rename(&mut s, "python", "shell", true).unwrap();
        assert!(!s.tag_exists("python"));
        assert_eq!(s.tag_usage("shell"), 2);
    }

    #[test]
    fn rename_unknown_is_not_found() {
        let mut s = store();
        let err = rename(&mut s, "haskell", "hs", false).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn color_on_unregistered_warns() {
        let mut s = store();
        let result = color(&mut s, "ghost", "#000000").unwrap();
        assert_eq!(result.messages[0].level, MessageLevel::Warning);
        assert_eq!(s.get_tag_color("ghost"), "#000000");
    }
}
