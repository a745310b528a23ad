//! Importing files as fragments.
//!
//! Each file becomes one fragment: the file name without its extension is
//! the title, the contents are the body, and the extension maps to a single
//! language tag.

use crate::commands::{CmdMessage, CmdResult};
use crate::error::{Result, WalletError};
use crate::model::Fragment;
use crate::store::fragment_store::FragmentStore;
use crate::store::StorageBackend;
use log::debug;
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

static LANGUAGES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("js", "JavaScript"),
        ("jsx", "React"),
        ("ts", "TypeScript"),
        ("tsx", "TypeScript React"),
        ("py", "Python"),
        ("java", "Java"),
        ("cpp", "C++"),
        ("c", "C"),
        ("h", "C Header"),
        ("css", "CSS"),
        ("html", "HTML"),
        ("xml", "XML"),
        ("json", "JSON"),
        ("md", "Markdown"),
        ("sql", "SQL"),
        ("sh", "Shell"),
        ("bat", "Batch"),
    ])
});

/// The tag for a file extension: a language name when known, otherwise the
/// extension in upper case.
pub fn language_tag(ext: &str) -> String {
    let ext = ext.to_lowercase();
    match LANGUAGES.get(ext.as_str()) {
        Some(lang) => lang.to_string(),
        None => ext.to_uppercase(),
    }
}

pub fn run<B: StorageBackend>(
    store: &mut FragmentStore<B>,
    paths: Vec<PathBuf>,
    import_exts: &[String],
) -> Result<CmdResult> {
    let mut result = CmdResult::default();

    for path in paths {
        if path.is_dir() {
            let mut entries: Vec<PathBuf> = fs::read_dir(&path)
                .map_err(WalletError::Io)?
                .filter_map(|entry| entry.ok().map(|e| e.path()))
                .filter(|p| p.is_file() && has_import_extension(p, import_exts))
                .collect();
            entries.sort();
            for file in entries {
                import_reporting(store, &file, &mut result);
            }
        } else if path.is_file() {
            import_reporting(store, &path, &mut result);
        } else {
            result.add_message(CmdMessage::warning(format!(
                "Path not found: {}",
                path.display()
            )));
        }
    }

    let count = result.affected_fragments.len();
    result.add_message(CmdMessage::success(format!("Total imported: {}", count)));
    Ok(result.with_durability_warning(store.is_degraded()))
}

fn has_import_extension(path: &Path, import_exts: &[String]) -> bool {
    path.extension()
        .map(|ext| format!(".{}", ext.to_string_lossy().to_lowercase()))
        .is_some_and(|ext| import_exts.contains(&ext))
}

fn import_reporting<B: StorageBackend>(
    store: &mut FragmentStore<B>,
    path: &Path,
    result: &mut CmdResult,
) {
    match import_file(store, path) {
        Ok(fragment) => {
            result.add_message(CmdMessage::info(format!("Imported: {}", path.display())));
            result.affected_fragments.push(fragment);
        }
        Err(e) => {
            result.add_message(CmdMessage::warning(format!(
                "Failed to import {}: {}",
                path.display(),
                e
            )));
        }
    }
}

fn import_file<B: StorageBackend>(store: &mut FragmentStore<B>, path: &Path) -> Result<Fragment> {
    let bytes = fs::read(path).map_err(WalletError::Io)?;
    let body = String::from_utf8(bytes)
        .map_err(|_| WalletError::Api("not a text file".to_string()))?;

    let title = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let tags: Vec<String> = path
        .extension()
        .map(|ext| language_tag(&ext.to_string_lossy()))
        .into_iter()
        .collect();

    debug!("Importing {} as '{}' {:?}", path.display(), title, tags);
    store.add_fragment(title, body, tags)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::MessageLevel;
    use crate::store::mem_backend::MemBackend;
    use tempfile::tempdir;

    fn exts() -> Vec<String> {
        vec![".py".to_string(), ".rb".to_string()]
    }

    #[test]
    fn language_tags() {
        assert_eq!(language_tag("py"), "Python");
        assert_eq!(language_tag("TSX"), "TypeScript React");
        assert_eq!(language_tag("rb"), "RB");
    }

    #[test]
    fn imports_single_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("loop.py");
        fs::write(&path, "for i in range(10): pass\n").unwrap();

        let mut store = FragmentStore::open(MemBackend::new());
        let result = run(&mut store, vec![path], &exts()).unwrap();

        assert_eq!(result.affected_fragments.len(), 1);
        let f = &store.fragments()[0];
        assert_eq!(f.title, "loop");
        assert_eq!(f.tags, vec!["Python"]);
        assert!(store.tag_exists("Python"));
    }

    #[test]
    fn explicit_file_ignores_extension_filter() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("notes.sql");
        fs::write(&path, "select 1;").unwrap();

        let mut store = FragmentStore::open(MemBackend::new());
        run(&mut store, vec![path], &exts()).unwrap();
        assert_eq!(store.fragments()[0].tags, vec!["SQL"]);
    }

    #[test]
    fn directory_is_filtered_and_not_recursive() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.py"), "print(1)").unwrap();
        fs::write(dir.path().join("b.rb"), "puts 1").unwrap();
        fs::write(dir.path().join("c.png"), "not really").unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        fs::write(dir.path().join("sub").join("d.py"), "print(2)").unwrap();

        let mut store = FragmentStore::open(MemBackend::new());
        let result = run(&mut store, vec![dir.path().to_path_buf()], &exts()).unwrap();

        assert_eq!(result.affected_fragments.len(), 2);
        let titles: Vec<_> = store.fragments().iter().map(|f| f.title.clone()).collect();
        assert_eq!(titles, vec!["a", "b"]);
    }

    #[test]
    fn empty_and_binary_files_are_reported() {
        let dir = tempdir().unwrap();
        let empty = dir.path().join("empty.py");
        let binary = dir.path().join("blob.py");
        fs::write(&empty, "").unwrap();
        fs::write(&binary, [0xff, 0xfe, 0x00, 0x80]).unwrap();

        let mut store = FragmentStore::open(MemBackend::new());
        let result = run(&mut store, vec![empty, binary], &exts()).unwrap();

        assert!(store.fragments().is_empty());
        let warnings = result
            .messages
            .iter()
            .filter(|m| m.level == MessageLevel::Warning)
            .count();
        assert_eq!(warnings, 2);
    }

    #[test]
    fn missing_path_warns() {
        let mut store = FragmentStore::open(MemBackend::new());
        let result = run(&mut store, vec![PathBuf::from("/no/such/file.py")], &exts()).unwrap();
        assert_eq!(result.messages[0].level, MessageLevel::Warning);
    }

    #[test]
    fn file_without_extension_gets_no_tag() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("Makefile");
        fs::write(&path, "all:\n\techo hi\n").unwrap();

        let mut store = FragmentStore::open(MemBackend::new());
        run(&mut store, vec![path], &exts()).unwrap();
        assert_eq!(store.fragments()[0].title, "Makefile");
        assert!(store.fragments()[0].tags.is_empty());
    }
}
