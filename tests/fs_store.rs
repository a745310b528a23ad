use codewallet::model::FragmentPatch;
use codewallet::preferences::{Theme, ThemeStore};
use codewallet::store::fragment_store::FragmentStore;
use codewallet::store::fs_backend::FsBackend;
use codewallet::store::{StorageBackend, StorageKey};
use std::fs;

#[test]
fn test_records_round_trip_through_files() {
    let dir = tempfile::tempdir().unwrap();
    let backend = FsBackend::new(dir.path().join("wallet"));

    let mut store = FragmentStore::open(backend.clone());
    let loop_ = store
        .add_fragment("Loop", "for i in range(10): pass", ["python"])
        .unwrap();
    store
        .add_fragment("Copy", "cp a b", ["shell", "python"])
        .unwrap();
    store.set_tag_color("shell", "#89e051");
    store
        .update_fragment(&loop_.id, FragmentPatch::new().body("while True: pass"))
        .unwrap();

    for key in [StorageKey::Fragments, StorageKey::Tags, StorageKey::TagColors] {
        assert!(backend.location(key).exists(), "{} not written", key);
    }

    let reloaded = FragmentStore::open(backend);
    assert_eq!(reloaded.list_fragments(), store.list_fragments());
    assert_eq!(reloaded.list_tags(), store.list_tags());
    assert!(!reloaded.is_degraded());
}

#[test]
fn test_no_temp_files_left_behind() {
    let dir = tempfile::tempdir().unwrap();
    let backend = FsBackend::new(dir.path().to_path_buf());
    let mut store = FragmentStore::open(backend);
    store.add_fragment("A", "a", ["x"]).unwrap();
    store.add_fragment("B", "b", ["y"]).unwrap();

    let leftovers: Vec<_> = fs::read_dir(dir.path())
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
        .collect();
    assert!(leftovers.is_empty());
}

#[test]
fn test_loads_records_written_by_older_versions() {
    let dir = tempfile::tempdir().unwrap();
    let backend = FsBackend::new(dir.path().to_path_buf());
    fs::write(
        backend.location(StorageKey::Fragments),
        r#"[{
            "id": "3f2c1a9e-9a55-4c55-8f57-0d2f5b0e6b11",
            "title": "Copy",
            "code": "cp a b",
            "tags": ["shell"],
            "createdAt": "2024-05-01T10:00:00.000Z",
            "updatedAt": "2024-05-01T10:00:00.000Z"
        }]"#,
    )
    .unwrap();
    fs::write(backend.location(StorageKey::Tags), r#"["shell"]"#).unwrap();
    fs::write(
        backend.location(StorageKey::TagColors),
        r##"{"shell": "#89e051"}"##,
    )
    .unwrap();

    let store = FragmentStore::open(backend);
    assert_eq!(store.fragments()[0].body, "cp a b");
    assert_eq!(store.get_tag_color("shell"), "#89e051");
}

#[test]
fn test_corrupt_record_does_not_block_others() {
    let dir = tempfile::tempdir().unwrap();
    let backend = FsBackend::new(dir.path().to_path_buf());
    {
        let mut store = FragmentStore::open(backend.clone());
        store.add_fragment("Loop", "pass", ["python"]).unwrap();
    }
    fs::write(backend.location(StorageKey::Tags), "][").unwrap();

    let store = FragmentStore::open(backend.clone());
    assert_eq!(store.fragments().len(), 1);
    assert!(store.tag_exists("python"));

    // the repaired registry was written back
    let raw = fs::read_to_string(backend.location(StorageKey::Tags)).unwrap();
    assert!(raw.contains("python"));
}

#[test]
fn test_theme_persists_in_its_own_record() {
    let dir = tempfile::tempdir().unwrap();
    let backend = FsBackend::new(dir.path().to_path_buf());

    let themes = ThemeStore::open(backend.clone());
    themes.set(Theme::Dark);

    let reopened = ThemeStore::open(backend.clone());
    assert!(reopened.is_dark());
    assert!(!backend.location(StorageKey::Fragments).exists());
}

#[test]
fn test_unwritable_directory_degrades() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("not-a-dir");
    fs::write(&blocker, "file in the way").unwrap();

    let mut store = FragmentStore::open(FsBackend::new(blocker.join("wallet")));
    let f = store.add_fragment("Loop", "pass", ["python"]).unwrap();

    assert!(store.is_degraded());
    assert_eq!(store.get_fragment(&f.id), Some(f));
}
