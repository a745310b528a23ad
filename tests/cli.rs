use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;

fn wallet(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("codewallet").unwrap();
    cmd.env("CODEWALLET_DATA_DIR", home.join("data"))
        .env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join("config"))
        .env("XDG_DATA_HOME", home.join("share"))
        .env("NO_COLOR", "1")
        .env_remove("CODEWALLET_DEFAULT_TAG_COLOR")
        .env_remove("CODEWALLET_IMPORT_EXTENSIONS");
    cmd
}

#[test]
fn test_add_list_show() {
    let temp = tempfile::tempdir().unwrap();

    wallet(temp.path())
        .args(["add", "Loop", "--body", "for i in range(10): pass", "-t", "python"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Fragment created (1): Loop"));

    wallet(temp.path())
        .args(["add", "Copy", "--body", "cp a b", "-t", "shell,python"])
        .assert()
        .success();

    wallet(temp.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Loop").and(predicate::str::contains("Copy")));

    wallet(temp.path())
        .args(["list", "--tag", "shell"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Copy").and(predicate::str::contains("Loop").not()));

    wallet(temp.path())
        .args(["show", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("for i in range(10): pass"));
}

#[test]
fn test_add_reads_body_from_stdin() {
    let temp = tempfile::tempdir().unwrap();

    wallet(temp.path())
        .args(["add", "Piped", "-t", "shell"])
        .write_stdin("echo hi\n")
        .assert()
        .success();

    wallet(temp.path())
        .args(["search", "ECHO"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Piped"));
}

#[test]
fn test_empty_body_is_rejected() {
    let temp = tempfile::tempdir().unwrap();

    wallet(temp.path())
        .args(["add", "Nothing", "--body", "  "])
        .assert()
        .failure()
        .stderr(predicate::str::contains("body cannot be empty"));
}

#[test]
fn test_tag_rename_and_merge() {
    let temp = tempfile::tempdir().unwrap();
    wallet(temp.path())
        .args(["add", "Loop", "-b", "pass", "-t", "python"])
        .assert()
        .success();
    wallet(temp.path())
        .args(["add", "Copy", "-b", "cp a b", "-t", "shell"])
        .assert()
        .success();

    wallet(temp.path())
        .args(["tags", "rename", "python", "shell"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--merge"));

    wallet(temp.path())
        .args(["tags", "rename", "python", "py"])
        .assert()
        .success()
        .stdout(predicate::str::contains("renamed to 'py'"));

    wallet(temp.path())
        .args(["tags", "rename", "py", "shell", "--merge"])
        .assert()
        .success()
        .stdout(predicate::str::contains("merged into 'shell'"));

    wallet(temp.path())
        .arg("tags")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("2 fragment(s)").and(predicate::str::contains("py ").not()),
        );
}

#[test]
fn test_delete_range() {
    let temp = tempfile::tempdir().unwrap();
    for title in ["A", "B", "C"] {
        wallet(temp.path())
            .args(["add", title, "-b", "x"])
            .assert()
            .success();
    }

    wallet(temp.path())
        .args(["delete", "1-2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Fragment deleted (2): B"));

    wallet(temp.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("1. C").and(predicate::str::contains(". A").not()));
}

#[test]
fn test_import_directory() {
    let temp = tempfile::tempdir().unwrap();
    let src = temp.path().join("src");
    std::fs::create_dir(&src).unwrap();
    std::fs::write(src.join("hello.py"), "print('hi')\n").unwrap();
    std::fs::write(src.join("image.png"), "binary-ish").unwrap();

    wallet(temp.path())
        .arg("import")
        .arg(&src)
        .assert()
        .success()
        .stdout(predicate::str::contains("Total imported: 1"));

    wallet(temp.path())
        .args(["tags", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Python"));
}

#[test]
fn test_theme_toggle_persists() {
    let temp = tempfile::tempdir().unwrap();

    wallet(temp.path())
        .arg("theme")
        .assert()
        .success()
        .stdout(predicate::str::contains("light"));

    wallet(temp.path())
        .args(["theme", "toggle"])
        .assert()
        .success();

    wallet(temp.path())
        .arg("theme")
        .assert()
        .success()
        .stdout(predicate::str::contains("dark"));
}

#[test]
fn test_doctor_repairs_corrupt_tags() {
    let temp = tempfile::tempdir().unwrap();
    wallet(temp.path())
        .args(["add", "Loop", "-b", "pass", "-t", "python"])
        .assert()
        .success();

    std::fs::write(
        temp.path().join("data").join("code-wallet-tags.json"),
        "not json",
    )
    .unwrap();

    // the repair happens on open and doctor reports it
    wallet(temp.path())
        .arg("doctor")
        .assert()
        .success()
        .stdout(predicate::str::contains("Inconsistencies found and fixed:"))
        .stdout(predicate::str::contains("1 tag(s) used by fragments registered"));

    wallet(temp.path())
        .arg("doctor")
        .assert()
        .success()
        .stdout(predicate::str::contains("No inconsistencies found."));

    wallet(temp.path())
        .arg("tags")
        .assert()
        .success()
        .stdout(predicate::str::contains("python"));
}

#[test]
fn test_unknown_index_fails() {
    let temp = tempfile::tempdir().unwrap();
    wallet(temp.path())
        .args(["show", "7"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Index 7 not found"));
}
