//! Edge case tests for filetree


use assert_cmd::Command;
use harness::{TestArchive, sample_archive};
use predicates::prelude::*;

fn filetree() -> Command {
    let mut cmd = Command::cargo_bin("filetree").unwrap();
    cmd.env_remove("FILETREE_LOG")
        .env_remove("LS_COLORS")
        .env_remove("FORCE_COLOR");
    cmd
}

#[test]
fn test_missing_manifest_fails() {
    let archive = TestArchive::new();
    let missing = archive.path().join("nope.json");

    filetree()
        .arg(&missing)
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::starts_with("filetree: cannot read"));
}

#[test]
fn test_malformed_manifest_fails() {
    let archive = TestArchive::new();
    let manifest = archive.write_raw("manifest.json", "{ not json");

    filetree()
        .arg(&manifest)
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid JSON"));
}

#[test]
fn test_duplicate_paths_rejected() {
    let mut archive = TestArchive::new();
    archive.add_file("a/x", 1).add_file("a/x", 2);
    let manifest = archive.write_manifest();

    filetree()
        .arg(&manifest)
        .assert()
        .failure()
        .stderr(predicate::str::contains("duplicate path: a/x"));
}

#[test]
fn test_file_used_as_directory_rejected() {
    let mut archive = TestArchive::new();
    archive.add_file("a", 1).add_file("a/b", 2);
    let manifest = archive.write_manifest();

    filetree()
        .arg(&manifest)
        .assert()
        .failure()
        .stderr(predicate::str::contains("is a file but also a directory"));
}

#[test]
fn test_parent_segments_rejected() {
    let mut archive = TestArchive::new();
    archive.add_file("../escape", 1);
    let manifest = archive.write_manifest();

    filetree()
        .arg(&manifest)
        .assert()
        .failure()
        .stderr(predicate::str::contains("filetree:"));
}

#[test]
fn test_empty_manifest_renders_empty_tree() {
    let archive = TestArchive::new();
    let manifest = archive.write_manifest();

    filetree()
        .arg(&manifest)
        .assert()
        .success()
        .stdout("\n0 directories, 0 files, 0 B\n");
}

#[test]
fn test_padding_only_archive() {
    let mut archive = TestArchive::new();
    archive.add_padding(".pad/0", 4).add_padding(".pad/1", 4);
    let manifest = archive.write_manifest();

    filetree()
        .arg(&manifest)
        .assert()
        .success()
        .stdout("\n0 directories, 0 files, 0 B\n");
}

#[test]
fn test_unknown_root_fails() {
    let archive = sample_archive();
    let manifest = archive.write_manifest();

    filetree()
        .arg(&manifest)
        .args(["--root", "missing"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no such directory: missing"));
}

#[test]
fn test_root_pointing_at_file_fails() {
    let archive = sample_archive();
    let manifest = archive.write_manifest();

    filetree()
        .arg(&manifest)
        .args(["--root", "b.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no such directory"));
}

#[test]
fn test_padding_directory_root_needs_flag() {
    let mut archive = TestArchive::new();
    archive.add_file("f", 1).add_padding(".pad/0", 4);
    let manifest = archive.write_manifest();

    filetree()
        .arg(&manifest)
        .args(["--root", ".pad"])
        .assert()
        .failure();

    filetree()
        .arg(&manifest)
        .args(["--root", ".pad", "--show-padding-files", "--no-report"])
        .assert()
        .success()
        .stdout("└── 0 4 B\n");
}

#[test]
fn test_root_accepts_trailing_slash() {
    let archive = sample_archive();
    let manifest = archive.write_manifest();

    filetree()
        .arg(&manifest)
        .args(["--root", "a/", "--no-report", "--no-file-size"])
        .assert()
        .success()
        .stdout("├── x.txt\n└── y.txt\n");
}

#[test]
fn test_deeply_nested_paths() {
    let mut archive = TestArchive::new();
    let deep = (0..200).map(|i| format!("d{}", i)).collect::<Vec<_>>().join("/");
    archive.add_file(&format!("{}/leaf", deep), 7);
    let manifest = archive.write_manifest();

    filetree()
        .arg(&manifest)
        .args(["--no-report", "--no-dir-size"])
        .assert()
        .success()
        .stdout(predicate::str::contains("leaf 7 B"));
}

#[test]
fn test_unicode_names_elide_on_cell_width() {
    let mut archive = TestArchive::new();
    archive.add_file("你好世界你好世界.txt", 1);
    let manifest = archive.write_manifest();

    filetree()
        .arg(&manifest)
        .args(["-w", "11", "--no-report", "--no-file-size"])
        .assert()
        .success()
        .stdout("└── 你好...\n");
}

#[test]
fn test_sizes_use_binary_units() {
    let mut archive = TestArchive::new();
    archive
        .add_file("big/a.bin", 3 * 1024 * 1024)
        .add_file("big/b.bin", 1024 * 1024);
    let manifest = archive.write_manifest();

    filetree()
        .arg(&manifest)
        .arg("--no-report")
        .assert()
        .success()
        .stdout(predicate::str::contains("big 4.00 MiB"))
        .stdout(predicate::str::contains("a.bin 3.00 MiB"));
}

#[test]
fn test_verify_unmatched_entries_warn() {
    let mut archive = sample_archive();
    archive.add_verified("gone.txt", 1.0);
    let manifest = archive.write_manifest();
    let report = archive.write_report();

    filetree()
        .arg(&manifest)
        .arg("--verify")
        .arg(&report)
        .assert()
        .success()
        .stderr(predicate::str::contains("gone.txt"));
}

#[test]
fn test_verify_missing_report_fails() {
    let archive = sample_archive();
    let manifest = archive.write_manifest();

    filetree()
        .arg(&manifest)
        .args(["--verify", "does-not-exist.json"])
        .current_dir(archive.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("does-not-exist.json"));
}

#[test]
fn test_verbose_logs_to_stderr() {
    let archive = sample_archive();
    let manifest = archive.write_manifest();

    filetree()
        .arg(&manifest)
        .arg("-v")
        .assert()
        .success()
        .stdout(predicate::str::contains("1 directories, 3 files"))
        .stderr(predicate::str::contains("built file tree index"));
}

#[test]
fn test_flat_conflicts_with_json() {
    let archive = sample_archive();
    let manifest = archive.write_manifest();

    filetree()
        .arg(&manifest)
        .args(["--flat", "--json"])
        .assert()
        .failure();
}

#[test]
fn test_total_size_overflow_rejected() {
    let mut archive = TestArchive::new();
    archive.add_file("a/x", u64::MAX).add_file("a/y", 1);
    let manifest = archive.write_manifest();

    filetree()
        .arg(&manifest)
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("total file size exceeds"));
}
