//! Integration tests for fingerprint set determinism

use fixity::tree::builder::FingerprintBuilder;
use std::fs;
use tempfile::TempDir;

use crate::integration::write_tree;

/// Test that the same filesystem produces the same fingerprint set
#[test]
fn test_same_filesystem_same_fingerprints() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path().to_path_buf();
    write_tree(
        &root,
        &[
            ("file1.txt", "content1"),
            ("file2.txt", "content2"),
            ("dir1/file3.txt", "content3"),
        ],
    );

    let builder = FingerprintBuilder::new(root);
    let first = builder.compute_entries();
    let second = builder.compute_entries();

    assert_eq!(first.fingerprints, second.fingerprints);
    assert_eq!(first.fingerprints.len(), 3);
}

/// Creation order does not affect the result
#[test]
fn test_creation_order_independent() {
    let first_dir = TempDir::new().unwrap();
    let second_dir = TempDir::new().unwrap();
    let files = [
        ("z/last.txt", "z"),
        ("a/first.txt", "a"),
        ("m.txt", "m"),
        ("a/b/c/deep.txt", "deep"),
    ];

    write_tree(first_dir.path(), &files);
    let mut reversed = files;
    reversed.reverse();
    write_tree(second_dir.path(), &reversed);

    let first = FingerprintBuilder::new(first_dir.path().to_path_buf()).compute_entries();
    let second = FingerprintBuilder::new(second_dir.path().to_path_buf()).compute_entries();

    assert_eq!(first.fingerprints, second.fingerprints);
}

/// Test that moving a file changes its key but not its digest
#[test]
fn test_rename_keeps_digest_changes_key() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path().to_path_buf();
    write_tree(&root, &[("old/name.txt", "payload")]);

    let builder = FingerprintBuilder::new(root.clone());
    let before = builder.compute_entries();

    fs::create_dir(root.join("new")).unwrap();
    fs::rename(root.join("old/name.txt"), root.join("new/name.txt")).unwrap();
    let after = builder.compute_entries();

    assert!(!after.fingerprints.contains("old/name.txt"));
    assert_eq!(
        before.fingerprints.get("old/name.txt"),
        after.fingerprints.get("new/name.txt")
    );
}
