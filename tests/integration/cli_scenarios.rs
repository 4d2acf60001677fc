//! End-to-end scenarios against the `fixity` binary.
//!
//! Covers the create → verify → modify → verify → update → verify lifecycle,
//! exit codes, and the split between the stdout report and stderr diagnostics.

use std::fs;
use std::path::PathBuf;
use std::process::Output;
use tempfile::TempDir;

use crate::integration::{fixity_command, write_tree};

struct Sandbox {
    dir: TempDir,
}

impl Sandbox {
    fn new() -> Self {
        let sandbox = Self {
            dir: TempDir::new().unwrap(),
        };
        fs::create_dir_all(sandbox.root()).unwrap();
        sandbox
    }

    fn root(&self) -> PathBuf {
        self.dir.path().join("archive")
    }

    fn run(&self, args: &[&str]) -> Output {
        fixity_command(self.dir.path()).args(args).output().unwrap()
    }

    fn run_on_root(&self, verb: &str) -> Output {
        let root = self.root();
        self.run(&[verb, root.to_str().unwrap()])
    }

    fn manifest(&self) -> String {
        fs::read_to_string(self.root().join(".fixity")).unwrap()
    }
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

fn manifest_paths(manifest: &str) -> Vec<String> {
    manifest
        .lines()
        .map(|line| line.splitn(2, "  ").nth(1).unwrap().to_string())
        .collect()
}

fn digest_of(manifest: &str, rel: &str) -> String {
    manifest
        .lines()
        .find(|line| line.ends_with(&format!("  {}", rel)))
        .map(|line| line[..64].to_string())
        .unwrap()
}

#[test]
fn test_clean_verify_after_create() {
    let sb = Sandbox::new();
    write_tree(&sb.root(), &[("a.txt", "hello"), ("b.txt", "world")]);

    let created = sb.run_on_root("create");
    assert_eq!(created.status.code(), Some(0), "stderr={}", stderr(&created));
    assert!(stdout(&created).contains("with 2 entries"));
    let manifest = sb.manifest();

    let verified = sb.run_on_root("verify");
    assert_eq!(verified.status.code(), Some(0));
    let out = stdout(&verified);
    assert!(out.contains("OK: 2  CHANGED: 0  MISSING: 0  NEW: 0"));
    assert!(out.contains("Verification: CLEAN (no differences)."));
    assert!(!out.contains("CHANGED: a.txt"));
    assert_eq!(sb.manifest(), manifest);
}

#[test]
fn test_lifecycle_change_missing_new_update() {
    let sb = Sandbox::new();
    let root = sb.root();
    write_tree(&root, &[("a.txt", "hello"), ("b.txt", "world")]);
    assert_eq!(sb.run_on_root("create").status.code(), Some(0));
    let original = sb.manifest();

    // Detect change
    fs::write(root.join("a.txt"), "HELLO").unwrap();
    let verified = sb.run_on_root("verify");
    assert_eq!(verified.status.code(), Some(2));
    let out = stdout(&verified);
    assert!(out.contains("CHANGED: a.txt"));
    assert!(out.contains("OK: 1  CHANGED: 1  MISSING: 0  NEW: 0"));
    assert!(out.contains("Verification: differences detected."));

    // Detect missing + new
    fs::remove_file(root.join("b.txt")).unwrap();
    fs::write(root.join("c.txt"), "data").unwrap();
    let verified = sb.run_on_root("verify");
    assert_eq!(verified.status.code(), Some(2));
    let out = stdout(&verified);
    assert!(out.contains("MISSING: b.txt"));
    assert!(out.contains("NEW: c.txt"));
    assert_eq!(sb.manifest(), original, "verify must never write");

    // Update rewrites
    let updated = sb.run_on_root("update");
    assert_eq!(updated.status.code(), Some(0), "stderr={}", stderr(&updated));
    let out = stdout(&updated);
    assert!(out.contains("CHANGED: a.txt"));
    assert!(out.contains("Manifest updated:"));

    let manifest = sb.manifest();
    assert_eq!(manifest_paths(&manifest), vec!["a.txt", "c.txt"]);
    assert_ne!(digest_of(&manifest, "a.txt"), digest_of(&original, "a.txt"));

    let verified = sb.run_on_root("verify");
    assert_eq!(verified.status.code(), Some(0));
    assert!(stdout(&verified).contains("OK: 2  CHANGED: 0  MISSING: 0  NEW: 0"));
}

#[test]
fn test_create_twice_exits_one_and_keeps_manifest() {
    let sb = Sandbox::new();
    write_tree(&sb.root(), &[("a.txt", "hello")]);
    assert_eq!(sb.run_on_root("create").status.code(), Some(0));
    let manifest = sb.manifest();

    fs::write(sb.root().join("a.txt"), "changed").unwrap();
    let second = sb.run_on_root("create");
    assert_eq!(second.status.code(), Some(1));
    assert!(stderr(&second).contains("Manifest already exists"));
    assert!(stdout(&second).is_empty());
    assert_eq!(sb.manifest(), manifest);
}

#[test]
fn test_verify_without_manifest_exits_one() {
    let sb = Sandbox::new();
    write_tree(&sb.root(), &[("a.txt", "hello")]);

    let verified = sb.run_on_root("verify");
    assert_eq!(verified.status.code(), Some(1));
    assert!(stderr(&verified).contains("Manifest not found"));
}

#[test]
fn test_non_directory_root_exits_one() {
    let sb = Sandbox::new();
    write_tree(&sb.root(), &[("a.txt", "hello")]);
    let file = sb.root().join("a.txt");

    for verb in ["create", "verify", "update"] {
        let output = sb.run(&[verb, file.to_str().unwrap()]);
        assert_eq!(output.status.code(), Some(1), "{} on a file", verb);
        assert!(stderr(&output).contains("Not a directory"));
    }
}

#[test]
fn test_update_creates_missing_manifest() {
    let sb = Sandbox::new();
    write_tree(&sb.root(), &[("nested/deep/file.bin", "bytes")]);

    let updated = sb.run_on_root("update");
    assert_eq!(updated.status.code(), Some(0));
    assert!(stdout(&updated).contains("NEW: nested/deep/file.bin"));
    assert_eq!(manifest_paths(&sb.manifest()), vec!["nested/deep/file.bin"]);
}

#[test]
fn test_verify_json_format() {
    let sb = Sandbox::new();
    write_tree(&sb.root(), &[("a.txt", "hello")]);
    sb.run_on_root("create");
    fs::write(sb.root().join("z.txt"), "new").unwrap();

    let root = sb.root();
    let output = sb.run(&["verify", root.to_str().unwrap(), "--format", "json"]);
    assert_eq!(output.status.code(), Some(2));

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["status"], "differences");
    assert_eq!(json["ok"][0], "a.txt");
    assert_eq!(json["new"][0], "z.txt");
}

#[test]
fn test_informational_flags_exit_zero() {
    let sb = Sandbox::new();
    for flag in ["--version", "-V", "--help", "-h"] {
        let output = sb.run(&[flag]);
        assert_eq!(output.status.code(), Some(0), "{}", flag);
        assert!(!stdout(&output).is_empty());
    }
    assert!(!sb.root().join(".fixity").exists());
}

#[test]
fn test_bad_arguments_exit_one() {
    let sb = Sandbox::new();
    assert_eq!(sb.run(&[]).status.code(), Some(1));
    assert_eq!(sb.run(&["create"]).status.code(), Some(1));
    assert_eq!(sb.run(&["frobnicate", "."]).status.code(), Some(1));
    assert_eq!(
        sb.run(&["verify", ".", "--format", "xml"]).status.code(),
        Some(1)
    );
}

#[test]
fn test_config_file_sets_manifest_name() {
    let sb = Sandbox::new();
    write_tree(&sb.root(), &[("a.txt", "hello")]);
    let config_path = sb.dir.path().join("fixity.toml");
    fs::write(&config_path, "[scan]\nmanifest_name = \".sums\"\n").unwrap();

    let root = sb.root();
    let output = sb.run(&[
        "--config",
        config_path.to_str().unwrap(),
        "create",
        root.to_str().unwrap(),
    ]);
    assert_eq!(output.status.code(), Some(0), "stderr={}", stderr(&output));
    assert!(root.join(".sums").exists());
    assert!(!root.join(".fixity").exists());
}

#[test]
fn test_env_override_rejected_when_invalid() {
    let sb = Sandbox::new();
    write_tree(&sb.root(), &[("a.txt", "hello")]);

    let root = sb.root();
    let output = fixity_command(sb.dir.path())
        .env("FIXITY_SCAN__CHUNK_SIZE", "0")
        .args(["create", root.to_str().unwrap()])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Chunk size"));
    assert!(!root.join(".fixity").exists());
}

#[cfg(unix)]
#[test]
fn test_diagnostics_go_to_stderr() {
    let sb = Sandbox::new();
    write_tree(&sb.root(), &[("a.txt", "hello"), ("padded ", "trailing space")]);

    let created = sb.run_on_root("create");
    assert_eq!(created.status.code(), Some(0));
    assert!(stderr(&created).contains("ERROR: Skipping"));
    assert!(!stdout(&created).contains("ERROR"));
    assert_eq!(manifest_paths(&sb.manifest()), vec!["a.txt"]);
}
