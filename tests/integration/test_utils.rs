//! Shared test utilities for integration tests
//!
//! Binary-level tests run the real `fixity` executable with an isolated
//! environment so a developer's own config file or `FIXITY_*` variables never
//! leak into the results.

use std::fs;
use std::path::Path;
use std::process::Command;

/// Build a `fixity` command whose XDG directories point into `sandbox`
pub fn fixity_command(sandbox: &Path) -> Command {
    let home = sandbox.join("home");
    let config_home = sandbox.join("config");
    fs::create_dir_all(&home).unwrap();
    fs::create_dir_all(&config_home).unwrap();

    let mut cmd = Command::new(env!("CARGO_BIN_EXE_fixity"));
    for (key, _) in std::env::vars() {
        if key.starts_with("FIXITY") {
            cmd.env_remove(key);
        }
    }
    cmd.env("HOME", &home)
        .env("XDG_CONFIG_HOME", &config_home)
        .env("NO_COLOR", "1");
    cmd
}

/// Create files (and their parent directories) under `root`
pub fn write_tree(root: &Path, files: &[(&str, &str)]) {
    for (rel, content) in files {
        let path = root.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }
}
