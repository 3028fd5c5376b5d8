#![allow(clippy::expect_used, clippy::unwrap_used)]

use assert_cmd::Command;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tempfile::TempDir;

pub const CMD_TIMEOUT: Duration = Duration::from_secs(15);

/// A `sitemap` command isolated from the user's config and terminal colors.
pub fn sitemap_cmd(dir: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("sitemap"));
    cmd.timeout(CMD_TIMEOUT);
    cmd.env("SITEMAP_CONFIG", dir.join("config.toml"));
    cmd.env("NO_COLOR", "1");
    cmd.current_dir(dir);
    cmd
}

/// A temp dir holding a sitemap file with the given body.
#[allow(dead_code)]
pub fn sitemap_fixture(name: &str, xml: &str) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let path = dir.path().join(name);
    std::fs::write(&path, xml).unwrap();
    (dir, path)
}
