//! Fixture helpers shared across engine tests.

use nsm_foundation::config::MigrationSettings;
use nsm_foundation::model::LegacyPrefixRule;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A throwaway directory for sidecar artifacts, cleaned up on drop.
pub fn temp_workspace() -> TempDir {
    tempfile::tempdir().expect("failed to create temp workspace")
}

/// Settings with the given rules, the classmap sidecar rooted in `dir`,
/// and everything else at its default.
pub fn create_test_settings(rules: Vec<LegacyPrefixRule>, dir: &Path) -> MigrationSettings {
    MigrationSettings {
        rules,
        classmap_dir: dir.to_string_lossy().into_owned(),
        ..MigrationSettings::default()
    }
}

/// Write a `_classmap.json` sidecar with the given contents into `dir`.
pub fn write_classmap(dir: &Path, contents: &str) -> anyhow::Result<PathBuf> {
    let path = dir.join("_classmap.json");
    std::fs::write(&path, contents)?;
    Ok(path)
}
