//! Manifest serialization
//!
//! Pretty JSON with two-space indentation. Fields and backend URLs keep their
//! declaration order. Non-ASCII names are written as-is.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::scanner::{FileEntry, Manifest};

/// Render the manifest as the JSON document written to disk
pub fn to_json(manifest: &Manifest) -> Result<String> {
    let mut json =
        serde_json::to_string_pretty(manifest).context("Failed to serialize manifest")?;
    json.push('\n');
    Ok(json)
}

/// Write the manifest to `path`, replacing any previous file
pub fn write_manifest(manifest: &Manifest, path: &Path) -> Result<()> {
    let json = to_json(manifest)?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }
    fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))?;
    tracing::info!("Wrote manifest to {}", path.display());
    Ok(())
}

/// Pretty JSON of the first root-level file, for a quick visual check
pub fn sample_entry(manifest: &Manifest) -> Result<Option<String>> {
    manifest
        .files
        .first()
        .map(|entry: &FileEntry| {
            serde_json::to_string_pretty(entry).context("Failed to serialize sample entry")
        })
        .transpose()
}
