pub mod collisions;
pub mod directory;
pub mod ignore_list;
pub mod types;

// Re-export main types for easier access
pub use directory::{ManifestBuilder, relative_path};
pub use ignore_list::{IgnoreList, parse_ignore_file};
pub use types::{DirectoryEntry, FileEntry, FlatCollision, Manifest, RootNotFound, ScanResult, ScanStats};

use anyhow::Result;
use std::path::Path;

use crate::config::ManifestConfig;

/// Load the ignore list for `root` and build its manifest
pub fn scan(root: &Path, config: &ManifestConfig) -> Result<ScanResult> {
    let ignore = IgnoreList::load(root, config);
    ManifestBuilder::new(config, &ignore).build(root)
}
