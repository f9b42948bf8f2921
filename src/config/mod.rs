//! Configuration management for dirmanifest
//!
//! The backend list, the default ignore set and the file names used by a run
//! all live in [`ManifestConfig`], which is handed to the scanner explicitly.
//! Loading (embedded defaults, config files, environment) is in [`core`].

pub mod core;

use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::PathBuf;

use crate::backends::Backend;

/// Keys every file entry already uses; backends cannot claim them
pub const RESERVED_ENTRY_KEYS: &[&str] = &["name", "path", "size"];

/// What to do when two files flatten to the same name on a flat backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CollisionPolicy {
    /// Log a warning and keep both entries
    #[default]
    Warn,
    /// Abort the run
    Error,
}

/// Main configuration structure for a manifest run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestConfig {
    /// Directory scanned when no root is given on the command line
    pub default_root: PathBuf,

    /// Manifest file written by the run
    pub output_file: PathBuf,

    /// Ignore-file name, looked up at the root of the scanned tree
    pub ignore_file: String,

    /// Names always ignored, merged with the ignore file's entries
    pub default_ignores: Vec<String>,

    /// Token joining path segments on flat backends
    pub flatten_separator: String,

    /// Flat-name collision handling
    #[serde(default)]
    pub collision_policy: CollisionPolicy,

    /// Backends in declaration order
    #[serde(default)]
    pub backends: Vec<Backend>,
}

impl ManifestConfig {
    /// Enabled backends, in declaration order
    pub fn enabled_backends(&self) -> impl Iterator<Item = &Backend> {
        self.backends.iter().filter(|backend| backend.enabled)
    }

    /// Names of the enabled backends, as listed in the manifest
    pub fn source_list(&self) -> Vec<String> {
        self.enabled_backends()
            .map(|backend| backend.name.clone())
            .collect()
    }

    /// Check the configuration for values that would produce a broken manifest
    pub fn validate(&self) -> Result<()> {
        if self.flatten_separator.is_empty() {
            bail!("flatten_separator must not be empty");
        }
        if self.flatten_separator.contains('/') {
            bail!("flatten_separator must not contain '/'");
        }
        if self.output_file.as_os_str().is_empty() {
            bail!("output_file must not be empty");
        }

        let mut keys = HashSet::new();
        for backend in &self.backends {
            if backend.name.trim().is_empty() {
                bail!("Backend with key '{}' has an empty name", backend.key);
            }
            if backend.key.trim().is_empty() {
                bail!("Backend '{}' has an empty key", backend.name);
            }
            if backend.base_url.trim().is_empty() {
                bail!("Backend '{}' has an empty base_url", backend.name);
            }
            if RESERVED_ENTRY_KEYS.contains(&backend.key.as_str()) {
                bail!(
                    "Backend '{}' uses reserved key '{}'",
                    backend.name,
                    backend.key
                );
            }
            if backend.enabled && !keys.insert(backend.key.as_str()) {
                bail!("Duplicate backend key '{}'", backend.key);
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
