//! Download backends
//!
//! A backend is a hosting target a file can be downloaded from. Each one
//! contributes a single URL to every file entry in the manifest, built from
//! its base URL and either the file's tree path or its flattened path.

pub mod flatten;
pub mod url;

use serde::{Deserialize, Serialize};

pub use flatten::{flatten_path, sanitize_segment};
pub use url::{encode_path, join_url};

/// How a backend lays files out under its base URL
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    /// Nested directories are preserved as-is
    #[default]
    Tree,
    /// One folder level; deeper segments are joined into the file name
    Flat,
}

/// A hosting target for which download URLs are synthesized
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Backend {
    /// Display name, listed in the manifest's `source_list`
    pub name: String,

    /// Key under which this backend's URL is stored in each file entry
    pub key: String,

    /// URL prefix; trailing slashes are ignored
    pub base_url: String,

    /// Directory layout on the backend
    #[serde(default)]
    pub layout: Layout,

    /// Whether this backend contributes URLs
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}

impl Backend {
    pub fn new(name: &str, key: &str, base_url: &str, layout: Layout) -> Self {
        Self {
            name: name.to_string(),
            key: key.to_string(),
            base_url: base_url.to_string(),
            layout,
            enabled: true,
        }
    }

    /// Path of a file on this backend, before encoding
    pub fn backend_path(&self, rel_path: &str, separator: &str) -> String {
        match self.layout {
            Layout::Tree => rel_path.to_string(),
            Layout::Flat => flatten_path(rel_path, separator),
        }
    }

    /// Download URL for a root-relative, forward-slash path
    pub fn url_for(&self, rel_path: &str, separator: &str) -> String {
        join_url(&self.base_url, &self.backend_path(rel_path, separator))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tree_backend_keeps_structure() {
        let backend = Backend::new("GitHub", "github_raw_url", "https://host/x/", Layout::Tree);
        assert_eq!(backend.backend_path("a/b/c.txt", "__"), "a/b/c.txt");
        assert_eq!(
            backend.url_for("Math HW/quiz 1.pdf", "__"),
            "https://host/x/Math%20HW/quiz%201.pdf"
        );
    }

    #[test]
    fn test_flat_backend_flattens() {
        let backend = Backend::new("Drive", "cloud_url", "https://host/y", Layout::Flat);
        assert_eq!(backend.backend_path("a/b/c.txt", "__"), "a/b__c.txt");
        assert_eq!(
            backend.url_for("Math HW/quiz 1.pdf", "__"),
            "https://host/y/MathHW/quiz1.pdf"
        );
        assert_eq!(backend.url_for("notes.txt", "__"), "https://host/y/notes.txt");
    }

    #[test]
    fn test_backend_deserialize_defaults() {
        let backend: Backend = serde_json::from_str(
            r#"{"name": "Mirror", "key": "mirror_url", "base_url": "https://m"}"#,
        )
        .unwrap();
        assert_eq!(backend.layout, Layout::Tree);
        assert!(backend.enabled);

        let flat: Backend = serde_json::from_str(
            r#"{"name": "D", "key": "d", "base_url": "https://d", "layout": "flat", "enabled": false}"#,
        )
        .unwrap();
        assert_eq!(flat.layout, Layout::Flat);
        assert!(!flat.enabled);
    }
}
