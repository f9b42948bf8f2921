//! Ignore-list loading and matching
//!
//! Patterns are literal names, not globs. Directories and nested files are
//! matched by exact name; root-level files are also dropped when their name
//! merely contains a pattern.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use crate::config::ManifestConfig;

#[derive(Debug, Clone, Default)]
pub struct IgnoreList {
    patterns: BTreeSet<String>,
    /// Entries contributed by the ignore file, in file order
    from_file: Vec<String>,
}

impl IgnoreList {
    /// Build a list from literal patterns; empty patterns are dropped
    pub fn new<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let patterns = patterns
            .into_iter()
            .map(Into::into)
            .filter(|pattern: &String| !pattern.is_empty())
            .collect();
        Self {
            patterns,
            from_file: Vec::new(),
        }
    }

    /// Merge the configured defaults, the output file name and the ignore
    /// file found at `root`
    ///
    /// A missing or unreadable ignore file only means no extra patterns.
    pub fn load(root: &Path, config: &ManifestConfig) -> Self {
        let mut list = Self::new(config.default_ignores.iter().cloned());

        if let Some(output_name) = config.output_file.file_name().and_then(|n| n.to_str()) {
            list.insert(output_name);
        }

        let ignore_path = root.join(&config.ignore_file);
        match fs::read_to_string(&ignore_path) {
            Ok(contents) => {
                for pattern in parse_ignore_file(&contents) {
                    list.insert(&pattern);
                    list.from_file.push(pattern);
                }
                tracing::debug!(
                    "Loaded {} patterns from {}",
                    list.from_file.len(),
                    ignore_path.display()
                );
            }
            Err(e) => {
                tracing::debug!("No ignore file at {}: {}", ignore_path.display(), e);
            }
        }

        list
    }

    pub fn insert(&mut self, pattern: &str) {
        if !pattern.is_empty() {
            self.patterns.insert(pattern.to_string());
        }
    }

    /// Exact name match, used for directories and nested files
    pub fn matches_name(&self, name: &str) -> bool {
        self.patterns.contains(name)
    }

    /// Whether `name` contains any pattern
    pub fn matches_substring(&self, name: &str) -> bool {
        self.patterns.iter().any(|pattern| name.contains(pattern.as_str()))
    }

    /// Root-level files are matched by substring as well as by exact name
    pub fn is_ignored_root_file(&self, name: &str) -> bool {
        self.matches_name(name) || self.matches_substring(name)
    }

    pub fn from_file(&self) -> &[String] {
        &self.from_file
    }
}

/// One pattern per line; blank lines and `#` comments skipped
pub fn parse_ignore_file(contents: &str) -> Vec<String> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(|line| line.trim_end_matches('/').to_string())
        .filter(|line| !line.is_empty())
        .collect()
}
