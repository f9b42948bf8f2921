//! Directory traversal and manifest construction
//!
//! One sequential, pre-order walk of the root. Ignored directories are
//! pruned before they are entered, so nothing beneath them is visited.
//! Siblings are visited in file-name order to keep the output identical
//! across runs.

use anyhow::{Context, Result};
use ignore::{DirEntry, WalkBuilder};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fs;
use std::path::{Component, Path};

use super::collisions::CollisionTracker;
use super::ignore_list::IgnoreList;
use super::types::{DirectoryEntry, FileEntry, Manifest, RootNotFound, ScanResult, ScanStats};
use crate::backends::Layout;
use crate::config::ManifestConfig;

/// Builds a [`Manifest`] for one directory tree
pub struct ManifestBuilder<'a> {
    config: &'a ManifestConfig,
    ignore: &'a IgnoreList,
}

impl<'a> ManifestBuilder<'a> {
    pub fn new(config: &'a ManifestConfig, ignore: &'a IgnoreList) -> Self {
        Self { config, ignore }
    }

    /// Walk `root` and build the manifest
    ///
    /// Fails with [`RootNotFound`] when `root` is not a directory. Walk errors
    /// (permissions, non-UTF-8 names) abort the scan.
    pub fn build(&self, root: &Path) -> Result<ScanResult> {
        if !root.is_dir() {
            return Err(RootNotFound {
                path: root.to_path_buf(),
            }
            .into());
        }

        let mut manifest = Manifest {
            source_list: self.config.source_list(),
            ..Manifest::default()
        };
        let mut stats = ScanStats::default();
        let mut collisions = CollisionTracker::new(self.config.collision_policy);
        // rel path → index into manifest.dirs
        let mut dir_index: HashMap<String, usize> = HashMap::new();

        for result in self.walker(root).build() {
            let entry = result.with_context(|| format!("Failed to walk {}", root.display()))?;
            if entry.depth() == 0 {
                continue;
            }

            let name = entry_name(&entry)?;
            let rel_path = relative_path(root, entry.path())?;

            if entry.file_type().is_some_and(|ft| ft.is_dir()) {
                tracing::debug!("Directory: {}", rel_path);
                dir_index.insert(rel_path.clone(), manifest.dirs.len());
                manifest.dirs.push(DirectoryEntry {
                    name,
                    path: rel_path,
                    files: Vec::new(),
                });
                stats.directories += 1;
                continue;
            }

            if is_directory_link(&entry) {
                tracing::debug!("Skipping link to directory: {}", rel_path);
                stats.files_skipped += 1;
                continue;
            }

            let at_root = entry.depth() == 1;
            let ignored = if at_root {
                self.ignore.is_ignored_root_file(&name)
            } else {
                self.ignore.matches_name(&name)
            };
            if ignored {
                tracing::debug!("Skipping ignored file: {}", rel_path);
                stats.files_skipped += 1;
                continue;
            }

            let size = file_size(&entry)?;
            let urls = self.synthesize_urls(&rel_path, &mut collisions)?;
            let file = FileEntry {
                name,
                path: rel_path,
                size,
                urls,
            };
            stats.files += 1;
            stats.total_bytes += size;

            if at_root {
                manifest.files.push(file);
            } else {
                let parent = parent_path(&file.path);
                let index = *dir_index.get(parent).with_context(|| {
                    format!("Directory '{}' was not visited before its files", parent)
                })?;
                manifest.dirs[index].files.push(file);
            }
        }

        tracing::info!(
            "Scanned {} directories and {} files ({} bytes, {} skipped)",
            stats.directories,
            stats.files,
            stats.total_bytes,
            stats.files_skipped
        );

        Ok(ScanResult {
            manifest,
            stats,
            collisions: collisions.into_collisions(),
        })
    }

    /// One URL per enabled backend, keyed by the backend's key, in declaration order
    fn synthesize_urls(
        &self,
        rel_path: &str,
        collisions: &mut CollisionTracker,
    ) -> Result<Map<String, Value>> {
        let separator = &self.config.flatten_separator;
        let mut urls = Map::new();

        for backend in self.config.enabled_backends() {
            if backend.layout == Layout::Flat {
                let flattened = backend.backend_path(rel_path, separator);
                collisions.record(&backend.name, &backend.key, &flattened, rel_path)?;
            }
            urls.insert(
                backend.key.clone(),
                Value::String(backend.url_for(rel_path, separator)),
            );
        }

        Ok(urls)
    }

    fn walker(&self, root: &Path) -> WalkBuilder {
        let ignore = self.ignore.clone();

        let mut builder = WalkBuilder::new(root);
        builder
            .standard_filters(false) // Only our own ignore list applies
            .follow_links(false)
            .sort_by_file_name(|a, b| a.cmp(b))
            .filter_entry(move |entry| {
                if entry.depth() == 0 || !entry.file_type().is_some_and(|ft| ft.is_dir()) {
                    return true;
                }
                let pruned = entry
                    .file_name()
                    .to_str()
                    .is_some_and(|name| ignore.matches_name(name));
                if pruned {
                    tracing::debug!("Pruning ignored directory: {}", entry.path().display());
                }
                !pruned
            });
        builder
    }
}

fn entry_name(entry: &DirEntry) -> Result<String> {
    entry
        .file_name()
        .to_str()
        .map(str::to_string)
        .with_context(|| format!("Non-UTF-8 file name: {}", entry.path().display()))
}

/// Root-relative path joined with `/` whatever the host separator
pub fn relative_path(root: &Path, path: &Path) -> Result<String> {
    let rel = path
        .strip_prefix(root)
        .with_context(|| format!("{} is outside {}", path.display(), root.display()))?;

    let mut segments = Vec::new();
    for component in rel.components() {
        if let Component::Normal(segment) = component {
            let segment = segment
                .to_str()
                .with_context(|| format!("Non-UTF-8 path: {}", path.display()))?;
            segments.push(segment);
        }
    }
    Ok(segments.join("/"))
}

fn parent_path(rel_path: &str) -> &str {
    rel_path.rsplit_once('/').map_or("", |(parent, _)| parent)
}

/// Links are not followed, so a link to a directory is neither walked nor a file
fn is_directory_link(entry: &DirEntry) -> bool {
    entry.path_is_symlink() && fs::metadata(entry.path()).is_ok_and(|m| m.is_dir())
}

/// Size of a regular file; links that do not resolve to one count as 0
fn file_size(entry: &DirEntry) -> Result<u64> {
    let is_symlink = entry.path_is_symlink();
    match fs::metadata(entry.path()) {
        Ok(metadata) if metadata.is_file() => Ok(metadata.len()),
        Ok(_) => Ok(0),
        Err(_) if is_symlink => Ok(0),
        Err(e) => {
            Err(e).with_context(|| format!("Failed to read metadata for {}", entry.path().display()))
        }
    }
}
