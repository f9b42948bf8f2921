use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::path::PathBuf;

/// One file in the manifest, with a download URL per enabled backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileEntry {
    pub name: String,
    /// Root-relative path, always `/`-separated
    pub path: String,
    pub size: u64,
    /// Backend key → URL, in backend declaration order
    #[serde(flatten)]
    pub urls: Map<String, Value>,
}

impl FileEntry {
    pub fn url(&self, key: &str) -> Option<&str> {
        self.urls.get(key).and_then(Value::as_str)
    }
}

/// A non-root directory and the files directly inside it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryEntry {
    pub name: String,
    pub path: String,
    pub files: Vec<FileEntry>,
}

/// The document written by a run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    /// Enabled backend names, in declaration order
    pub source_list: Vec<String>,
    /// Every non-ignored directory below the root, pre-order
    pub dirs: Vec<DirectoryEntry>,
    /// Files directly under the root
    pub files: Vec<FileEntry>,
}

impl Manifest {
    /// All file entries, root files first
    pub fn all_files(&self) -> impl Iterator<Item = &FileEntry> {
        self.files
            .iter()
            .chain(self.dirs.iter().flat_map(|dir| dir.files.iter()))
    }

    pub fn find_dir(&self, path: &str) -> Option<&DirectoryEntry> {
        self.dirs.iter().find(|dir| dir.path == path)
    }
}

/// Statistics from a scanning operation
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ScanStats {
    pub directories: usize,
    pub files: usize,
    pub total_bytes: u64,
    pub files_skipped: usize,
}

/// Two files that map to the same name on a flat backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlatCollision {
    pub backend: String,
    pub flattened: String,
    pub first: String,
    pub second: String,
}

impl fmt::Display for FlatCollision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "'{}' and '{}' both flatten to '{}' on {}",
            self.first, self.second, self.flattened, self.backend
        )
    }
}

/// Result of a scanning operation
#[derive(Debug)]
pub struct ScanResult {
    pub manifest: Manifest,
    pub stats: ScanStats,
    pub collisions: Vec<FlatCollision>,
}

/// The directory to scan does not exist
#[derive(Debug)]
pub struct RootNotFound {
    pub path: PathBuf,
}

impl fmt::Display for RootNotFound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Directory '{}' does not exist", self.path.display())
    }
}

impl std::error::Error for RootNotFound {}
