//! # dirmanifest - mirrored download manifests for directory trees
//!
//! Scans a local directory once and writes a JSON manifest listing every
//! directory and file, each file annotated with a download URL per hosting
//! backend. Static sites and README generators read the manifest instead of
//! touching the filesystem.
//!
//! ## Backends
//!
//! - **Tree** backends (Git forges serving raw files) keep the directory
//!   structure: `Math HW/quiz 1.pdf` → `<base>/Math%20HW/quiz%201.pdf`
//! - **Flat** backends (cloud drive mounts) allow a single folder level, so
//!   deeper segments are joined into the file name: `<base>/MathHW/quiz1.pdf`
//!
//! ## Quick Start
//!
//! ```bash
//! # Scan ./exams and write directory_structure.json
//! dirmanifest exams
//!
//! # Print the manifest instead of writing it
//! dirmanifest exams --stdout
//! ```

pub mod backends;
pub mod cli;
pub mod config;
pub mod report;
pub mod scanner;

pub use cli::{Cli, Output};
pub use config::ManifestConfig;
pub use scanner::{Manifest, ScanResult};

/// Result type alias for dirmanifest operations
pub type Result<T> = anyhow::Result<T>;
