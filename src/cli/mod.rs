//! Command-line interface for dirmanifest
//!
//! One command: scan a directory and write its manifest. Argument parsing is
//! done with clap; the scan itself lives in [`crate::scanner`].

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

mod output;

pub use output::Output;

use crate::config::ManifestConfig;
use crate::{report, scanner};

/// Scan a directory tree into a JSON manifest of mirrored download URLs
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Directory to scan (defaults to `default_root` from the configuration)
    #[arg(value_name = "ROOT")]
    pub root: Option<PathBuf>,

    /// Configuration file path
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Manifest file to write
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Ignore-file name, relative to the scanned directory
    #[arg(long, value_name = "NAME")]
    pub ignore_file: Option<String>,

    /// Print the manifest to stdout instead of writing the file
    #[arg(long)]
    pub stdout: bool,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only print errors
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Execute the scan
    pub fn run(self) -> Result<()> {
        // --stdout keeps stdout clean for the manifest itself
        let quiet = self.quiet || self.stdout;
        setup_logging(self.verbose, quiet);
        let output = Output::new(self.verbose > 0, quiet);

        let mut config = ManifestConfig::load_with_custom_config(self.config.as_deref())?;
        if let Some(path) = self.output {
            config.output_file = path;
        }
        if let Some(name) = self.ignore_file {
            config.ignore_file = name;
        }
        config.validate()?;

        let root = self.root.unwrap_or_else(|| config.default_root.clone());
        if !root.is_dir() {
            return Err(scanner::RootNotFound { path: root }.into());
        }

        let ignore = scanner::IgnoreList::load(&root, &config);
        if !ignore.from_file().is_empty() {
            output.info(&format!(
                "Using ignore list from {}: {}",
                config.ignore_file,
                ignore.from_file().join(", ")
            ));
        }

        output.step(&format!("Scanning directory: {}", root.display()));
        let result = scanner::ManifestBuilder::new(&config, &ignore).build(&root)?;

        for collision in &result.collisions {
            output.warning(&format!("Flat name collision: {}", collision));
        }

        if self.stdout {
            print!("{}", report::to_json(&result.manifest)?);
            return Ok(());
        }

        report::write_manifest(&result.manifest, &config.output_file)?;
        output.success(&format!(
            "Directory structure exported to {}",
            config.output_file.display()
        ));

        output.summary_stats("Directories", result.stats.directories as u64);
        output.summary_stats("Files", result.stats.files as u64);
        output.summary_stats("Total bytes", result.stats.total_bytes);
        output.summary_stats("Files skipped", result.stats.files_skipped as u64);

        if let Some(sample) = report::sample_entry(&result.manifest)? {
            output.section_header("Sample entry");
            output.block(&sample);
        }

        Ok(())
    }
}

fn setup_logging(verbose: u8, quiet: bool) {
    if quiet {
        return;
    }

    // Keep the walker crate quiet unless everything is requested
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        match verbose {
            0 => tracing_subscriber::EnvFilter::new("warn"),
            1 => tracing_subscriber::EnvFilter::new("info,ignore=warn"),
            2 => tracing_subscriber::EnvFilter::new("debug,ignore=warn"),
            _ => tracing_subscriber::EnvFilter::new("trace"),
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
