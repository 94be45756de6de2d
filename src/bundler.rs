//! The `Bundler`: resolve targets, gather files, render Markdown, write output.

use crate::config::BundleConfig;
use crate::error::BundleError;
use crate::gather::{gather_file_contents, FileEntry};
use crate::render::build_markdown;
use crate::report::{display_path, format_summary, write_markdown};
use crate::resolve::{resolve_output, resolve_targets};
use std::path::{Path, PathBuf};
use tracing::info;

/// Holds the repository root and the immutable configuration for one run.
pub struct Bundler {
    repo_root: PathBuf,
    config: BundleConfig,
}

/// What a completed run produced.
#[derive(Debug)]
pub struct BundleReport {
    pub entries: Vec<FileEntry>,
    pub output_path: PathBuf,
    /// `output_path` relative to the root when possible.
    pub output_display: String,
    pub large_file_threshold: u64,
}

impl BundleReport {
    pub fn summary(&self) -> String {
        format_summary(&self.entries, self.large_file_threshold, &self.output_display)
    }
}

impl Bundler {
    /// `repo_root` must be canonical (see [`crate::load_config::repo_root_from_env`]).
    pub fn new(repo_root: PathBuf, config: BundleConfig) -> Self {
        Self { repo_root, config }
    }

    /// Resolves targets and gathers the sorted entries. Writes nothing.
    ///
    /// An empty `raw_targets` means the configured default targets.
    pub fn collect<S: AsRef<str>>(&self, raw_targets: &[S]) -> Result<Vec<FileEntry>, BundleError> {
        let targets = if raw_targets.is_empty() {
            resolve_targets(&self.repo_root, self.config.default_targets.as_slice())?
        } else {
            resolve_targets(&self.repo_root, raw_targets)?
        };
        info!(count = targets.len(), "Targets resolved");
        gather_file_contents(&self.repo_root, &self.config.exclude, &targets)
    }

    /// Full pipeline. `output` overrides the configured output path.
    ///
    /// All targets are validated before any file is read, so a bad target
    /// never leaves a partial document behind.
    pub fn bundle<S: AsRef<str>>(
        &self,
        raw_targets: &[S],
        output: Option<&Path>,
    ) -> Result<BundleReport, BundleError> {
        let output = output.unwrap_or(self.config.output.as_path());
        let output_path = resolve_output(&self.repo_root, output);

        let entries = self.collect(raw_targets)?;
        let document = build_markdown(&entries);
        write_markdown(&document, &output_path)?;

        info!(
            files = entries.len(),
            output = %output_path.display(),
            "Bundle complete"
        );
        Ok(BundleReport {
            output_display: display_path(&self.repo_root, &output_path),
            output_path,
            entries,
            large_file_threshold: self.config.large_file_threshold,
        })
    }
}
