//! Reads eligible files into [`FileEntry`] records.

use crate::config::ExclusionRules;
use crate::error::BundleError;
use crate::filter::TargetFiles;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// One bundled file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    /// Path relative to the repository root, `/`-separated on every platform.
    pub rel_path: String,
    /// Decoded text with line endings normalised to `\n`.
    pub content: String,
    /// Size on disk in bytes.
    pub size: u64,
}

/// Outcome of reading a single candidate file.
#[derive(Debug)]
pub enum Gathered {
    Included(FileEntry),
    Skipped { rel_path: String, reason: SkipReason },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    NotUtf8,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::NotUtf8 => write!(f, "not UTF-8 text"),
        }
    }
}

/// Collects every eligible file below `targets`, sorted by relative path.
///
/// Files that are not valid UTF-8 are reported on stderr and left out; any
/// other failure aborts.
pub fn gather_file_contents(
    repo_root: &Path,
    rules: &ExclusionRules,
    targets: &[PathBuf],
) -> Result<Vec<FileEntry>, BundleError> {
    let mut entries = Vec::new();
    let mut skipped = 0usize;
    for target in targets {
        for file_path in TargetFiles::new(repo_root, rules, target)? {
            match read_entry(repo_root, &file_path?)? {
                Gathered::Included(entry) => {
                    debug!(path = %entry.rel_path, size = entry.size, "Gathered file");
                    entries.push(entry);
                }
                Gathered::Skipped { rel_path, reason } => {
                    debug!(path = %rel_path, %reason, "Skipping file");
                    eprintln!("Skipping {rel_path}: {reason}.");
                    skipped += 1;
                }
            }
        }
    }
    entries.sort_by(|a, b| a.rel_path.cmp(&b.rel_path));
    info!(
        count = entries.len(),
        skipped = skipped,
        "Completed gathering file contents"
    );
    Ok(entries)
}

/// Reads one file. Decoding failure is an outcome, not an error.
pub fn read_entry(repo_root: &Path, file_path: &Path) -> Result<Gathered, BundleError> {
    let rel_path = posix_relative(repo_root, file_path);
    let bytes = fs::read(file_path).map_err(|e| BundleError::io(file_path, e))?;
    let size = bytes.len() as u64;
    match String::from_utf8(bytes) {
        Ok(text) => Ok(Gathered::Included(FileEntry {
            rel_path,
            content: normalize_newlines(text),
            size,
        })),
        Err(_) => Ok(Gathered::Skipped {
            rel_path,
            reason: SkipReason::NotUtf8,
        }),
    }
}

/// `/`-joined path of `path` relative to `repo_root`.
pub fn posix_relative(repo_root: &Path, path: &Path) -> String {
    let rel = path.strip_prefix(repo_root).unwrap_or(path);
    rel.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Text-mode newline translation: `\r\n` and lone `\r` become `\n`.
fn normalize_newlines(text: String) -> String {
    if !text.contains('\r') {
        return text;
    }
    text.replace("\r\n", "\n").replace('\r', "\n")
}
