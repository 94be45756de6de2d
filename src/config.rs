// repo-bundle/src/config.rs

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::PathBuf;
use tracing::{debug, info};

pub const DEFAULT_TARGETS: &[&str] = &[
    "src",
    "index.html",
    "package.json",
    "vite.config.js",
    "README.md",
    "AGENTS.md",
];

pub const DEFAULT_OUTPUT: &str = "tools/tmp/repo_bundle.md";

/// Files at or above this size get a size annotation in the summary.
pub const LARGE_FILE_SIZE_BYTES: u64 = 20 * 1024;

pub const TOOLING_DIR: &str = "tools";

const IGNORED_DIR_NAMES: &[&str] = &["__pycache__", ".git", "node_modules", "dist", "build"];

const IGNORED_FILE_NAMES: &[&str] = &[
    ".env",
    ".env.example",
    ".gitignore",
    "package-lock.json",
    "pnpm-lock.yaml",
    "yarn.lock",
];

const IGNORED_SUFFIXES: &[&str] = &[
    ".ico", ".svg", ".png", ".jpg", ".jpeg", ".gif", ".webp", ".pyc", ".pyo", ".exe", ".dll",
    ".so", ".dylib", ".bin", ".class",
];

/// Everything the bundler needs besides the repository root.
///
/// Built once (defaults, optionally overlaid by a YAML file) and never
/// mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BundleConfig {
    /// Targets used when the caller passes none.
    pub default_targets: Vec<String>,
    /// Output path, relative to the repository root unless absolute.
    pub output: PathBuf,
    pub large_file_threshold: u64,
    pub exclude: ExclusionRules,
}

impl Default for BundleConfig {
    fn default() -> Self {
        Self {
            default_targets: DEFAULT_TARGETS.iter().map(|t| t.to_string()).collect(),
            output: PathBuf::from(DEFAULT_OUTPUT),
            large_file_threshold: LARGE_FILE_SIZE_BYTES,
            exclude: ExclusionRules::default(),
        }
    }
}

impl BundleConfig {
    pub fn trace_loaded(&self) {
        info!(
            output = %self.output.display(),
            default_targets = self.default_targets.len(),
            large_file_threshold = self.large_file_threshold,
            "Loaded BundleConfig"
        );
        debug!(?self, "BundleConfig loaded (full debug)");
    }
}

/// Static exclusion sets. A file matching any of them is never bundled.
///
/// The predicate itself lives in [`crate::filter`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ExclusionRules {
    /// Directory names excluded at any depth (VCS, dependency caches, build output).
    pub dir_names: BTreeSet<String>,
    /// Exact base names (lockfiles, env files, ignore files).
    pub file_names: BTreeSet<String>,
    /// Lower-case suffixes including the leading dot.
    pub suffixes: BTreeSet<String>,
    /// The directory holding this tool and its output; never bundled.
    pub tooling_dir: String,
}

impl Default for ExclusionRules {
    fn default() -> Self {
        Self {
            dir_names: IGNORED_DIR_NAMES.iter().map(|s| s.to_string()).collect(),
            file_names: IGNORED_FILE_NAMES.iter().map(|s| s.to_string()).collect(),
            suffixes: IGNORED_SUFFIXES.iter().map(|s| s.to_string()).collect(),
            tooling_dir: TOOLING_DIR.to_string(),
        }
    }
}

impl ExclusionRules {
    /// Brings user-supplied suffixes into the `.ext` lower-case form the
    /// predicate compares against (`PNG` and `.png` both become `.png`).
    pub fn normalized(mut self) -> Self {
        self.suffixes = self
            .suffixes
            .into_iter()
            .map(|s| {
                let lower = s.trim().to_lowercase();
                if lower.starts_with('.') {
                    lower
                } else {
                    format!(".{lower}")
                }
            })
            .collect();
        self
    }
}
