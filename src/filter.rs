//! Exclusion predicate and the lazy per-target file traversal.

use crate::config::ExclusionRules;
use crate::error::BundleError;
use std::borrow::Cow;
use std::fs;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, trace};
use walkdir::{DirEntry, WalkDir};

impl ExclusionRules {
    /// True when the file at `rel_path` (relative to the repository root) must
    /// not be bundled. Pure: depends only on the path text and the rules.
    pub fn excludes(&self, rel_path: &Path) -> bool {
        let segments: Vec<Cow<'_, str>> = rel_path
            .components()
            .filter_map(|c| match c {
                Component::Normal(s) => Some(s.to_string_lossy()),
                _ => None,
            })
            .collect();

        if segments.iter().any(|s| self.dir_names.contains(&**s)) {
            return true;
        }
        if segments.iter().any(|s| **s == *self.tooling_dir) {
            return true;
        }

        if let Some(name) = rel_path.file_name() {
            if self.file_names.contains(&*name.to_string_lossy()) {
                return true;
            }
        }

        match suffix_of(rel_path) {
            Some(suffix) => self.suffixes.contains(&suffix),
            None => false,
        }
    }

    /// Directories that can be pruned from a walk without changing the result.
    fn prunes(&self, entry: &DirEntry) -> bool {
        if !entry.file_type().is_dir() {
            return false;
        }
        let name = entry.file_name().to_string_lossy();
        self.dir_names.contains(&*name) || *name == *self.tooling_dir
    }
}

/// Lower-cased `.ext` of the final segment, if any. `.env` has none.
pub fn suffix_of(path: &Path) -> Option<String> {
    path.extension()
        .map(|ext| format!(".{}", ext.to_string_lossy().to_lowercase()))
}

type EntryIter<'a> = Box<dyn Iterator<Item = walkdir::Result<DirEntry>> + 'a>;

enum Source<'a> {
    Single(Option<PathBuf>),
    Walk(EntryIter<'a>),
}

/// Eligible files under one validated target, yielded lazily in walk order.
pub struct TargetFiles<'a> {
    repo_root: &'a Path,
    rules: &'a ExclusionRules,
    source: Source<'a>,
}

impl<'a> TargetFiles<'a> {
    pub fn new(
        repo_root: &'a Path,
        rules: &'a ExclusionRules,
        target: &Path,
    ) -> Result<Self, BundleError> {
        let metadata = fs::metadata(target).map_err(|e| BundleError::io(target, e))?;
        let source = if metadata.is_file() {
            Source::Single(Some(target.to_path_buf()))
        } else if metadata.is_dir() {
            debug!(target = %target.display(), "Walking target directory");
            let walk = WalkDir::new(target)
                .follow_links(false)
                .into_iter()
                .filter_entry(move |entry| !rules.prunes(entry));
            Source::Walk(Box::new(walk))
        } else {
            return Err(BundleError::UnsupportedPathType {
                path: target.to_path_buf(),
            });
        };
        Ok(Self {
            repo_root,
            rules,
            source,
        })
    }

    fn eligible(&self, path: &Path) -> bool {
        let rel = path.strip_prefix(self.repo_root).unwrap_or(path);
        if self.rules.excludes(rel) {
            trace!(path = %rel.display(), "Excluded by rule");
            return false;
        }
        true
    }
}

impl Iterator for TargetFiles<'_> {
    type Item = Result<PathBuf, BundleError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let path = match &mut self.source {
                Source::Single(slot) => slot.take()?,
                Source::Walk(entries) => match entries.next()? {
                    Ok(entry) => entry.into_path(),
                    Err(e) => return Some(Err(e.into())),
                },
            };
            // Follows symlinks, so a link to a regular file counts as a file.
            if !path.is_file() {
                continue;
            }
            if self.eligible(&path) {
                return Some(Ok(path));
            }
        }
    }
}
