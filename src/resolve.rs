//! Target resolution: raw root-level names into validated absolute paths.

use crate::error::BundleError;
use std::path::{Component, Path, PathBuf};
use tracing::debug;

/// Resolves `raw_targets` against `repo_root`.
///
/// `repo_root` must already be canonical. Each target has to exist and sit
/// directly under the root. Duplicates (`src`, `./src`, `src/`) collapse to the
/// first occurrence. Nothing is read or written here.
pub fn resolve_targets<S: AsRef<str>>(
    repo_root: &Path,
    raw_targets: &[S],
) -> Result<Vec<PathBuf>, BundleError> {
    let mut targets: Vec<PathBuf> = Vec::with_capacity(raw_targets.len());
    for raw in raw_targets {
        let path = resolve_target(repo_root, raw.as_ref())?;
        if targets.contains(&path) {
            debug!(target = raw.as_ref(), "Dropping duplicate target");
            continue;
        }
        targets.push(path);
    }
    Ok(targets)
}

/// Validates a single target. Check order: escape, root-level, existence.
pub fn resolve_target(repo_root: &Path, raw: &str) -> Result<PathBuf, BundleError> {
    let joined = repo_root.join(raw);
    let (path, exists) = match canonical_or_lexical(&joined) {
        Ok(resolved) => resolved,
        Err(e) => return Err(BundleError::io(joined, e)),
    };

    if !path.starts_with(repo_root) {
        return Err(BundleError::PathEscape {
            target: raw.to_string(),
        });
    }
    if path.parent() != Some(repo_root) {
        return Err(BundleError::InvalidTarget {
            target: raw.to_string(),
        });
    }
    if !exists {
        return Err(BundleError::TargetNotFound {
            target: raw.to_string(),
        });
    }
    debug!(target = raw, path = %path.display(), "Resolved target");
    Ok(path)
}

/// Canonical form plus whether the path exists. A missing path (or one with a
/// missing intermediate like `gone/../src`) falls back to lexical resolution.
fn canonical_or_lexical(path: &Path) -> std::io::Result<(PathBuf, bool)> {
    match path.canonicalize() {
        Ok(canonical) => Ok((canonical, true)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            let lexical = normalize_lexically(path);
            match lexical.canonicalize() {
                Ok(canonical) => Ok((canonical, true)),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok((lexical, false)),
                Err(e) => Err(e),
            }
        }
        Err(e) => Err(e),
    }
}

/// Resolves `.` and `..` without touching the filesystem.
fn normalize_lexically(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

/// Absolute output location for `output` (relative paths hang off `repo_root`).
/// The file need not exist yet.
pub fn resolve_output(repo_root: &Path, output: &Path) -> PathBuf {
    let joined = repo_root.join(output);
    match canonical_or_lexical(&joined) {
        Ok((path, _)) => path,
        Err(_) => normalize_lexically(&joined),
    }
}
