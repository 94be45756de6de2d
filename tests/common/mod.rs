#![allow(dead_code)]

use repo_bundle::{BundleConfig, Bundler};
use std::fs::{create_dir_all, write};
use std::path::{Path, PathBuf};
use tempfile::{tempdir, TempDir};

/// Scratch repository plus its canonical root (tempdirs may sit behind symlinks).
pub fn scratch_repo() -> (TempDir, PathBuf) {
    let tmp = tempdir().unwrap();
    let root = tmp.path().canonicalize().unwrap();
    (tmp, root)
}

pub fn write_file(root: &Path, rel: &str, content: impl AsRef<[u8]>) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        create_dir_all(parent).unwrap();
    }
    write(path, content).unwrap();
}

pub fn bundler(root: &Path) -> Bundler {
    Bundler::new(root.to_path_buf(), BundleConfig::default())
}
