//! Writing the bundle to disk and the human-readable summary.

use crate::error::BundleError;
use crate::gather::FileEntry;
use std::fs;
use std::path::Path;
use tracing::info;

const SIZE_UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];

/// Writes `content` to `output_path`, creating parent directories and
/// replacing any existing file.
pub fn write_markdown(content: &str, output_path: &Path) -> Result<(), BundleError> {
    if let Some(parent) = output_path.parent() {
        fs::create_dir_all(parent).map_err(|e| BundleError::io(parent, e))?;
    }
    fs::write(output_path, content).map_err(|e| BundleError::io(output_path, e))?;
    info!(
        path = %output_path.display(),
        bytes = content.len(),
        "Bundle document written"
    );
    Ok(())
}

/// `512 B`, `20.0 KB`, `1.5 MB`. Binary steps, capped at TB.
pub fn format_size(size_bytes: u64) -> String {
    let mut size = size_bytes as f64;
    for (i, unit) in SIZE_UNITS.iter().enumerate() {
        if size < 1024.0 || i == SIZE_UNITS.len() - 1 {
            if i == 0 {
                return format!("{} {unit}", size as u64);
            }
            return format!("{size:.1} {unit}");
        }
        size /= 1024.0;
    }
    format!("{size_bytes} B")
}

/// Output location as shown to the user: relative to the root when inside it.
pub fn display_path(repo_root: &Path, output_path: &Path) -> String {
    match output_path.strip_prefix(repo_root) {
        Ok(rel) => rel
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/"),
        Err(_) => output_path.display().to_string(),
    }
}

/// The stdout summary: included files (large ones annotated) and the output location.
pub fn format_summary(entries: &[FileEntry], large_file_threshold: u64, output_display: &str) -> String {
    let mut out = String::from("Included files:\n");
    for entry in entries {
        if entry.size >= large_file_threshold {
            out.push_str(&format!("- {} ({})\n", entry.rel_path, format_size(entry.size)));
        } else {
            out.push_str(&format!("- {}\n", entry.rel_path));
        }
    }
    out.push_str(&format!("Bundle written to: {output_display}\n"));
    out
}
