/// `load_config` module: turns the process environment and an optional YAML file
/// into the immutable [`BundleConfig`] and repository root the bundler runs with.
///
/// # Responsibilities
/// - Parse the user-supplied YAML file (if any) into [`BundleConfig`], every key optional
/// - Resolve the repository root from `REPO_BUNDLE_ROOT` or the working directory
/// - Produce clear diagnostics: a config that cannot be read or parsed aborts the run
///
/// # Errors
/// All errors here use `anyhow::Error` and surface at the CLI boundary.
///
/// Accepted YAML shape:
///
/// ```yaml
/// default_targets: [src, README.md]
/// output: tools/tmp/repo_bundle.md
/// large_file_threshold: 20480
/// exclude:
///   dir_names: [.git, node_modules]
///   file_names: [yarn.lock]
///   suffixes: [.png, jpg]
///   tooling_dir: tools
/// ```
use crate::config::BundleConfig;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{error, info};

/// Names a YAML config file to load instead of the built-in defaults.
pub const CONFIG_ENV_VAR: &str = "REPO_BUNDLE_CONFIG";

/// Overrides the repository root (defaults to the working directory).
pub const ROOT_ENV_VAR: &str = "REPO_BUNDLE_ROOT";

/// Loads a YAML config file. Keys left out keep their built-in defaults.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<BundleConfig> {
    let path_ref = path.as_ref();
    info!(config_path = ?path_ref, "Loading configuration from file");

    let config_content = match fs::read_to_string(path_ref) {
        Ok(content) => {
            info!(config_path = ?path_ref, "Config file read successfully");
            content
        }
        Err(e) => {
            error!(error = ?e, config_path = ?path_ref, "Failed to read config file");
            return Err(anyhow::anyhow!(
                "Failed to read config file {:?}: {}",
                path_ref,
                e
            ));
        }
    };

    if config_content.trim().is_empty() {
        info!(config_path = ?path_ref, "Config file is empty, using defaults");
        return Ok(BundleConfig::default());
    }

    let raw: BundleConfig = match serde_yaml::from_str(&config_content) {
        Ok(conf) => {
            info!(config_path = ?path_ref, "Parsed config YAML successfully");
            conf
        }
        Err(e) => {
            error!(error = ?e, config_path = ?path_ref, "Failed to parse config YAML");
            return Err(anyhow::anyhow!("Failed to parse config YAML: {e}"));
        }
    };

    Ok(BundleConfig {
        exclude: raw.exclude.normalized(),
        ..raw
    })
}

/// Config from `REPO_BUNDLE_CONFIG` when set, built-in defaults otherwise.
pub fn config_from_env() -> Result<BundleConfig> {
    let config = match std::env::var_os(CONFIG_ENV_VAR) {
        Some(path) => load_config(PathBuf::from(path))?,
        None => {
            info!("No config file configured, using built-in defaults");
            BundleConfig::default()
        }
    };
    config.trace_loaded();
    Ok(config)
}

/// Canonical repository root: `REPO_BUNDLE_ROOT` when set, else the working directory.
pub fn repo_root_from_env() -> Result<PathBuf> {
    let raw = match std::env::var_os(ROOT_ENV_VAR) {
        Some(root) => PathBuf::from(root),
        None => std::env::current_dir().context("Failed to determine working directory")?,
    };
    let root = raw
        .canonicalize()
        .with_context(|| format!("Repository root {} is not accessible", raw.display()))?;
    info!(repo_root = %root.display(), "Resolved repository root");
    Ok(root)
}
