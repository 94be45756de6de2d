///
/// This module implements the CLI interface for repo-bundle: argument parsing,
/// loading the environment-driven configuration, and printing the summary.
///
/// All bundling logic lives in [`crate::bundler`] and the modules it wires together.
/// This module is strictly CLI glue.
///
/// ## How To Use
/// - For command-line users: run the `repo-bundle` binary with `--help`.
/// - For programmatic/integration use: call [`run`] with a constructed [`Cli`].
///
/// ## Environment
/// - `REPO_BUNDLE_ROOT`: repository root (default: working directory)
/// - `REPO_BUNDLE_CONFIG`: optional YAML config overriding the built-in rules
/// - `RUST_LOG`: log filter for the stderr trace output
use crate::bundler::Bundler;
use crate::load_config::{config_from_env, repo_root_from_env};
use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

/// Bundle key repository files into a Markdown document with inline code.
#[derive(Parser, Debug)]
#[clap(
    name = "repo-bundle",
    version,
    about = "Bundle key repository files into a Markdown document with inline code."
)]
pub struct Cli {
    /// Root-level paths to include in the archive
    /// (default: src, index.html, package.json, vite.config.js, README.md, AGENTS.md)
    pub targets: Vec<String>,

    /// Output Markdown file path (default: tools/tmp/repo_bundle.md)
    #[clap(short, long)]
    pub output: Option<PathBuf>,
}

/// Extracted CLI logic entrypoint for integration tests and main()
pub fn run(cli: Cli) -> Result<()> {
    // Emit a top-level 'trace_initialised' event at the very start
    tracing::info!("trace_initialised");

    let config = config_from_env()?;
    let repo_root = repo_root_from_env()?;
    let bundler = Bundler::new(repo_root, config);

    let report = bundler.bundle(cli.targets.as_slice(), cli.output.as_deref())?;
    tracing::info!(files = report.entries.len(), "Bundle command complete");
    print!("{}", report.summary());
    Ok(())
}
