//! repo-bundle: snapshot selected root-level files of a repository into a
//! single Markdown document, one fenced code block per file.
//!
//! Pipeline: [`resolve`] targets, walk and [`filter`] them, [`gather`] text,
//! [`render`] Markdown, write and [`report`]. [`bundler::Bundler`] runs it end to end.

pub mod bundler;
pub mod cli;
pub mod config;
pub mod error;
pub mod filter;
pub mod gather;
pub mod load_config;
pub mod render;
pub mod report;
pub mod resolve;

pub use bundler::{BundleReport, Bundler};
pub use cli::{run, Cli};
pub use config::{BundleConfig, ExclusionRules};
pub use error::BundleError;
pub use gather::{FileEntry, Gathered};
