//! Markdown rendering of gathered files.
//!
//! Output is a pure function of the entries: same input, same bytes.

use crate::gather::FileEntry;
use regex::Regex;
use std::path::Path;
use std::sync::OnceLock;

pub const DOCUMENT_HEADER: &str = "# Repository source bundle\n\n";

const MIN_FENCE_LEN: usize = 3;

fn backtick_runs() -> &'static Regex {
    static RUNS: OnceLock<Regex> = OnceLock::new();
    RUNS.get_or_init(|| Regex::new(r"`+").expect("backtick run pattern is valid"))
}

/// Fence language tag for a file, by lower-cased suffix. `None` when unmapped.
pub fn guess_language(path: &Path) -> Option<&'static str> {
    let suffix = path.extension()?.to_string_lossy().to_lowercase();
    match suffix.as_str() {
        "js" | "jsx" => Some("javascript"),
        "css" => Some("css"),
        "html" => Some("html"),
        "json" => Some("json"),
        "md" => Some("markdown"),
        _ => None,
    }
}

/// A backtick fence longer than any backtick run in `content`, at least three long.
pub fn select_fence(content: &str) -> String {
    let longest = backtick_runs()
        .find_iter(content)
        .map(|m| m.as_str().len())
        .max()
        .unwrap_or(0);
    "`".repeat(MIN_FENCE_LEN.max(longest + 1))
}

/// Heading, opening fence (with language tag if known), trimmed body, closing fence.
pub fn render_section(entry: &FileEntry) -> String {
    let fence = select_fence(&entry.content);
    let opening = match guess_language(Path::new(&entry.rel_path)) {
        Some(language) => format!("{fence}{language}"),
        None => fence.clone(),
    };
    [
        format!("## `{}`", entry.rel_path),
        String::new(),
        opening,
        entry.content.trim_end().to_string(),
        fence,
    ]
    .join("\n")
    .trim()
    .to_string()
}

/// The whole bundle document. Sections appear in the order given.
pub fn build_markdown(entries: &[FileEntry]) -> String {
    let sections: Vec<String> = entries.iter().map(render_section).collect();
    let mut document = String::from(DOCUMENT_HEADER);
    document.push_str(sections.join("\n\n").trim_end());
    document.push('\n');
    document
}
