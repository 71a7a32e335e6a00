//! Shared test utilities for integration tests.
//!
//! Import from integration test files as:
//! ```ignore
//! mod common;
//! ```

use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Initialize tracing for tests, respecting RUST_LOG env var.
///
/// Safe to call multiple times; subsequent calls are no-ops.
#[allow(dead_code)]
pub fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init()
        .ok();
}

/// Note file contents with optional id, title and parent link lines.
#[allow(dead_code)]
pub fn note(id: &str, title: &str, parent: Option<&str>) -> String {
    let mut content = String::new();
    if !id.is_empty() {
        content.push_str(&format!("id: {id}\n"));
    }
    if !title.is_empty() {
        content.push_str(&format!("title: {title}\n"));
    }
    content.push_str("\nSome body text.\n");
    if let Some(parent) = parent {
        content.push_str(&format!("\nUp: [parent note]({parent}?label=parent)\n"));
    }
    content
}

/// Write `content` to `name` under `dir`, creating subdirectories as needed.
#[allow(dead_code)]
pub fn write_note(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(&path, content).unwrap();
    path
}

/// Create the three-note chain A <- B <- C and return the note paths in that order.
///
/// Links name the parent file only; substring matching finds it inside the temp dir path.
#[allow(dead_code)]
pub fn create_chain(temp_dir: &TempDir) -> Vec<String> {
    let root = temp_dir.path();
    let a = write_note(root, "a.md", &note("1", "A", None));
    let b = write_note(root, "b.md", &note("2", "B", Some("a.md")));
    let c = write_note(root, "c.md", &note("3", "C", Some("b.md")));
    [a, b, c]
        .iter()
        .map(|p| p.to_string_lossy().into_owned())
        .collect()
}

/// Newline-delimited path list, as `find` would produce.
#[allow(dead_code)]
pub fn path_list<S: AsRef<str>>(paths: &[S]) -> String {
    paths.iter().fold(String::new(), |mut acc, p| {
        acc.push_str(p.as_ref());
        acc.push('\n');
        acc
    })
}
