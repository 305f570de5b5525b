//! Directory traversal and extension filtering for the CLI.
//!
//! The walk sees every regular file under the root: gitignore semantics are
//! deliberately disabled so results do not depend on repository state. The
//! collected list is sorted, which pins downstream pair and cluster ordering.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use ignore::WalkBuilder;
use tracing::debug;

/// Collects every file under `root` whose extension is in `extensions`
/// (case-insensitive, leading dot included, e.g. `.txt`). An empty list
/// accepts all files. Traversal errors skip the affected entry.
pub fn gather_files(root: &Path, extensions: &[String]) -> Vec<PathBuf> {
    let ext_set: HashSet<String> = extensions
        .iter()
        .map(|e| e.to_ascii_lowercase())
        .collect();

    let walker = WalkBuilder::new(root)
        .hidden(false)
        .ignore(false)
        .git_ignore(false)
        .git_global(false)
        .git_exclude(false)
        .parents(false)
        .require_git(false)
        .build();

    let mut files = Vec::new();
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                debug!(error = %err, "walk_entry_skipped");
                continue;
            }
        };
        if !entry.file_type().is_some_and(|ft| ft.is_file()) {
            continue;
        }
        let path = entry.into_path();
        if ext_set.is_empty() || ext_set.contains(&extension_of(&path)) {
            files.push(path);
        }
    }

    files.sort();
    files
}

/// The file's extension with a leading dot, lowercased; empty for none.
fn extension_of(path: &Path) -> String {
    match path.extension() {
        Some(ext) => format!(".{}", ext.to_string_lossy().to_ascii_lowercase()),
        None => String::new(),
    }
}
