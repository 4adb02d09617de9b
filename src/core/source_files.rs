//! Discovery of customizable source files.

use std::path::{Path, PathBuf};

use anyhow::Result;
use walkdir::WalkDir;

use crate::util::fs::{contains_segment, glob_files};

/// File extensions an override may target.
pub const CUSTOMIZABLE_EXTENSIONS: &[&str] = &[
    "svg", "png", "jpg", "jpeg", "gif", "ico", "less", "js", "jsx",
];

/// Extensions dropped when turning a file path into a module name.
pub const SCRIPT_EXTENSIONS: &[&str] = &["js", "jsx"];

/// Whether `path` has one of the customizable extensions.
pub fn is_customizable(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| CUSTOMIZABLE_EXTENSIONS.contains(&ext))
}

/// `views/View.jsx` -> `views/View`. Other extensions are kept.
pub fn strip_script_extension(module: &str) -> &str {
    for ext in SCRIPT_EXTENSIONS {
        if let Some(stem) = module
            .strip_suffix(ext)
            .and_then(|rest| rest.strip_suffix('.'))
        {
            if !stem.is_empty() && !stem.ends_with('/') {
                return stem;
            }
        }
    }
    module
}

fn is_blacklisted(rel: &Path, abs: &Path, blacklist: Option<&Path>) -> bool {
    match blacklist {
        Some(b) if b.is_absolute() => abs.starts_with(b),
        Some(b) => contains_segment(rel, b),
        None => false,
    }
}

/// Lazily list customizable files under `root`, relative to it.
///
/// Dependency trees named `dependency_dir` are pruned. A relative
/// `blacklist` excludes any file whose relative path contains it as a
/// segment run; an absolute one excludes everything beneath it. The walk
/// is sorted by file name so repeated runs agree.
pub fn source_files(
    root: &Path,
    blacklist: Option<&Path>,
    dependency_dir: &str,
) -> impl Iterator<Item = PathBuf> {
    let root = root.to_path_buf();
    let dependency_dir = dependency_dir.to_string();
    let blacklist = blacklist.map(Path::to_path_buf);

    WalkDir::new(&root)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(move |e| {
            e.depth() == 0 || e.file_name().to_str() != Some(dependency_dir.as_str())
        })
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(err) => {
                tracing::warn!("skipping unreadable entry: {}", err);
                None
            }
        })
        .filter(|e| e.file_type().is_file() && is_customizable(e.path()))
        .filter_map(move |e| {
            let rel = e.path().strip_prefix(&root).ok()?.to_path_buf();
            if is_blacklisted(&rel, e.path(), blacklist.as_deref()) {
                None
            } else {
                Some(rel)
            }
        })
}

/// Every customizable file inside a customization folder, sorted.
pub fn customization_files(folder: &Path) -> Result<Vec<PathBuf>> {
    let patterns: Vec<String> = CUSTOMIZABLE_EXTENSIONS
        .iter()
        .map(|ext| format!("**/*.{}", ext))
        .collect();
    glob_files(folder, &patterns)
}
