//! Lexical path helpers.
//!
//! Paths coming out of the symbol layer and out of source maps are compared
//! purely lexically: `.` segments are dropped and `..` pops the previous
//! segment. Nothing here touches the file system, so symlinks are not
//! resolved.

use std::path::{Component, Path, PathBuf};

/// Normalize a path by removing `.` and folding `..` segments.
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Prefix(prefix) => normalized.push(prefix.as_os_str()),
            Component::RootDir => normalized.push(component.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            Component::Normal(part) => normalized.push(part),
        }
    }
    normalized
}

/// Resolve `target` against `base_dir` and normalize the result.
///
/// An absolute `target` ignores `base_dir` entirely.
pub fn resolve_path(base_dir: &Path, target: &Path) -> PathBuf {
    if target.is_absolute() {
        normalize_path(target)
    } else {
        normalize_path(&base_dir.join(target))
    }
}

/// Compare two paths after normalizing both.
pub fn paths_match(left: &Path, right: &Path) -> bool {
    normalize_path(left) == normalize_path(right)
}

#[cfg(test)]
#[path = "tests/path_tests.rs"]
mod path_tests;
