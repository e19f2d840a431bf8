//! Path helpers for report links and aggregated directory names.

use std::path::{Component, Path, PathBuf};

/// Renders a path with `/` separators regardless of platform.
pub fn to_posix(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// Computes the path of `target` relative to the directory `base`.
///
/// Both paths are compared component-wise after lexical normalization, so
/// they should share a root (both absolute, or both relative to the same
/// directory).
pub fn relative_to(base: &Path, target: &Path) -> PathBuf {
    let base = normalize(base);
    let target = normalize(target);

    let common = base
        .components()
        .zip(target.components())
        .take_while(|(a, b)| a == b)
        .count();

    let mut rel = PathBuf::new();
    for _ in base.components().skip(common) {
        rel.push("..");
    }
    for comp in target.components().skip(common) {
        rel.push(comp.as_os_str());
    }
    rel
}

/// Lexically resolves `.` and `..` components.
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for comp in path.components() {
        match comp {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    out.push("..");
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}
