//! Shared path helpers for the launcher file and the runner program.

use std::path::{Path, PathBuf};

/// Returns true if the path is non-empty and absolute.
pub fn is_nonempty_absolute(path: &Path) -> bool {
    !path.as_os_str().is_empty() && path.is_absolute()
}

/// Directory containing `file`, or `.` when it has none.
pub fn parent_dir(file: &Path) -> PathBuf {
    match file.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// Join `path` onto `base` unless it is already absolute.
pub fn resolve_against(path: &Path, base: &Path) -> PathBuf {
    if is_nonempty_absolute(path) {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

/// Resolve a program the way a shell would see it: bare names stay bare so the
/// OS searches PATH, anything with a separator is anchored at `base`.
pub fn resolve_program(program: &Path, base: &Path) -> PathBuf {
    if program.components().count() <= 1 && !program.is_absolute() {
        return program.to_path_buf();
    }
    resolve_against(program, base)
}
