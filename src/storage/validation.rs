//! Path validation
//!
//! Coarse safety checks applied to every path before it reaches the filesystem.
//! Rejects traversal tokens and NUL bytes; does not resolve symlinks or confine
//! paths to a root.

use std::path::{Path, PathBuf};

/// Validate that a path string is safe to hand to the filesystem
pub fn is_valid_path(path: &str) -> bool {
    if path.is_empty() || path.contains("..") || path.contains('\0') {
        return false;
    }
    normalize_path(path).is_some()
}

/// Normalize a path syntactically, dropping `.` components and redundant separators
pub fn normalize_path(path: &str) -> Option<PathBuf> {
    let normalized: PathBuf = Path::new(path).components().collect();
    if normalized.as_os_str().is_empty() {
        None
    } else {
        Some(normalized)
    }
}

/// Trim user input the same way for every handler
pub fn sanitize_input(input: &str) -> &str {
    input.trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_paths() {
        assert!(is_valid_path("/tmp/a"));
        assert!(is_valid_path("relative/dir/file.txt"));
        assert!(is_valid_path("./here"));
    }

    #[test]
    fn rejects_traversal_anywhere() {
        assert!(!is_valid_path("../etc/passwd"));
        assert!(!is_valid_path("/tmp/../etc"));
        assert!(!is_valid_path("/tmp/a..b"));
    }

    #[test]
    fn rejects_empty_and_nul() {
        assert!(!is_valid_path(""));
        assert!(!is_valid_path("/tmp/a\0b"));
    }

    #[test]
    fn lone_dot_still_normalizes() {
        assert_eq!(normalize_path("."), Some(PathBuf::from(".")));
        assert_eq!(normalize_path("a//b/./c"), Some(PathBuf::from("a/b/c")));
    }

    #[test]
    fn sanitize_trims_whitespace() {
        assert_eq!(sanitize_input("  /tmp/x \n"), "/tmp/x");
    }
}
