//! Repository-relative path handling.
//!
//! All paths stored in the index and in tree objects are relative to the
//! repository root and use `/` separators regardless of platform.

use std::path::{Component, Path, PathBuf};

use crate::error::UtilError;
use crate::Result;

/// Convert `path` into a repository-relative `/`-separated string.
///
/// `path` may be absolute or relative to `root`. Fails if the path escapes
/// the root or contains non-UTF-8 components.
pub fn repo_relative(root: &Path, path: &Path) -> Result<String> {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    };
    let normalized = normalize(&absolute)?;
    let root = normalize(root)?;

    let rel = normalized.strip_prefix(&root).map_err(|_| {
        UtilError::Path(format!(
            "'{}' is outside the repository at '{}'",
            path.display(),
            root.display()
        ))
    })?;

    let mut out = String::new();
    for component in rel.components() {
        let part = component
            .as_os_str()
            .to_str()
            .ok_or_else(|| UtilError::Path(format!("non-UTF-8 path: {:?}", path)))?;
        if !out.is_empty() {
            out.push('/');
        }
        out.push_str(part);
    }
    Ok(out)
}

/// Resolve `.` and `..` components lexically, without touching the filesystem.
fn normalize(path: &Path) -> Result<PathBuf> {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    return Err(UtilError::Path(format!(
                        "path escapes root: {}",
                        path.display()
                    )));
                }
            }
            other => out.push(other),
        }
    }
    Ok(out)
}

/// Split a repository-relative path into its `/`-separated segments.
pub fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty())
}

/// The parent directory of a repository-relative path, if any.
pub fn parent(path: &str) -> Option<&str> {
    path.rsplit_once('/').map(|(dir, _)| dir)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_inside_root() {
        let rel = repo_relative(Path::new("/work"), Path::new("/work/a/b.txt")).unwrap();
        assert_eq!(rel, "a/b.txt");
    }

    #[test]
    fn already_relative() {
        let rel = repo_relative(Path::new("/work"), Path::new("a/b.txt")).unwrap();
        assert_eq!(rel, "a/b.txt");
    }

    #[test]
    fn dot_components_resolve() {
        let rel = repo_relative(Path::new("/work"), Path::new("a/./c/../b.txt")).unwrap();
        assert_eq!(rel, "a/b.txt");
    }

    #[test]
    fn escaping_root_fails() {
        assert!(repo_relative(Path::new("/work"), Path::new("/other/b.txt")).is_err());
        assert!(repo_relative(Path::new("/work"), Path::new("../b.txt")).is_err());
    }

    #[test]
    fn segment_split() {
        let parts: Vec<_> = segments("a/b/c.txt").collect();
        assert_eq!(parts, ["a", "b", "c.txt"]);
    }

    #[test]
    fn parent_of_path() {
        assert_eq!(parent("a/b/c.txt"), Some("a/b"));
        assert_eq!(parent("c.txt"), None);
    }
}
