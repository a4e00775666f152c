use std::fs;
use std::path::Path;

use tracing::debug;
use ugit_object::{FlatTree, ObjectType};
use ugit_repository::{Repository, REPO_DIR_NAME};
use ugit_utils::path::{repo_relative, segments};

use crate::WorktreeError;

/// Is this repository-relative path off-limits for working-tree scans?
///
/// Any path with a `.ugit` segment is, so the repository never tracks its own
/// storage.
pub fn is_ignored(rel_path: &str) -> bool {
    segments(rel_path).any(|s| s == REPO_DIR_NAME)
}

/// Snapshot the working directory: hash every non-ignored file as a blob and
/// return the flat path → oid map. The blobs land in the object store.
pub fn snapshot(repo: &Repository) -> Result<FlatTree, WorktreeError> {
    let mut result = FlatTree::new();
    scan_dir(repo, repo.work_dir(), &mut result)?;
    debug!(files = result.len(), "snapshotted working tree");
    Ok(result)
}

fn scan_dir(
    repo: &Repository,
    dir: &Path,
    result: &mut FlatTree,
) -> Result<(), WorktreeError> {
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        let rel = repo_relative(repo.work_dir(), &path)?;
        if is_ignored(&rel) {
            continue;
        }
        if path.is_dir() {
            scan_dir(repo, &path, result)?;
        } else if path.is_file() {
            let oid = repo.objects().write(ObjectType::Blob, &fs::read(&path)?)?;
            result.insert(rel, oid);
        }
    }
    Ok(())
}

/// Stage files into the index.
///
/// A file path is hashed as one blob; a directory is walked and every
/// non-ignored file under it is staged.
pub fn add(repo: &Repository, paths: &[impl AsRef<Path>]) -> Result<(), WorktreeError> {
    repo.edit_index(|index| {
        for path in paths {
            let path = path.as_ref();
            let absolute = if path.is_absolute() {
                path.to_path_buf()
            } else {
                repo.work_dir().join(path)
            };
            if absolute.is_file() {
                add_file(repo, index, &absolute)?;
            } else if absolute.is_dir() {
                add_dir(repo, index, &absolute)?;
            } else {
                return Err(WorktreeError::Unaddable {
                    path: path.to_path_buf(),
                });
            }
        }
        Ok(())
    })
}

fn add_file(
    repo: &Repository,
    index: &mut ugit_index::Index,
    path: &Path,
) -> Result<(), WorktreeError> {
    let rel = repo_relative(repo.work_dir(), path)?;
    if is_ignored(&rel) {
        return Ok(());
    }
    let oid = repo.objects().write(ObjectType::Blob, &fs::read(path)?)?;
    debug!(path = %rel, %oid, "staged file");
    index.set(rel, oid);
    Ok(())
}

fn add_dir(
    repo: &Repository,
    index: &mut ugit_index::Index,
    dir: &Path,
) -> Result<(), WorktreeError> {
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        let rel = repo_relative(repo.work_dir(), &path)?;
        if is_ignored(&rel) {
            continue;
        }
        if path.is_dir() {
            add_dir(repo, index, &path)?;
        } else if path.is_file() {
            add_file(repo, index, &path)?;
        }
    }
    Ok(())
}
