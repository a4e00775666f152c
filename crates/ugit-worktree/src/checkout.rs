use std::fs;
use std::path::Path;

use tracing::debug;
use ugit_index::Index;
use ugit_repository::Repository;
use ugit_utils::path::repo_relative;

use crate::scan::is_ignored;
use crate::WorktreeError;

/// Materialize the index onto the filesystem.
///
/// Every non-ignored file currently in the working directory is removed
/// first (tracked or not), then each index entry is written out, creating
/// parent directories as needed.
pub fn checkout_index(repo: &Repository, index: &Index) -> Result<(), WorktreeError> {
    clear_dir(repo, repo.work_dir())?;

    for (path, oid) in index.iter() {
        let target = repo.work_dir().join(path);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = repo.objects().read_blob(oid)?;
        fs::write(&target, content)?;
    }
    debug!(files = index.len(), "checked out index");
    Ok(())
}

/// Remove every non-ignored file under `dir`, pruning directories that end
/// up empty. Returns whether `dir` itself still has contents.
fn clear_dir(repo: &Repository, dir: &Path) -> Result<bool, WorktreeError> {
    let mut remaining = false;

    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        let rel = repo_relative(repo.work_dir(), &path)?;
        if is_ignored(&rel) {
            remaining = true;
            continue;
        }
        if path.is_dir() {
            if clear_dir(repo, &path)? {
                remaining = true;
            } else {
                fs::remove_dir(&path)?;
            }
        } else {
            fs::remove_file(&path)?;
        }
    }

    Ok(remaining)
}
