use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::error::{LockError, UtilError};
use crate::Result;

const LOCK_SUFFIX: &str = ".lock";

/// RAII guard for atomic file replacement.
///
/// Creates `<path>.lock` with O_CREAT|O_EXCL, collects the new contents, and
/// renames over the target on [`commit`](LockFile::commit). Dropping an
/// uncommitted guard removes the lock file and leaves the target untouched,
/// so a failed update never exposes a half-written ref or index.
pub struct LockFile {
    path: PathBuf,
    lock_path: PathBuf,
    file: Option<File>,
    committed: bool,
}

impl LockFile {
    /// Acquire a lock on the given path.
    ///
    /// Fails with [`LockError::AlreadyLocked`] if the lock file exists.
    pub fn acquire(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let mut lock_path = path.clone().into_os_string();
        lock_path.push(LOCK_SUFFIX);
        let lock_path = PathBuf::from(lock_path);

        let file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&lock_path)
            .map_err(|e| {
                if e.kind() == io::ErrorKind::AlreadyExists {
                    UtilError::Lock(LockError::AlreadyLocked {
                        path: lock_path.clone(),
                    })
                } else {
                    UtilError::Lock(LockError::Create {
                        path: lock_path.clone(),
                        source: e,
                    })
                }
            })?;

        Ok(Self {
            path,
            lock_path,
            file: Some(file),
            committed: false,
        })
    }

    /// The target file path (without the `.lock` suffix).
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Flush, sync, and atomically rename the lock file onto the target.
    pub fn commit(mut self) -> Result<()> {
        let commit_err = |path: &Path, source: io::Error| {
            UtilError::Lock(LockError::Commit {
                path: path.to_path_buf(),
                source,
            })
        };

        if let Some(mut file) = self.file.take() {
            file.flush().map_err(|e| commit_err(&self.lock_path, e))?;
            file.sync_all().map_err(|e| commit_err(&self.lock_path, e))?;
        }
        fs::rename(&self.lock_path, &self.path)
            .map_err(|e| commit_err(&self.lock_path, e))?;
        self.committed = true;
        Ok(())
    }
}

impl Write for LockFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.file
            .as_mut()
            .ok_or_else(|| io::Error::other("lock file already closed"))?
            .write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.file
            .as_mut()
            .ok_or_else(|| io::Error::other("lock file already closed"))?
            .flush()
    }
}

impl Drop for LockFile {
    fn drop(&mut self) {
        if !self.committed {
            self.file.take();
            let _ = fs::remove_file(&self.lock_path);
        }
    }
}
