use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::debug;
use ugit_hash::ObjectId;
use ugit_utils::LockFile;

use crate::name::RefName;
use crate::{RefError, RefTarget};

/// Symbolic chains longer than this are treated as corrupt (a cycle written
/// by hand, for instance) rather than followed forever.
const MAX_DEREF_DEPTH: usize = 10;

const SYMBOLIC_PREFIX: &str = "ref:";

/// Ref storage over plain text files in the repository directory.
#[derive(Debug, Clone)]
pub struct RefStore {
    ugit_dir: PathBuf,
}

impl RefStore {
    pub fn new(ugit_dir: impl AsRef<Path>) -> Self {
        Self {
            ugit_dir: ugit_dir.as_ref().to_path_buf(),
        }
    }

    fn ref_path(&self, name: &RefName) -> PathBuf {
        self.ugit_dir.join(name.as_str())
    }

    /// Read one ref file without following symbolic links.
    ///
    /// Returns `None` for a missing ref. Trailing whitespace is tolerated.
    pub fn read(&self, name: &RefName) -> Result<Option<RefTarget>, RefError> {
        let path = self.ref_path(name);
        let contents = match fs::read_to_string(&path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let trimmed = contents.trim();

        if let Some(target) = trimmed.strip_prefix(SYMBOLIC_PREFIX) {
            let target = RefName::new(target.trim())?;
            Ok(Some(RefTarget::Symbolic(target)))
        } else {
            let oid = ObjectId::from_hex(trimmed).map_err(|e| RefError::Malformed {
                name: name.to_string(),
                reason: e.to_string(),
            })?;
            Ok(Some(RefTarget::Direct(oid)))
        }
    }

    /// Follow symbolic refs from `name` to the terminal ref.
    ///
    /// The terminal is the deepest ref that is direct or missing. Returns its
    /// name together with its value (`None` for a missing terminal, e.g. the
    /// unborn branch HEAD points at right after init).
    pub fn resolve(&self, name: &RefName) -> Result<(RefName, Option<ObjectId>), RefError> {
        let mut current = name.clone();
        for _ in 0..MAX_DEREF_DEPTH {
            match self.read(&current)? {
                Some(RefTarget::Symbolic(target)) => current = target,
                Some(RefTarget::Direct(oid)) => return Ok((current, Some(oid))),
                None => return Ok((current, None)),
            }
        }
        Err(RefError::DerefTooDeep(name.to_string()))
    }

    /// Resolve a ref all the way to an object id, if it has one.
    pub fn resolve_oid(&self, name: &RefName) -> Result<Option<ObjectId>, RefError> {
        Ok(self.resolve(name)?.1)
    }

    /// Write a ref.
    ///
    /// With `deref`, the write lands on the terminal of the symbolic chain —
    /// updating a branch through a symbolic HEAD moves the branch, not HEAD.
    /// Without it, the named file itself is rewritten (how checkout repoints
    /// HEAD).
    pub fn update(&self, name: &RefName, target: &RefTarget, deref: bool) -> Result<(), RefError> {
        let name = if deref {
            self.resolve(name)?.0
        } else {
            name.clone()
        };

        let path = self.ref_path(&name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = match target {
            RefTarget::Direct(oid) => oid.to_hex(),
            RefTarget::Symbolic(target) => format!("{SYMBOLIC_PREFIX} {target}"),
        };

        let mut lock = LockFile::acquire(&path)?;
        lock.write_all(contents.as_bytes())
            .map_err(ugit_utils::UtilError::from)?;
        lock.commit()?;
        debug!(name = %name, target = %contents, "updated ref");
        Ok(())
    }

    /// Delete a ref (following symbolic chains when `deref`). Deleting a
    /// missing ref is a no-op.
    pub fn delete(&self, name: &RefName, deref: bool) -> Result<(), RefError> {
        let name = if deref {
            self.resolve(name)?.0
        } else {
            name.clone()
        };
        let path = self.ref_path(&name);
        match fs::remove_file(&path) {
            Ok(()) => {
                debug!(name = %name, "deleted ref");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    /// Enumerate refs whose names start with `prefix`, fully dereferenced.
    ///
    /// Covers `HEAD`, `MERGE_HEAD`, and everything under `refs/`, sorted by
    /// name. Refs without a value (unborn terminals) are suppressed.
    pub fn iter(&self, prefix: &str) -> Result<Vec<(RefName, ObjectId)>, RefError> {
        let mut names = vec![RefName::head(), RefName::merge_head()];
        collect_ref_files(&self.ugit_dir, &self.ugit_dir.join("refs"), &mut names)?;
        names.sort();

        let mut out = Vec::new();
        for name in names {
            if !name.as_str().starts_with(prefix) {
                continue;
            }
            if let Some(oid) = self.resolve_oid(&name)? {
                out.push((name, oid));
            }
        }
        Ok(out)
    }
}

fn collect_ref_files(
    ugit_dir: &Path,
    dir: &Path,
    out: &mut Vec<RefName>,
) -> Result<(), RefError> {
    let entries = match fs::read_dir(dir) {
        Ok(e) => e,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(()),
        Err(e) => return Err(e.into()),
    };
    for entry in entries {
        let entry = entry?;
        let path = entry.path();
        if path.is_dir() {
            collect_ref_files(ugit_dir, &path, out)?;
        } else if path.is_file() {
            let Ok(rel) = path.strip_prefix(ugit_dir) else {
                continue;
            };
            let Some(rel) = rel.to_str() else { continue };
            if rel.ends_with(".lock") {
                continue;
            }
            let name = rel.replace(std::path::MAIN_SEPARATOR, "/");
            if let Ok(name) = RefName::new(name) {
                out.push(name);
            }
        }
    }
    Ok(())
}
