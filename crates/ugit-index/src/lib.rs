//! The staging area: a flat map from repository-relative path to blob id.
//!
//! The whole index is one JSON object persisted inside the repository
//! directory. Callers load it, mutate the in-memory map, and save it back;
//! the save is atomic (write to a lock file, then rename), so a crash never
//! leaves a truncated index behind.

use std::collections::BTreeMap;
use std::io::Write;
use std::path::Path;

use ugit_hash::ObjectId;
use ugit_utils::LockFile;

/// Errors from index loading and saving.
#[derive(Debug, thiserror::Error)]
pub enum IndexError {
    #[error("malformed index file: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error(transparent)]
    Util(#[from] ugit_utils::UtilError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// The in-memory index: ordered map of path → blob object id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Index {
    entries: BTreeMap<String, ObjectId>,
}

impl Index {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the index file, or an empty index if the file does not exist.
    pub fn load(path: &Path) -> Result<Self, IndexError> {
        let bytes = match std::fs::read(path) {
            Ok(b) => b,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Self::new());
            }
            Err(e) => return Err(e.into()),
        };
        let entries: BTreeMap<String, ObjectId> = serde_json::from_slice(&bytes)?;
        Ok(Self { entries })
    }

    /// Persist the index atomically.
    pub fn save(&self, path: &Path) -> Result<(), IndexError> {
        let json = serde_json::to_vec(&self.entries)?;
        let mut lock = LockFile::acquire(path)?;
        lock.write_all(&json).map_err(ugit_utils::UtilError::from)?;
        lock.commit()?;
        Ok(())
    }

    /// Stage `path` at `oid`, replacing any previous entry.
    pub fn set(&mut self, path: impl Into<String>, oid: ObjectId) {
        self.entries.insert(path.into(), oid);
    }

    /// The staged blob for `path`, if any.
    pub fn get(&self, path: &str) -> Option<ObjectId> {
        self.entries.get(path).copied()
    }

    /// Unstage `path`.
    pub fn remove(&mut self, path: &str) -> Option<ObjectId> {
        self.entries.remove(path)
    }

    /// Drop all entries.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Replace the whole content with the given snapshot.
    pub fn replace(&mut self, entries: BTreeMap<String, ObjectId>) {
        self.entries = entries;
    }

    /// Iterate entries in path order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ObjectId)> {
        self.entries.iter().map(|(p, o)| (p.as_str(), o))
    }

    /// A copy of the entries as a flat snapshot map.
    pub fn to_map(&self) -> BTreeMap<String, ObjectId> {
        self.entries.clone()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn oid(n: u8) -> ObjectId {
        let mut bytes = [0u8; 20];
        bytes[19] = n;
        ObjectId::from_raw(bytes)
    }

    #[test]
    fn missing_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let index = Index::load(&dir.path().join("index")).unwrap();
        assert!(index.is_empty());
    }

    #[test]
    fn save_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("index");

        let mut index = Index::new();
        index.set("a.txt", oid(1));
        index.set("sub/b.txt", oid(2));
        index.save(&path).unwrap();

        let loaded = Index::load(&path).unwrap();
        assert_eq!(loaded, index);
        assert_eq!(loaded.get("sub/b.txt"), Some(oid(2)));
    }

    #[test]
    fn file_is_a_flat_json_object() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("index");

        let mut index = Index::new();
        index.set("a.txt", oid(1));
        index.save(&path).unwrap();

        let json: serde_json::Value =
            serde_json::from_slice(&std::fs::read(&path).unwrap()).unwrap();
        assert_eq!(json["a.txt"], serde_json::json!(oid(1).to_hex()));
    }

    #[test]
    fn save_replaces_previous_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("index");

        let mut index = Index::new();
        index.set("a.txt", oid(1));
        index.save(&path).unwrap();

        index.clear();
        index.set("b.txt", oid(2));
        index.save(&path).unwrap();

        let loaded = Index::load(&path).unwrap();
        assert_eq!(loaded.get("a.txt"), None);
        assert_eq!(loaded.get("b.txt"), Some(oid(2)));
    }

    #[test]
    fn corrupt_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("index");
        std::fs::write(&path, b"not json").unwrap();

        assert!(matches!(Index::load(&path), Err(IndexError::Malformed(_))));
    }

    #[test]
    fn iteration_is_path_ordered() {
        let mut index = Index::new();
        index.set("z", oid(1));
        index.set("a", oid(2));
        index.set("m", oid(3));

        let paths: Vec<&str> = index.iter().map(|(p, _)| p).collect();
        assert_eq!(paths, ["a", "m", "z"]);
    }
}
