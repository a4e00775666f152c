//! Content-addressed object storage.
//!
//! Each object lives at `<repo>/objects/<oid>` as the verbatim record
//! `<type>\0<payload>`, where `<oid>` is the 40-hex SHA-1 of that record.
//! Writes are idempotent by construction: rewriting an existing object is a
//! no-op because the content determines the file name and bytes.

mod read;
mod write;

use std::fs;
use std::path::{Path, PathBuf};

use ugit_hash::ObjectId;
use ugit_object::ObjectType;

/// Errors from object store operations.
#[derive(Debug, thiserror::Error)]
pub enum OdbError {
    #[error("object not found: {0}")]
    NotFound(ObjectId),

    #[error("object {oid} has type {actual}, expected {expected}")]
    TypeMismatch {
        oid: ObjectId,
        expected: ObjectType,
        actual: ObjectType,
    },

    #[error("corrupt object file {path}: content hashes to {actual}, not {expected}")]
    HashMismatch {
        path: PathBuf,
        expected: ObjectId,
        actual: ObjectId,
    },

    #[error(transparent)]
    Object(#[from] ugit_object::ObjectError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Interface to one repository's `objects/` directory.
#[derive(Debug, Clone)]
pub struct ObjectStore {
    objects_dir: PathBuf,
}

impl ObjectStore {
    /// Open the object store at the given objects directory.
    pub fn open(objects_dir: impl AsRef<Path>) -> Self {
        Self {
            objects_dir: objects_dir.as_ref().to_path_buf(),
        }
    }

    /// Path to the objects directory.
    pub fn objects_dir(&self) -> &Path {
        &self.objects_dir
    }

    /// The file path holding a given object id.
    pub fn object_path(&self, oid: &ObjectId) -> PathBuf {
        self.objects_dir.join(oid.to_hex())
    }

    /// Check whether an object exists.
    pub fn contains(&self, oid: &ObjectId) -> bool {
        self.object_path(oid).is_file()
    }

    /// Copy one object verbatim into another store.
    ///
    /// Returns `false` if the destination already had the object. Used by
    /// fetch/push; safe to re-run because object files never change.
    pub fn copy_to(&self, oid: &ObjectId, dest: &ObjectStore) -> Result<bool, OdbError> {
        if dest.contains(oid) {
            return Ok(false);
        }
        let record = self.read_record(oid)?;
        dest.write_record(oid, &record)?;
        Ok(true)
    }

    /// List every object id present in the store.
    pub fn enumerate(&self) -> Result<Vec<ObjectId>, OdbError> {
        let mut oids = Vec::new();
        let entries = match fs::read_dir(&self.objects_dir) {
            Ok(e) => e,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(oids),
            Err(e) => return Err(e.into()),
        };
        for entry in entries {
            let entry = entry?;
            if let Some(name) = entry.file_name().to_str() {
                if let Ok(oid) = ObjectId::from_hex(name) {
                    oids.push(oid);
                }
            }
        }
        oids.sort();
        Ok(oids)
    }
}
