use std::fs;

use ugit_hash::ObjectId;
use ugit_object::{split_record, Commit, Object, ObjectType, Tree};

use crate::{ObjectStore, OdbError};

impl ObjectStore {
    /// Read and parse an object.
    pub fn read(&self, oid: &ObjectId) -> Result<Object, OdbError> {
        let record = self.read_record(oid)?;
        Ok(Object::parse(&record)?)
    }

    /// Read an object's payload, optionally asserting its type.
    pub fn read_payload(
        &self,
        oid: &ObjectId,
        expected: Option<ObjectType>,
    ) -> Result<Vec<u8>, OdbError> {
        let record = self.read_record(oid)?;
        let (obj_type, payload) = split_record(&record)?;
        if let Some(expected) = expected {
            if obj_type != expected {
                return Err(OdbError::TypeMismatch {
                    oid: *oid,
                    expected,
                    actual: obj_type,
                });
            }
        }
        Ok(payload.to_vec())
    }

    /// Read a commit, failing if the object has another type.
    pub fn read_commit(&self, oid: &ObjectId) -> Result<Commit, OdbError> {
        match self.read(oid)? {
            Object::Commit(c) => Ok(c),
            other => Err(OdbError::TypeMismatch {
                oid: *oid,
                expected: ObjectType::Commit,
                actual: other.object_type(),
            }),
        }
    }

    /// Read a tree, failing if the object has another type.
    pub fn read_tree(&self, oid: &ObjectId) -> Result<Tree, OdbError> {
        match self.read(oid)? {
            Object::Tree(t) => Ok(t),
            other => Err(OdbError::TypeMismatch {
                oid: *oid,
                expected: ObjectType::Tree,
                actual: other.object_type(),
            }),
        }
    }

    /// Read a blob's bytes, failing if the object has another type.
    pub fn read_blob(&self, oid: &ObjectId) -> Result<Vec<u8>, OdbError> {
        self.read_payload(oid, Some(ObjectType::Blob))
    }

    /// Read the raw on-disk record (`<type>\0<payload>`).
    pub fn read_record(&self, oid: &ObjectId) -> Result<Vec<u8>, OdbError> {
        let path = self.object_path(oid);
        match fs::read(&path) {
            Ok(record) => Ok(record),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(OdbError::NotFound(*oid))
            }
            Err(e) => Err(e.into()),
        }
    }
}
