use std::io::Write;

use tracing::debug;
use ugit_hash::{Hasher, ObjectId};
use ugit_object::{build_record, Object, ObjectType};

use crate::{ObjectStore, OdbError};

impl ObjectStore {
    /// Store a payload with the given type. Returns the object id.
    ///
    /// No-op if the object already exists. The file lands via a temp file and
    /// an atomic rename, so readers never observe a partial record.
    pub fn write(&self, obj_type: ObjectType, payload: &[u8]) -> Result<ObjectId, OdbError> {
        let record = build_record(obj_type, payload);
        let oid = Hasher::digest(&record);
        if self.contains(&oid) {
            return Ok(oid);
        }
        self.write_record(&oid, &record)?;
        debug!(%oid, %obj_type, size = payload.len(), "stored object");
        Ok(oid)
    }

    /// Store a parsed object. Returns the object id.
    pub fn write_object(&self, obj: &Object) -> Result<ObjectId, OdbError> {
        self.write(obj.object_type(), &obj.serialize_payload())
    }

    /// Write a raw record under a known object id.
    ///
    /// The record must hash to `oid`; a mismatch means the source bytes are
    /// corrupt and nothing is written.
    pub(crate) fn write_record(&self, oid: &ObjectId, record: &[u8]) -> Result<(), OdbError> {
        let actual = Hasher::digest(record);
        if actual != *oid {
            return Err(OdbError::HashMismatch {
                path: self.object_path(oid),
                expected: *oid,
                actual,
            });
        }

        std::fs::create_dir_all(&self.objects_dir)?;
        let mut tmp = tempfile::NamedTempFile::new_in(&self.objects_dir)?;
        tmp.write_all(record)?;
        tmp.persist(self.object_path(oid)).map_err(|e| e.error)?;
        Ok(())
    }
}
