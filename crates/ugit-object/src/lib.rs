//! Object model for ugit: blob, tree, and commit parsing and serialization.
//!
//! An object on disk is a tagged byte record `<type>\0<payload>`, addressed
//! by the SHA-1 of the whole record. This crate provides Rust types for the
//! three object types, their canonical serialization, and the record codec.

mod blob;
mod commit;
mod tree;

pub use blob::Blob;
pub use commit::Commit;
pub use tree::{FlatTree, Tree, TreeEntry};

use bstr::BString;
use ugit_hash::{Hasher, ObjectId};

/// Errors produced by object parsing and serialization.
#[derive(Debug, thiserror::Error)]
pub enum ObjectError {
    #[error("invalid object type: {0}")]
    InvalidType(BString),

    #[error("missing type separator in object record")]
    MissingSeparator,

    #[error("invalid tree entry on line {line}: {reason}")]
    InvalidTreeEntry { line: usize, reason: String },

    #[error("invalid commit header: {0}")]
    InvalidCommitHeader(String),

    #[error("invalid commit: missing 'tree' header")]
    MissingTree,

    #[error("non-UTF-8 payload in {kind} object")]
    NonUtf8Payload { kind: ObjectType },

    #[error(transparent)]
    Hash(#[from] ugit_hash::HashError),
}

/// The three types of objects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectType {
    Blob,
    Tree,
    Commit,
}

impl ObjectType {
    /// Parse from the tag bytes at the front of an object record.
    pub fn from_bytes(s: &[u8]) -> Result<Self, ObjectError> {
        match s {
            b"blob" => Ok(Self::Blob),
            b"tree" => Ok(Self::Tree),
            b"commit" => Ok(Self::Commit),
            _ => Err(ObjectError::InvalidType(BString::from(s))),
        }
    }

    /// The canonical tag string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Blob => "blob",
            Self::Tree => "tree",
            Self::Commit => "commit",
        }
    }
}

impl std::fmt::Display for ObjectType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ObjectType {
    type Err = ObjectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_bytes(s.as_bytes())
    }
}

/// A parsed object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Object {
    Blob(Blob),
    Tree(Tree),
    Commit(Commit),
}

impl Object {
    /// Parse a full on-disk record (`<type>\0<payload>`).
    pub fn parse(record: &[u8]) -> Result<Self, ObjectError> {
        let (obj_type, payload) = split_record(record)?;
        Self::parse_payload(obj_type, payload)
    }

    /// Parse a payload with a known type.
    pub fn parse_payload(obj_type: ObjectType, payload: &[u8]) -> Result<Self, ObjectError> {
        match obj_type {
            ObjectType::Blob => Ok(Self::Blob(Blob::new(payload))),
            ObjectType::Tree => Ok(Self::Tree(Tree::parse(payload)?)),
            ObjectType::Commit => Ok(Self::Commit(Commit::parse(payload)?)),
        }
    }

    /// Serialize to the on-disk record form (`<type>\0<payload>`).
    pub fn serialize(&self) -> Vec<u8> {
        let payload = self.serialize_payload();
        let mut out = Vec::with_capacity(self.object_type().as_str().len() + 1 + payload.len());
        out.extend_from_slice(self.object_type().as_str().as_bytes());
        out.push(0);
        out.extend_from_slice(&payload);
        out
    }

    /// Serialize just the payload (no type tag).
    pub fn serialize_payload(&self) -> Vec<u8> {
        match self {
            Self::Blob(b) => b.data.to_vec(),
            Self::Tree(t) => t.serialize_payload(),
            Self::Commit(c) => c.serialize_payload(),
        }
    }

    /// The object's type tag.
    pub fn object_type(&self) -> ObjectType {
        match self {
            Self::Blob(_) => ObjectType::Blob,
            Self::Tree(_) => ObjectType::Tree,
            Self::Commit(_) => ObjectType::Commit,
        }
    }

    /// Compute the object id by hashing the serialized record.
    pub fn compute_oid(&self) -> ObjectId {
        Hasher::digest(&self.serialize())
    }
}

/// Split an on-disk record at the first NUL into its type tag and payload.
pub fn split_record(record: &[u8]) -> Result<(ObjectType, &[u8]), ObjectError> {
    let nul = record
        .iter()
        .position(|&b| b == 0)
        .ok_or(ObjectError::MissingSeparator)?;
    let obj_type = ObjectType::from_bytes(&record[..nul])?;
    Ok((obj_type, &record[nul + 1..]))
}

/// Build the on-disk record for a raw payload with the given type.
pub fn build_record(obj_type: ObjectType, payload: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(obj_type.as_str().len() + 1 + payload.len());
    out.extend_from_slice(obj_type.as_str().as_bytes());
    out.push(0);
    out.extend_from_slice(payload);
    out
}
