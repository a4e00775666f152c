//! Reference system for ugit.
//!
//! A ref is a named pointer stored as a small text file under the repository
//! directory: either a 40-hex object id (direct) or `ref: <name>` (symbolic).
//! `HEAD` and `MERGE_HEAD` live at the top level; branches, tags, and
//! remote-tracking snapshots live under `refs/heads/`, `refs/tags/`, and
//! `refs/remote/`.

mod name;
mod store;

pub use name::RefName;
pub use store::RefStore;

use ugit_hash::ObjectId;

/// Errors produced by ref operations.
#[derive(Debug, thiserror::Error)]
pub enum RefError {
    #[error("invalid ref name '{name}': {reason}")]
    InvalidName { name: String, reason: String },

    #[error("malformed ref file '{name}': {reason}")]
    Malformed { name: String, reason: String },

    #[error("symbolic ref chain starting at '{0}' is too deep")]
    DerefTooDeep(String),

    #[error(transparent)]
    Hash(#[from] ugit_hash::HashError),

    #[error(transparent)]
    Util(#[from] ugit_utils::UtilError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// The content of a ref file: a direct object id or a pointer to another ref.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefTarget {
    Direct(ObjectId),
    Symbolic(RefName),
}

impl RefTarget {
    /// Is this a symbolic ref?
    pub fn is_symbolic(&self) -> bool {
        matches!(self, RefTarget::Symbolic(_))
    }

    /// The object id, if direct.
    pub fn oid(&self) -> Option<ObjectId> {
        match self {
            RefTarget::Direct(oid) => Some(*oid),
            RefTarget::Symbolic(_) => None,
        }
    }

    /// The target ref name, if symbolic.
    pub fn symbolic_target(&self) -> Option<&RefName> {
        match self {
            RefTarget::Symbolic(name) => Some(name),
            RefTarget::Direct(_) => None,
        }
    }
}
