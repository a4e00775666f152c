//! Commit-graph traversal for ugit.
//!
//! Provides the lazy ancestry walk used by `log` and reachability queries,
//! merge-base computation, enumeration of every object reachable from a set
//! of commits (the transfer bound for fetch/push), and revision name
//! resolution.

mod merge_base;
mod objects;
mod resolve;
mod walk;

pub use merge_base::{is_ancestor, merge_base};
pub use objects::reachable_objects;
pub use resolve::resolve_name;
pub use walk::CommitWalk;

use ugit_hash::ObjectId;

/// Errors produced by revision walking operations.
#[derive(Debug, thiserror::Error)]
pub enum RevWalkError {
    #[error("unknown revision '{0}'")]
    UnknownName(String),

    #[error("object is not a commit: {0}")]
    NotACommit(ObjectId),

    #[error(transparent)]
    Odb(#[from] ugit_odb::OdbError),

    #[error(transparent)]
    Ref(#[from] ugit_ref::RefError),

    #[error(transparent)]
    Repo(#[from] ugit_repository::RepoError),
}
