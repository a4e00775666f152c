//! Synchronization with a peer repository addressed by filesystem path.
//!
//! A remote is just another repository directory. Both fetch and push bound
//! the transfer by reachability: only objects missing on the receiving side
//! are copied, and object copies are idempotent, so an interrupted sync can
//! simply be re-run.

mod fetch;
mod push;

pub use fetch::{fetch, FetchSummary};
pub use push::{push, PushSummary};

/// Errors from remote synchronization.
#[derive(Debug, thiserror::Error)]
pub enum RemoteError {
    #[error("unknown local ref '{0}'")]
    MissingLocalRef(String),

    #[error("push of '{refname}' rejected: remote branch is not an ancestor of the pushed commit")]
    NotFastForward { refname: String },

    #[error(transparent)]
    Repo(#[from] ugit_repository::RepoError),

    #[error(transparent)]
    RevWalk(#[from] ugit_revwalk::RevWalkError),

    #[error(transparent)]
    Ref(#[from] ugit_ref::RefError),

    #[error(transparent)]
    Odb(#[from] ugit_odb::OdbError),
}
