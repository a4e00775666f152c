//! Three-way merge over tree snapshots.
//!
//! [`merge_trees`] combines two flat snapshots against their common base into
//! a map of merged file contents; [`merge_content`] is the per-file
//! line-level merge underneath it.

mod content;
mod tree;

pub use content::merge_content;
pub use tree::merge_trees;

/// Errors from merge operations.
#[derive(Debug, thiserror::Error)]
pub enum MergeError {
    #[error(transparent)]
    Odb(#[from] ugit_odb::OdbError),
}
