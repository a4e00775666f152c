//! Line diffing and tree comparison.
//!
//! Provides the edit-script algorithm shared by diff rendering and the
//! three-way merge, pairwise comparison of flat tree snapshots, and the
//! text rendering used by the `diff` and `show` commands.

pub mod algorithm;
mod format;
mod tree;

pub use algorithm::{diff_lines, split_lines, Edit, EditOp};
pub use format::{render_blob_diff, render_tree_diff};
pub use tree::changed_paths;

/// Errors from diff operations.
#[derive(Debug, thiserror::Error)]
pub enum DiffError {
    #[error(transparent)]
    Odb(#[from] ugit_odb::OdbError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
