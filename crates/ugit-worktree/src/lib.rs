//! The working-tree bridge: scanning the working directory into blobs,
//! staging files, freezing the index into tree objects, and materializing
//! trees back onto the filesystem.

mod checkout;
mod scan;
mod tree;

pub use checkout::checkout_index;
pub use scan::{add, is_ignored, snapshot};
pub use tree::{flatten_tree, read_tree, read_tree_merged, write_tree};

/// Errors from working-tree operations.
#[derive(Debug, thiserror::Error)]
pub enum WorktreeError {
    #[error("index entry '{path}' conflicts with a staged directory of the same name")]
    PathConflict { path: String },

    #[error("cannot add '{path}': not a file or directory")]
    Unaddable { path: std::path::PathBuf },

    #[error(transparent)]
    Repo(#[from] ugit_repository::RepoError),

    #[error(transparent)]
    Odb(#[from] ugit_odb::OdbError),

    #[error(transparent)]
    Object(#[from] ugit_object::ObjectError),

    #[error(transparent)]
    Merge(#[from] ugit_merge::MergeError),

    #[error(transparent)]
    Util(#[from] ugit_utils::UtilError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
