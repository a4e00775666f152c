//! Repository initialization and central access for all ugit subsystems.
//!
//! A [`Repository`] ties together one working directory and its `.ugit/`
//! repository directory, exposing the object store, the ref store, and scoped
//! access to the index file. Remote operations simply open a second
//! `Repository` for the peer and pass both around — there is no process-wide
//! current-repository state.

use std::path::{Path, PathBuf};

use tracing::debug;
use ugit_hash::ObjectId;
use ugit_index::Index;
use ugit_odb::ObjectStore;
use ugit_ref::{RefName, RefStore, RefTarget};

/// Name of the repository directory inside the working directory.
pub const REPO_DIR_NAME: &str = ".ugit";

/// The branch HEAD points at right after `init`.
pub const DEFAULT_BRANCH: &str = "master";

/// Errors from repository-level operations.
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    #[error("not a ugit repository: no '{REPO_DIR_NAME}' directory in {0}")]
    NotARepository(PathBuf),

    #[error("repository already initialized at {0}")]
    AlreadyInitialized(PathBuf),

    #[error(transparent)]
    Ref(#[from] ugit_ref::RefError),

    #[error(transparent)]
    Index(#[from] ugit_index::IndexError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// One repository: a working directory plus its `.ugit/` directory.
#[derive(Debug, Clone)]
pub struct Repository {
    work_dir: PathBuf,
    ugit_dir: PathBuf,
    objects: ObjectStore,
    refs: RefStore,
}

impl Repository {
    /// Initialize a new repository under `work_dir`.
    ///
    /// Creates `.ugit/` with an empty object store and a symbolic HEAD
    /// pointing at the (unborn) default branch. Fails if the repository
    /// directory already exists.
    pub fn init(work_dir: impl AsRef<Path>) -> Result<Self, RepoError> {
        let work_dir = work_dir.as_ref().to_path_buf();
        let ugit_dir = work_dir.join(REPO_DIR_NAME);
        if ugit_dir.exists() {
            return Err(RepoError::AlreadyInitialized(ugit_dir));
        }

        std::fs::create_dir_all(ugit_dir.join("objects"))?;
        std::fs::create_dir_all(ugit_dir.join("refs").join("heads"))?;
        std::fs::create_dir_all(ugit_dir.join("refs").join("tags"))?;

        let repo = Self::from_dirs(work_dir, ugit_dir);
        let master = RefName::branch(DEFAULT_BRANCH)?;
        repo.refs()
            .update(&RefName::head(), &RefTarget::Symbolic(master), false)?;
        debug!(ugit_dir = %repo.ugit_dir.display(), "initialized repository");
        Ok(repo)
    }

    /// Open the repository whose working directory is `work_dir`.
    pub fn open(work_dir: impl AsRef<Path>) -> Result<Self, RepoError> {
        let work_dir = work_dir.as_ref().to_path_buf();
        let ugit_dir = work_dir.join(REPO_DIR_NAME);
        if !ugit_dir.is_dir() {
            return Err(RepoError::NotARepository(work_dir));
        }
        Ok(Self::from_dirs(work_dir, ugit_dir))
    }

    fn from_dirs(work_dir: PathBuf, ugit_dir: PathBuf) -> Self {
        let objects = ObjectStore::open(ugit_dir.join("objects"));
        let refs = RefStore::new(&ugit_dir);
        Self {
            work_dir,
            ugit_dir,
            objects,
            refs,
        }
    }

    // --- Path accessors ---

    /// The working directory root.
    pub fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    /// The `.ugit` repository directory.
    pub fn ugit_dir(&self) -> &Path {
        &self.ugit_dir
    }

    /// Path of the index file.
    pub fn index_path(&self) -> PathBuf {
        self.ugit_dir.join("index")
    }

    // --- Subsystem accessors ---

    /// The object store.
    pub fn objects(&self) -> &ObjectStore {
        &self.objects
    }

    /// The ref store.
    pub fn refs(&self) -> &RefStore {
        &self.refs
    }

    // --- Index scope ---

    /// Load the index read-only.
    pub fn read_index(&self) -> Result<Index, RepoError> {
        Ok(Index::load(&self.index_path())?)
    }

    /// Run `f` over a freshly loaded index and persist the result atomically.
    ///
    /// The mapping only exists inside the closure; if `f` fails, nothing is
    /// written and the on-disk index is untouched.
    pub fn edit_index<T, E>(
        &self,
        f: impl FnOnce(&mut Index) -> Result<T, E>,
    ) -> Result<T, E>
    where
        E: From<RepoError>,
    {
        let mut index = self.read_index().map_err(E::from)?;
        let out = f(&mut index)?;
        index
            .save(&self.index_path())
            .map_err(|e| E::from(RepoError::from(e)))?;
        Ok(out)
    }

    // --- HEAD convenience ---

    /// Resolve HEAD to a commit id, if the current branch has one.
    pub fn head_oid(&self) -> Result<Option<ObjectId>, RepoError> {
        Ok(self.refs.resolve_oid(&RefName::head())?)
    }

    /// The current branch's short name, or `None` for a detached HEAD.
    pub fn current_branch(&self) -> Result<Option<String>, RepoError> {
        match self.refs.read(&RefName::head())? {
            Some(RefTarget::Symbolic(target)) => Ok(target
                .branch_name()
                .map(str::to_string)
                .or_else(|| Some(target.to_string()))),
            _ => Ok(None),
        }
    }

    /// Resolve MERGE_HEAD, present only while a merge awaits its commit.
    pub fn merge_head_oid(&self) -> Result<Option<ObjectId>, RepoError> {
        Ok(self.refs.resolve_oid(&RefName::merge_head())?)
    }

    /// Is HEAD on a branch with no commits yet?
    pub fn is_unborn(&self) -> Result<bool, RepoError> {
        Ok(self.head_oid()?.is_none())
    }
}
