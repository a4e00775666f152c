use std::collections::{HashSet, VecDeque};

use ugit_hash::ObjectId;
use ugit_repository::Repository;

use crate::RevWalkError;

/// Lazy walk over a commit and all its ancestors.
///
/// Each commit is yielded exactly once. The first parent of each commit is
/// enqueued at the front and the remaining parents at the back, so the walk
/// follows the mainline chain depth-first and picks up merge side-branches
/// afterwards. The order is not a topological sort.
pub struct CommitWalk<'a> {
    repo: &'a Repository,
    queue: VecDeque<ObjectId>,
    visited: HashSet<ObjectId>,
}

impl<'a> CommitWalk<'a> {
    /// Start a walk from the given seed commits.
    pub fn new(repo: &'a Repository, seeds: impl IntoIterator<Item = ObjectId>) -> Self {
        Self {
            repo,
            queue: seeds.into_iter().collect(),
            visited: HashSet::new(),
        }
    }

    /// Walk from a single commit.
    pub fn from_commit(repo: &'a Repository, oid: ObjectId) -> Self {
        Self::new(repo, [oid])
    }

    fn step(&mut self) -> Result<Option<ObjectId>, RevWalkError> {
        while let Some(oid) = self.queue.pop_front() {
            if !self.visited.insert(oid) {
                continue;
            }
            let commit = self.repo.objects().read_commit(&oid)?;
            let mut parents = commit.parents.into_iter();
            if let Some(first) = parents.next() {
                self.queue.push_front(first);
            }
            for parent in parents {
                self.queue.push_back(parent);
            }
            return Ok(Some(oid));
        }
        Ok(None)
    }
}

impl Iterator for CommitWalk<'_> {
    type Item = Result<ObjectId, RevWalkError>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.step() {
            Ok(Some(oid)) => Some(Ok(oid)),
            Ok(None) => None,
            Err(e) => Some(Err(e)),
        }
    }
}

/// Materialize the full ancestor set of the seeds (including the seeds).
pub(crate) fn ancestor_set(
    repo: &Repository,
    seeds: impl IntoIterator<Item = ObjectId>,
) -> Result<HashSet<ObjectId>, RevWalkError> {
    CommitWalk::new(repo, seeds).collect()
}
