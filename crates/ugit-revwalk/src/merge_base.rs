use ugit_hash::ObjectId;
use ugit_repository::Repository;

use crate::walk::{ancestor_set, CommitWalk};
use crate::RevWalkError;

/// Find a common ancestor of `a` and `b` for three-way merge.
///
/// Materializes the ancestors of `a`, then walks from `b` and returns the
/// first commit already seen — the nearest common ancestor under the walk
/// order. On histories with multiple candidate ancestors this picks one of
/// them, not necessarily the unique lowest.
pub fn merge_base(
    repo: &Repository,
    a: ObjectId,
    b: ObjectId,
) -> Result<Option<ObjectId>, RevWalkError> {
    let ancestors_of_a = ancestor_set(repo, [a])?;
    for oid in CommitWalk::from_commit(repo, b) {
        let oid = oid?;
        if ancestors_of_a.contains(&oid) {
            return Ok(Some(oid));
        }
    }
    Ok(None)
}

/// Is `maybe_ancestor` reachable from `commit` (or equal to it)?
pub fn is_ancestor(
    repo: &Repository,
    commit: ObjectId,
    maybe_ancestor: ObjectId,
) -> Result<bool, RevWalkError> {
    for oid in CommitWalk::from_commit(repo, commit) {
        if oid? == maybe_ancestor {
            return Ok(true);
        }
    }
    Ok(false)
}
