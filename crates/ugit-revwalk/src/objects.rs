use std::collections::HashSet;

use tracing::debug;
use ugit_hash::ObjectId;
use ugit_object::ObjectType;
use ugit_repository::Repository;

use crate::walk::CommitWalk;
use crate::RevWalkError;

/// Enumerate every object reachable from the given commits, without repeats:
/// the commits themselves, their trees, every subtree, and every blob.
///
/// This closure is what bounds object transfer during fetch and push.
pub fn reachable_objects(
    repo: &Repository,
    seeds: impl IntoIterator<Item = ObjectId>,
) -> Result<Vec<ObjectId>, RevWalkError> {
    let mut result = Vec::new();
    let mut seen: HashSet<ObjectId> = HashSet::new();

    for commit_oid in CommitWalk::new(repo, seeds) {
        let commit_oid = commit_oid?;
        seen.insert(commit_oid);
        result.push(commit_oid);

        let commit = repo.objects().read_commit(&commit_oid)?;
        collect_tree(repo, commit.tree, &mut seen, &mut result)?;
    }

    debug!(count = result.len(), "enumerated reachable objects");
    Ok(result)
}

/// Depth-first walk of one tree, pushing unseen trees and blobs.
fn collect_tree(
    repo: &Repository,
    root: ObjectId,
    seen: &mut HashSet<ObjectId>,
    result: &mut Vec<ObjectId>,
) -> Result<(), RevWalkError> {
    if !seen.insert(root) {
        return Ok(());
    }
    result.push(root);

    let mut stack = vec![root];
    while let Some(tree_oid) = stack.pop() {
        let tree = repo.objects().read_tree(&tree_oid)?;
        for entry in &tree.entries {
            if !seen.insert(entry.oid) {
                continue;
            }
            result.push(entry.oid);
            if entry.kind == ObjectType::Tree {
                stack.push(entry.oid);
            }
        }
    }
    Ok(())
}
