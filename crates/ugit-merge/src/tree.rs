use std::collections::BTreeMap;

use tracing::debug;
use ugit_hash::ObjectId;
use ugit_object::{FlatTree, ObjectType};
use ugit_odb::ObjectStore;

use crate::content::merge_content;
use crate::MergeError;

/// Merge two snapshots against their common base.
///
/// For every path present anywhere: agreement keeps the shared version, a
/// change on one side wins over an untouched other side (including clean
/// deletions), and divergent changes go through the per-file content merge
/// with an absent side treated as empty. The result maps each surviving path
/// to its merged bytes.
pub fn merge_trees(
    objects: &ObjectStore,
    base: &FlatTree,
    ours: &FlatTree,
    theirs: &FlatTree,
) -> Result<BTreeMap<String, Vec<u8>>, MergeError> {
    let mut result = BTreeMap::new();

    for path in all_paths(base, ours, theirs) {
        let b = base.get(&path).copied();
        let h = ours.get(&path).copied();
        let o = theirs.get(&path).copied();

        let winner = if h == o {
            h
        } else if o == b {
            h
        } else if h == b {
            o
        } else {
            // Divergent change: line-level merge, reading each present side.
            debug!(path = %path, "content-merging divergent path");
            let merged = merge_content(
                &read_or_empty(objects, b)?,
                &read_or_empty(objects, h)?,
                &read_or_empty(objects, o)?,
            );
            result.insert(path, merged);
            continue;
        };

        if let Some(oid) = winner {
            result.insert(path, objects.read_payload(&oid, Some(ObjectType::Blob))?);
        }
    }

    Ok(result)
}

fn all_paths(base: &FlatTree, ours: &FlatTree, theirs: &FlatTree) -> Vec<String> {
    let mut paths: Vec<&String> = base
        .keys()
        .chain(ours.keys())
        .chain(theirs.keys())
        .collect();
    paths.sort();
    paths.dedup();
    paths.into_iter().cloned().collect()
}

fn read_or_empty(objects: &ObjectStore, oid: Option<ObjectId>) -> Result<Vec<u8>, MergeError> {
    match oid {
        Some(oid) => Ok(objects.read_payload(&oid, Some(ObjectType::Blob))?),
        None => Ok(Vec::new()),
    }
}
