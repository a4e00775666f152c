use std::collections::BTreeMap;

use tracing::debug;
use ugit_hash::ObjectId;
use ugit_object::{FlatTree, Object, ObjectType, Tree, TreeEntry};
use ugit_odb::ObjectStore;
use ugit_repository::Repository;

use crate::checkout::checkout_index;
use crate::WorktreeError;

/// One level of the nested directory structure rebuilt from the flat index.
enum Node {
    Blob(ObjectId),
    Dir(BTreeMap<String, Node>),
}

/// Freeze the current index into tree objects, bottom-up.
///
/// Returns the root tree's object id. An empty index produces the empty
/// tree.
pub fn write_tree(repo: &Repository) -> Result<ObjectId, WorktreeError> {
    let index = repo.read_index()?;

    let mut root = BTreeMap::new();
    for (path, oid) in index.iter() {
        insert_path(&mut root, path, *oid)?;
    }

    let oid = write_node(repo.objects(), &root)?;
    debug!(%oid, entries = index.len(), "wrote tree from index");
    Ok(oid)
}

fn insert_path(
    root: &mut BTreeMap<String, Node>,
    path: &str,
    oid: ObjectId,
) -> Result<(), WorktreeError> {
    let conflict = || WorktreeError::PathConflict {
        path: path.to_string(),
    };

    let mut current = root;
    let mut parts = ugit_utils::path::segments(path).peekable();
    while let Some(part) = parts.next() {
        if parts.peek().is_none() {
            if matches!(current.get(part), Some(Node::Dir(_))) {
                return Err(conflict());
            }
            current.insert(part.to_string(), Node::Blob(oid));
        } else {
            let entry = current
                .entry(part.to_string())
                .or_insert_with(|| Node::Dir(BTreeMap::new()));
            current = match entry {
                Node::Dir(children) => children,
                Node::Blob(_) => return Err(conflict()),
            };
        }
    }
    Ok(())
}

fn write_node(
    objects: &ObjectStore,
    children: &BTreeMap<String, Node>,
) -> Result<ObjectId, WorktreeError> {
    let mut entries = Vec::with_capacity(children.len());
    for (name, node) in children {
        let entry = match node {
            Node::Blob(oid) => TreeEntry::new(ObjectType::Blob, *oid, name.clone())?,
            Node::Dir(grandchildren) => {
                let oid = write_node(objects, grandchildren)?;
                TreeEntry::new(ObjectType::Tree, oid, name.clone())?
            }
        };
        entries.push(entry);
    }
    Ok(objects.write_object(&Object::Tree(Tree { entries }))?)
}

/// Expand a tree object into a flat path → blob-oid map.
pub fn flatten_tree(objects: &ObjectStore, oid: &ObjectId) -> Result<FlatTree, WorktreeError> {
    let mut result = FlatTree::new();
    flatten_into(objects, oid, String::new(), &mut result)?;
    Ok(result)
}

fn flatten_into(
    objects: &ObjectStore,
    oid: &ObjectId,
    prefix: String,
    result: &mut FlatTree,
) -> Result<(), WorktreeError> {
    let tree = objects.read_tree(oid)?;
    for entry in &tree.entries {
        let path = format!("{prefix}{}", entry.name);
        match entry.kind {
            ObjectType::Blob => {
                result.insert(path, entry.oid);
            }
            ObjectType::Tree => {
                flatten_into(objects, &entry.oid, format!("{path}/"), result)?;
            }
            ObjectType::Commit => unreachable!("rejected at parse time"),
        }
    }
    Ok(())
}

/// Replace the index with the contents of a tree, optionally materializing
/// the result onto the filesystem.
pub fn read_tree(
    repo: &Repository,
    tree_oid: &ObjectId,
    update_working: bool,
) -> Result<(), WorktreeError> {
    let flat = flatten_tree(repo.objects(), tree_oid)?;
    repo.edit_index(|index| {
        index.clear();
        index.replace(flat);
        if update_working {
            checkout_index(repo, index)?;
        }
        Ok(())
    })
}

/// Replace the index with the three-way merge of `base`, `ours`, and
/// `theirs` (tree oids), storing merged contents as new blobs. Optionally
/// materializes the merged result.
pub fn read_tree_merged(
    repo: &Repository,
    base: &ObjectId,
    ours: &ObjectId,
    theirs: &ObjectId,
    update_working: bool,
) -> Result<(), WorktreeError> {
    let t_base = flatten_tree(repo.objects(), base)?;
    let t_ours = flatten_tree(repo.objects(), ours)?;
    let t_theirs = flatten_tree(repo.objects(), theirs)?;

    let merged = ugit_merge::merge_trees(repo.objects(), &t_base, &t_ours, &t_theirs)?;

    repo.edit_index(|index| {
        index.clear();
        for (path, content) in &merged {
            let oid = repo.objects().write(ObjectType::Blob, content)?;
            index.set(path.clone(), oid);
        }
        if update_working {
            checkout_index(repo, index)?;
        }
        Ok(())
    })
}
