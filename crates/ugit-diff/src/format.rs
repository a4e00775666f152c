//! Text rendering for the `diff` and `show` commands.
//!
//! The output is a compact unified-style listing: a header per changed path,
//! then `@@` hunks of `-`/`+` lines. The exact bytes are not a stable
//! interface.

use bstr::ByteSlice;
use ugit_hash::ObjectId;
use ugit_object::{FlatTree, ObjectType};
use ugit_odb::ObjectStore;

use crate::algorithm::{diff_slices, split_lines, Edit, EditOp};
use crate::tree::changed_paths;
use crate::DiffError;

/// Render the differences between two flat snapshots.
pub fn render_tree_diff(
    objects: &ObjectStore,
    from: &FlatTree,
    to: &FlatTree,
) -> Result<String, DiffError> {
    let mut out = String::new();
    for (path, from_oid, to_oid) in changed_paths(from, to) {
        let header = match (from_oid, to_oid) {
            (None, Some(_)) => "new file",
            (Some(_), None) => "deleted",
            _ => "changed",
        };
        out.push_str(&format!("{header}: {path}\n"));
        out.push_str(&render_blob_diff(objects, from_oid, to_oid)?);
    }
    Ok(out)
}

/// Render the line diff between two blobs (either may be absent).
pub fn render_blob_diff(
    objects: &ObjectStore,
    from: Option<ObjectId>,
    to: Option<ObjectId>,
) -> Result<String, DiffError> {
    let from_bytes = read_blob_or_empty(objects, from)?;
    let to_bytes = read_blob_or_empty(objects, to)?;

    let old_lines = split_lines(&from_bytes);
    let new_lines = split_lines(&to_bytes);
    let edits = diff_slices(&old_lines, &new_lines);

    let mut out = String::new();
    for hunk in change_hunks(&edits) {
        let (old_start, old_len, new_start, new_len) = hunk_extent(&edits[hunk.clone()]);
        out.push_str(&format!(
            "@@ -{},{} +{},{} @@\n",
            old_start + 1,
            old_len,
            new_start + 1,
            new_len
        ));
        for edit in &edits[hunk] {
            match edit.op {
                EditOp::Delete => {
                    out.push('-');
                    out.push_str(&old_lines[edit.old_index].to_str_lossy());
                    out.push('\n');
                }
                EditOp::Insert => {
                    out.push('+');
                    out.push_str(&new_lines[edit.new_index].to_str_lossy());
                    out.push('\n');
                }
                EditOp::Equal => {}
            }
        }
    }
    Ok(out)
}

fn read_blob_or_empty(
    objects: &ObjectStore,
    oid: Option<ObjectId>,
) -> Result<Vec<u8>, DiffError> {
    match oid {
        Some(oid) => Ok(objects.read_payload(&oid, Some(ObjectType::Blob))?),
        None => Ok(Vec::new()),
    }
}

/// Ranges of consecutive non-equal edits.
fn change_hunks(edits: &[Edit]) -> Vec<std::ops::Range<usize>> {
    let mut hunks = Vec::new();
    let mut i = 0;
    while i < edits.len() {
        if edits[i].op == EditOp::Equal {
            i += 1;
            continue;
        }
        let start = i;
        while i < edits.len() && edits[i].op != EditOp::Equal {
            i += 1;
        }
        hunks.push(start..i);
    }
    hunks
}

fn hunk_extent(edits: &[Edit]) -> (usize, usize, usize, usize) {
    let old_start = edits[0].old_index;
    let new_start = edits[0].new_index;
    let old_len = edits.iter().filter(|e| e.op == EditOp::Delete).count();
    let new_len = edits.iter().filter(|e| e.op == EditOp::Insert).count();
    (old_start, old_len, new_start, new_len)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> (tempfile::TempDir, ObjectStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = ObjectStore::open(dir.path().join("objects"));
        (dir, store)
    }

    #[test]
    fn changed_file_shows_both_sides() {
        let (_dir, objects) = store();
        let from = objects.write(ObjectType::Blob, b"hi\nold\n").unwrap();
        let to = objects.write(ObjectType::Blob, b"hi\nnew\n").unwrap();

        let from_tree: FlatTree = [("a.txt".to_string(), from)].into_iter().collect();
        let to_tree: FlatTree = [("a.txt".to_string(), to)].into_iter().collect();

        let text = render_tree_diff(&objects, &from_tree, &to_tree).unwrap();
        assert!(text.starts_with("changed: a.txt\n"), "{text}");
        assert!(text.contains("-old\n"), "{text}");
        assert!(text.contains("+new\n"), "{text}");
    }

    #[test]
    fn added_and_deleted_files_are_labelled() {
        let (_dir, objects) = store();
        let blob = objects.write(ObjectType::Blob, b"data\n").unwrap();

        let empty = FlatTree::new();
        let tree: FlatTree = [("f".to_string(), blob)].into_iter().collect();

        let added = render_tree_diff(&objects, &empty, &tree).unwrap();
        assert!(added.starts_with("new file: f\n"), "{added}");
        assert!(added.contains("+data\n"), "{added}");

        let deleted = render_tree_diff(&objects, &tree, &empty).unwrap();
        assert!(deleted.starts_with("deleted: f\n"), "{deleted}");
        assert!(deleted.contains("-data\n"), "{deleted}");
    }

    #[test]
    fn identical_trees_render_nothing() {
        let (_dir, objects) = store();
        let blob = objects.write(ObjectType::Blob, b"data\n").unwrap();
        let tree: FlatTree = [("f".to_string(), blob)].into_iter().collect();

        let text = render_tree_diff(&objects, &tree, &tree).unwrap();
        assert!(text.is_empty());
    }
}
