//! Commit graph traversal against real on-disk repositories.

use ugit_hash::ObjectId;
use ugit_object::{Commit, Object, ObjectType, Tree, TreeEntry};
use ugit_ref::{RefName, RefTarget};
use ugit_repository::Repository;
use ugit_revwalk::{is_ancestor, merge_base, reachable_objects, resolve_name, CommitWalk};

fn init_repo() -> (tempfile::TempDir, Repository) {
    let dir = tempfile::tempdir().unwrap();
    let repo = Repository::init(dir.path()).unwrap();
    (dir, repo)
}

/// Record a commit whose tree holds one file with `marker` as content.
fn commit(repo: &Repository, parents: &[ObjectId], marker: &str) -> ObjectId {
    let blob = repo
        .objects()
        .write(ObjectType::Blob, marker.as_bytes())
        .unwrap();
    let entry = TreeEntry::new(ObjectType::Blob, blob, "file.txt").unwrap();
    let tree = repo
        .objects()
        .write_object(&Object::Tree(Tree {
            entries: vec![entry],
        }))
        .unwrap();
    repo.objects()
        .write_object(&Object::Commit(Commit::new(tree, parents.to_vec(), marker)))
        .unwrap()
}

fn collect(walk: CommitWalk<'_>) -> Vec<ObjectId> {
    walk.map(|r| r.unwrap()).collect()
}

#[test]
fn walk_yields_each_ancestor_once() {
    let (_dir, repo) = init_repo();
    let c1 = commit(&repo, &[], "one");
    let c2 = commit(&repo, &[c1], "two");
    let c3 = commit(&repo, &[c2], "three");

    let walked = collect(CommitWalk::from_commit(&repo, c3));
    assert_eq!(walked, vec![c3, c2, c1]);
}

#[test]
fn walk_contains_seed_and_terminates_on_diamonds() {
    let (_dir, repo) = init_repo();
    let f = commit(&repo, &[], "fork");
    let a = commit(&repo, &[f], "a");
    let b = commit(&repo, &[f], "b");
    let m = commit(&repo, &[a, b], "merge");

    let walked = collect(CommitWalk::from_commit(&repo, m));
    assert_eq!(walked.len(), 4);
    assert!(walked.contains(&m));
    assert!(walked.contains(&a));
    assert!(walked.contains(&b));
    // The shared root appears exactly once.
    assert_eq!(walked.iter().filter(|&&o| o == f).count(), 1);
}

#[test]
fn walk_follows_mainline_first() {
    let (_dir, repo) = init_repo();
    let root = commit(&repo, &[], "root");
    let a1 = commit(&repo, &[root], "a1");
    let a2 = commit(&repo, &[a1], "a2");
    let b1 = commit(&repo, &[root], "b1");
    let m = commit(&repo, &[a2, b1], "merge");

    let walked = collect(CommitWalk::from_commit(&repo, m));
    // The first-parent chain comes out before the merged-in branch.
    assert_eq!(walked[..4], [m, a2, a1, root]);
    assert_eq!(walked[4], b1);
}

#[test]
fn merge_base_of_linear_history_is_the_older_commit() {
    let (_dir, repo) = init_repo();
    let c1 = commit(&repo, &[], "one");
    let c2 = commit(&repo, &[c1], "two");
    let c3 = commit(&repo, &[c2], "three");

    assert_eq!(merge_base(&repo, c3, c1).unwrap(), Some(c1));
    assert_eq!(merge_base(&repo, c1, c3).unwrap(), Some(c1));
    assert_eq!(merge_base(&repo, c3, c3).unwrap(), Some(c3));
}

#[test]
fn merge_base_of_diamond_is_the_fork_point() {
    let (_dir, repo) = init_repo();
    let f = commit(&repo, &[], "fork");
    let a = commit(&repo, &[f], "a");
    let b = commit(&repo, &[f], "b");

    assert_eq!(merge_base(&repo, a, b).unwrap(), Some(f));
    assert_eq!(merge_base(&repo, b, a).unwrap(), Some(f));
}

#[test]
fn merge_base_of_unrelated_roots_is_none() {
    let (_dir, repo) = init_repo();
    let a = commit(&repo, &[], "island a");
    let b = commit(&repo, &[], "island b");

    assert_eq!(merge_base(&repo, a, b).unwrap(), None);
}

#[test]
fn ancestor_checks() {
    let (_dir, repo) = init_repo();
    let c1 = commit(&repo, &[], "one");
    let c2 = commit(&repo, &[c1], "two");

    assert!(is_ancestor(&repo, c2, c1).unwrap());
    assert!(is_ancestor(&repo, c2, c2).unwrap());
    assert!(!is_ancestor(&repo, c1, c2).unwrap());
}

#[test]
fn reachable_objects_cover_commits_trees_and_blobs() {
    let (_dir, repo) = init_repo();
    let c1 = commit(&repo, &[], "one");
    let c2 = commit(&repo, &[c1], "two");

    let objects = reachable_objects(&repo, [c2]).unwrap();
    // Two commits, two distinct trees, two distinct blobs.
    assert_eq!(objects.len(), 6);
    let unique: std::collections::HashSet<_> = objects.iter().collect();
    assert_eq!(unique.len(), objects.len());
    assert!(objects.contains(&c1));
    assert!(objects.contains(&c2));
}

#[test]
fn reachable_objects_share_common_subtrees() {
    let (_dir, repo) = init_repo();
    let c1 = commit(&repo, &[], "same");
    // Identical tree content on the child: tree and blob are shared.
    let c2 = commit(&repo, &[c1], "same");

    let objects = reachable_objects(&repo, [c2]).unwrap();
    // Two commits, one shared tree, one shared blob.
    assert_eq!(objects.len(), 4);
}

#[test]
fn resolve_order_prefers_tags_over_branches() {
    let (_dir, repo) = init_repo();
    let branch_target = commit(&repo, &[], "branch target");
    let tag_target = commit(&repo, &[], "tag target");

    repo.refs()
        .update(
            &RefName::branch("feat").unwrap(),
            &RefTarget::Direct(branch_target),
            true,
        )
        .unwrap();
    repo.refs()
        .update(
            &RefName::tag("feat").unwrap(),
            &RefTarget::Direct(tag_target),
            true,
        )
        .unwrap();

    assert_eq!(resolve_name(&repo, "feat").unwrap(), tag_target);
    assert_eq!(resolve_name(&repo, "tags/feat").unwrap(), tag_target);
    assert_eq!(resolve_name(&repo, "heads/feat").unwrap(), branch_target);
    assert_eq!(
        resolve_name(&repo, "refs/heads/feat").unwrap(),
        branch_target
    );
}

#[test]
fn resolve_head_alias_and_literal_oids() {
    let (_dir, repo) = init_repo();
    let c1 = commit(&repo, &[], "one");
    repo.refs()
        .update(&RefName::head(), &RefTarget::Direct(c1), true)
        .unwrap();

    assert_eq!(resolve_name(&repo, "@").unwrap(), c1);
    assert_eq!(resolve_name(&repo, "HEAD").unwrap(), c1);
    assert_eq!(resolve_name(&repo, &c1.to_hex()).unwrap(), c1);
}

#[test]
fn resolve_rejects_unknown_names() {
    let (_dir, repo) = init_repo();
    assert!(matches!(
        resolve_name(&repo, "no-such-thing"),
        Err(ugit_revwalk::RevWalkError::UnknownName(_))
    ));
    // 39 hex digits is not an oid.
    assert!(resolve_name(&repo, &"a".repeat(39)).is_err());
}
