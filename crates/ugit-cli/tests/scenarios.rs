//! End-to-end scenarios driven through the `ugit` binary.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use ugit_hash::Hasher;
use ugit_object::ObjectType;
use ugit_ref::RefName;
use ugit_repository::Repository;

fn ugit(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("ugit").unwrap();
    cmd.current_dir(dir);
    cmd
}

/// Run a command expected to succeed, returning its stdout.
fn run(dir: &Path, args: &[&str]) -> String {
    let output = ugit(dir).args(args).assert().success();
    String::from_utf8(output.get_output().stdout.clone()).unwrap()
}

fn init_and_first_commit(dir: &Path) -> String {
    run(dir, &["init"]);
    fs::write(dir.join("a.txt"), "hi\n").unwrap();
    run(dir, &["add", "a.txt"]);
    run(dir, &["commit", "-m", "x"]).trim().to_string()
}

#[test]
fn init_commit_updates_master_and_builds_the_expected_tree() {
    let dir = tempfile::tempdir().unwrap();
    let commit_oid = init_and_first_commit(dir.path());

    let repo = Repository::open(dir.path()).unwrap();
    let master = repo
        .refs()
        .resolve_oid(&RefName::branch("master").unwrap())
        .unwrap()
        .unwrap();
    assert_eq!(master.to_hex(), commit_oid);

    // The commit's tree holds exactly one blob entry for a.txt, keyed by the
    // content hash of its record.
    let commit = repo.objects().read_commit(&master).unwrap();
    let tree = repo.objects().read_tree(&commit.tree).unwrap();
    assert_eq!(tree.entries.len(), 1);
    let entry = &tree.entries[0];
    assert_eq!(entry.name, "a.txt");
    assert_eq!(entry.kind, ObjectType::Blob);
    assert_eq!(entry.oid, Hasher::digest(b"blob\0hi\n"));
}

#[test]
fn identical_histories_produce_identical_commit_oids() {
    let dir_a = tempfile::tempdir().unwrap();
    let dir_b = tempfile::tempdir().unwrap();

    let oid_a = init_and_first_commit(dir_a.path());
    let oid_b = init_and_first_commit(dir_b.path());
    assert_eq!(oid_a, oid_b);
}

#[test]
fn fast_forward_merge_advances_head_without_merge_state() {
    let dir = tempfile::tempdir().unwrap();
    init_and_first_commit(dir.path());

    run(dir.path(), &["branch", "topic"]);
    run(dir.path(), &["checkout", "topic"]);
    fs::write(dir.path().join("b.txt"), "hey\n").unwrap();
    run(dir.path(), &["add", "b.txt"]);
    let topic_commit = run(dir.path(), &["commit", "-m", "y"]).trim().to_string();

    run(dir.path(), &["checkout", "master"]);
    assert!(!dir.path().join("b.txt").exists());

    let merge_out = run(dir.path(), &["merge", "topic"]);
    assert!(merge_out.contains("Fast-forward"), "{merge_out}");

    let repo = Repository::open(dir.path()).unwrap();
    assert_eq!(repo.head_oid().unwrap().unwrap().to_hex(), topic_commit);
    assert_eq!(repo.merge_head_oid().unwrap(), None);
    assert_eq!(
        fs::read_to_string(dir.path().join("b.txt")).unwrap(),
        "hey\n"
    );
}

#[test]
fn three_way_merge_records_two_parents_and_clears_merge_head() {
    let dir = tempfile::tempdir().unwrap();
    init_and_first_commit(dir.path());

    run(dir.path(), &["branch", "a"]);
    run(dir.path(), &["branch", "b"]);

    run(dir.path(), &["checkout", "a"]);
    fs::write(dir.path().join("a.txt"), "hi\nA\n").unwrap();
    run(dir.path(), &["add", "a.txt"]);
    let commit_a = run(dir.path(), &["commit", "-m", "side a"])
        .trim()
        .to_string();

    run(dir.path(), &["checkout", "b"]);
    fs::write(dir.path().join("a.txt"), "hi\nB\n").unwrap();
    run(dir.path(), &["add", "a.txt"]);
    let commit_b = run(dir.path(), &["commit", "-m", "side b"])
        .trim()
        .to_string();

    run(dir.path(), &["checkout", "a"]);
    let merge_out = run(dir.path(), &["merge", "b"]);
    assert!(merge_out.contains("Please commit"), "{merge_out}");

    // MERGE_HEAD points at b's commit and the merged file carries both edits.
    let repo = Repository::open(dir.path()).unwrap();
    assert_eq!(
        repo.merge_head_oid().unwrap().unwrap().to_hex(),
        commit_b
    );
    let merged = fs::read_to_string(dir.path().join("a.txt")).unwrap();
    assert!(merged.starts_with("hi\n"), "{merged}");
    assert!(merged.contains("A\n"), "{merged}");
    assert!(merged.contains("B\n"), "{merged}");

    let merge_commit = run(dir.path(), &["commit", "-m", "m"]).trim().to_string();
    let repo = Repository::open(dir.path()).unwrap();
    let merge_oid: ugit_hash::ObjectId = merge_commit.parse().unwrap();
    let commit = repo.objects().read_commit(&merge_oid).unwrap();
    let parents: Vec<String> = commit.parents.iter().map(|p| p.to_hex()).collect();
    assert_eq!(parents, vec![commit_a, commit_b]);
    assert_eq!(repo.merge_head_oid().unwrap(), None);
}

#[test]
fn checkout_by_oid_detaches_head() {
    let dir = tempfile::tempdir().unwrap();
    let first = init_and_first_commit(dir.path());

    fs::write(dir.path().join("a.txt"), "more\n").unwrap();
    run(dir.path(), &["add", "a.txt"]);
    run(dir.path(), &["commit", "-m", "second"]);

    run(dir.path(), &["checkout", &first]);
    assert_eq!(
        fs::read_to_string(dir.path().join("a.txt")).unwrap(),
        "hi\n"
    );

    let status = run(dir.path(), &["status"]);
    assert!(status.contains("HEAD detached at"), "{status}");
}

#[test]
fn status_reports_branch_and_pending_changes() {
    let dir = tempfile::tempdir().unwrap();
    run(dir.path(), &["init"]);

    let status = run(dir.path(), &["status"]);
    assert!(status.contains("On branch master"), "{status}");

    fs::write(dir.path().join("a.txt"), "hi\n").unwrap();
    run(dir.path(), &["add", "a.txt"]);
    let status = run(dir.path(), &["status"]);
    assert!(status.contains("Changes to be committed"), "{status}");
    assert!(status.contains("new file: a.txt"), "{status}");

    run(dir.path(), &["commit", "-m", "x"]);
    fs::write(dir.path().join("a.txt"), "edited\n").unwrap();
    let status = run(dir.path(), &["status"]);
    assert!(status.contains("Changes not staged for commit"), "{status}");
    assert!(status.contains("modified: a.txt"), "{status}");
}

#[test]
fn log_is_empty_on_a_fresh_repository() {
    let dir = tempfile::tempdir().unwrap();
    run(dir.path(), &["init"]);
    assert_eq!(run(dir.path(), &["log"]), "");
}

#[test]
fn log_walks_history_with_decorations() {
    let dir = tempfile::tempdir().unwrap();
    let first = init_and_first_commit(dir.path());
    fs::write(dir.path().join("a.txt"), "two\n").unwrap();
    run(dir.path(), &["add", "a.txt"]);
    let second = run(dir.path(), &["commit", "-m", "second"]).trim().to_string();

    let log = run(dir.path(), &["log"]);
    assert!(log.contains(&first), "{log}");
    assert!(log.contains(&second), "{log}");
    assert!(log.contains("refs/heads/master"), "{log}");
    let first_pos = log.find(&first).unwrap();
    let second_pos = log.find(&second).unwrap();
    assert!(second_pos < first_pos, "newest first: {log}");
}

#[test]
fn diff_shows_unstaged_edits() {
    let dir = tempfile::tempdir().unwrap();
    init_and_first_commit(dir.path());

    fs::write(dir.path().join("a.txt"), "hi\nextra\n").unwrap();
    let diff = run(dir.path(), &["diff"]);
    assert!(diff.contains("changed: a.txt"), "{diff}");
    assert!(diff.contains("+extra"), "{diff}");

    // Nothing staged yet, so the cached diff is quiet.
    let cached = run(dir.path(), &["diff", "--cached"]);
    assert_eq!(cached, "");

    run(dir.path(), &["add", "a.txt"]);
    let cached = run(dir.path(), &["diff", "--cached"]);
    assert!(cached.contains("changed: a.txt"), "{cached}");
}

#[test]
fn cat_file_prints_raw_blob_payload() {
    let dir = tempfile::tempdir().unwrap();
    run(dir.path(), &["init"]);
    fs::write(dir.path().join("a.txt"), "payload bytes\n").unwrap();
    let oid = run(dir.path(), &["hash-object", "a.txt"]).trim().to_string();

    let out = run(dir.path(), &["cat-file", &oid]);
    assert_eq!(out, "payload bytes\n");
}

#[test]
fn write_tree_and_read_tree_roundtrip_the_index() {
    let dir = tempfile::tempdir().unwrap();
    init_and_first_commit(dir.path());

    let tree = run(dir.path(), &["write-tree"]).trim().to_string();
    fs::write(dir.path().join("b.txt"), "more\n").unwrap();
    run(dir.path(), &["add", "b.txt"]);

    run(dir.path(), &["read-tree", &tree]);
    let repo = Repository::open(dir.path()).unwrap();
    let index = repo.read_index().unwrap();
    assert_eq!(index.len(), 1);
    assert!(index.get("a.txt").is_some());
}

#[test]
fn merge_base_prints_the_fork_point() {
    let dir = tempfile::tempdir().unwrap();
    let fork = init_and_first_commit(dir.path());

    run(dir.path(), &["branch", "side"]);
    fs::write(dir.path().join("a.txt"), "master line\n").unwrap();
    run(dir.path(), &["add", "a.txt"]);
    run(dir.path(), &["commit", "-m", "on master"]);

    run(dir.path(), &["checkout", "side"]);
    fs::write(dir.path().join("b.txt"), "side line\n").unwrap();
    run(dir.path(), &["add", "b.txt"]);
    run(dir.path(), &["commit", "-m", "on side"]);

    let base = run(dir.path(), &["merge-base", "master", "side"])
        .trim()
        .to_string();
    assert_eq!(base, fork);
}

#[test]
fn fetch_and_push_between_repositories() {
    let remote_dir = tempfile::tempdir().unwrap();
    let local_dir = tempfile::tempdir().unwrap();

    init_and_first_commit(remote_dir.path());
    run(local_dir.path(), &["init"]);

    let remote_path = remote_dir.path().to_str().unwrap().to_string();
    let fetch_out = run(local_dir.path(), &["fetch", &remote_path]);
    assert!(fetch_out.contains("refs/remote/master"), "{fetch_out}");

    let repo = Repository::open(local_dir.path()).unwrap();
    let mirrored = repo
        .refs()
        .resolve_oid(&RefName::remote("master").unwrap())
        .unwrap();
    assert!(mirrored.is_some());

    // Build local work on a branch rooted at the fetched commit and push it.
    let mirrored = mirrored.unwrap().to_hex();
    run(local_dir.path(), &["branch", "work", &mirrored]);
    run(local_dir.path(), &["checkout", "work"]);
    fs::write(local_dir.path().join("new.txt"), "local work\n").unwrap();
    run(local_dir.path(), &["add", "new.txt"]);
    let pushed = run(local_dir.path(), &["commit", "-m", "local work"])
        .trim()
        .to_string();

    run(local_dir.path(), &["push", &remote_path, "work"]);
    let remote = Repository::open(remote_dir.path()).unwrap();
    assert_eq!(
        remote
            .refs()
            .resolve_oid(&RefName::branch("work").unwrap())
            .unwrap()
            .unwrap()
            .to_hex(),
        pushed
    );
}

#[test]
fn init_twice_fails() {
    let dir = tempfile::tempdir().unwrap();
    run(dir.path(), &["init"]);
    ugit(dir.path()).args(["init"]).assert().failure();
}

#[test]
fn unknown_revision_fails_with_nonzero_exit() {
    let dir = tempfile::tempdir().unwrap();
    run(dir.path(), &["init"]);
    ugit(dir.path())
        .args(["checkout", "no-such-branch"])
        .assert()
        .failure();
}
