use std::collections::HashMap;
use std::io::Write;

use anyhow::Result;
use clap::Args;
use ugit_diff::render_tree_diff;
use ugit_object::FlatTree;
use ugit_revwalk::resolve_name;
use ugit_worktree::flatten_tree;

use super::log::write_entry;
use super::open_repo;

#[derive(Args)]
pub struct ShowArgs {
    /// Commit to show (defaults to HEAD)
    pub revision: Option<String>,
}

pub fn run(args: &ShowArgs) -> Result<i32> {
    let repo = open_repo()?;
    let rev = args.revision.as_deref().unwrap_or("@");
    let oid = resolve_name(&repo, rev)?;
    let commit = repo.objects().read_commit(&oid)?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    write_entry(&mut out, &oid, &commit, &HashMap::new())?;

    // Diff against the first parent (an empty tree for root commits).
    let parent_tree = match commit.first_parent() {
        Some(parent) => {
            let parent_commit = repo.objects().read_commit(&parent)?;
            flatten_tree(repo.objects(), &parent_commit.tree)?
        }
        None => FlatTree::new(),
    };
    let this_tree = flatten_tree(repo.objects(), &commit.tree)?;

    let diff = render_tree_diff(repo.objects(), &parent_tree, &this_tree)?;
    out.write_all(diff.as_bytes())?;
    Ok(0)
}
