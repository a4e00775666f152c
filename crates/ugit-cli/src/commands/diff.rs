use std::io::Write;

use anyhow::Result;
use clap::Args;
use ugit_object::FlatTree;
use ugit_repository::Repository;
use ugit_revwalk::resolve_name;
use ugit_worktree::{flatten_tree, snapshot};

use super::open_repo;

#[derive(Args)]
pub struct DiffArgs {
    /// Compare against the index instead of the working tree
    #[arg(long)]
    pub cached: bool,

    /// Commit to compare from (defaults to HEAD tree or index)
    pub commit: Option<String>,
}

pub fn run(args: &DiffArgs) -> Result<i32> {
    let repo = open_repo()?;

    let from_commit = match &args.commit {
        Some(rev) => Some(commit_tree(&repo, rev)?),
        None => None,
    };

    let (tree_from, tree_to) = if args.cached {
        let from = match from_commit {
            Some(tree) => tree,
            None => head_tree(&repo)?,
        };
        (from, repo.read_index()?.to_map())
    } else {
        let from = match from_commit {
            Some(tree) => tree,
            None => repo.read_index()?.to_map(),
        };
        (from, snapshot(&repo)?)
    };

    let text = ugit_diff::render_tree_diff(repo.objects(), &tree_from, &tree_to)?;
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    out.write_all(text.as_bytes())?;
    Ok(0)
}

fn commit_tree(repo: &Repository, rev: &str) -> Result<FlatTree> {
    let oid = resolve_name(repo, rev)?;
    let commit = repo.objects().read_commit(&oid)?;
    Ok(flatten_tree(repo.objects(), &commit.tree)?)
}

/// The committed tree of HEAD, or an empty snapshot on an unborn branch.
pub fn head_tree(repo: &Repository) -> Result<FlatTree> {
    match repo.head_oid()? {
        Some(head) => {
            let commit = repo.objects().read_commit(&head)?;
            Ok(flatten_tree(repo.objects(), &commit.tree)?)
        }
        None => Ok(FlatTree::new()),
    }
}
