use anyhow::Result;
use clap::Args;
use ugit_object::{Commit, Object};
use ugit_ref::{RefName, RefTarget};

use super::open_repo;

#[derive(Args)]
pub struct CommitArgs {
    /// Commit message
    #[arg(short, long)]
    pub message: String,
}

pub fn run(args: &CommitArgs) -> Result<i32> {
    let repo = open_repo()?;

    let tree = ugit_worktree::write_tree(&repo)?;

    // HEAD first-parent, then the merged-in commit if one is pending.
    let head = repo.head_oid()?;
    let merge_head = repo.merge_head_oid()?;
    let parents: Vec<_> = head.into_iter().chain(merge_head).collect();

    let commit = Commit::new(tree, parents, args.message.as_str());
    let oid = repo.objects().write_object(&Object::Commit(commit))?;

    if merge_head.is_some() {
        repo.refs().delete(&RefName::merge_head(), false)?;
    }
    repo.refs()
        .update(&RefName::head(), &RefTarget::Direct(oid), true)?;

    println!("{oid}");
    Ok(0)
}
