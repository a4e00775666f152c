use anyhow::{bail, Result};
use clap::Args;
use ugit_ref::{RefName, RefTarget};
use ugit_revwalk::{merge_base, resolve_name};
use ugit_worktree::{read_tree, read_tree_merged};

use super::open_repo;

#[derive(Args)]
pub struct MergeArgs {
    /// Commit to merge into HEAD
    pub revision: String,
}

pub fn run(args: &MergeArgs) -> Result<i32> {
    let repo = open_repo()?;

    let Some(head) = repo.head_oid()? else {
        bail!("HEAD has no commits to merge into");
    };
    let other = resolve_name(&repo, &args.revision)?;

    let Some(base) = merge_base(&repo, other, head)? else {
        bail!("no common ancestor with {}", args.revision);
    };
    let c_other = repo.objects().read_commit(&other)?;

    // HEAD already contained in the other side: move up without a commit.
    if base == head {
        read_tree(&repo, &c_other.tree, true)?;
        repo.refs()
            .update(&RefName::head(), &RefTarget::Direct(other), true)?;
        println!("Fast-forward merge, no need to commit");
        return Ok(0);
    }

    repo.refs()
        .update(&RefName::merge_head(), &RefTarget::Direct(other), true)?;

    let c_base = repo.objects().read_commit(&base)?;
    let c_head = repo.objects().read_commit(&head)?;
    read_tree_merged(&repo, &c_base.tree, &c_head.tree, &c_other.tree, true)?;

    println!("Merged in working tree");
    println!("Please commit to continue");
    Ok(0)
}
