use anyhow::Result;
use clap::Args;
use ugit_revwalk::resolve_name;

use super::open_repo;

#[derive(Args)]
pub struct ReadTreeArgs {
    /// Tree to load into the index (name or object id)
    pub tree: String,
}

pub fn run(args: &ReadTreeArgs) -> Result<i32> {
    let repo = open_repo()?;
    let oid = resolve_name(&repo, &args.tree)?;
    ugit_worktree::read_tree(&repo, &oid, false)?;
    Ok(0)
}
