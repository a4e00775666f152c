use anyhow::Result;
use clap::Args;
use ugit_ref::{RefName, RefTarget};
use ugit_revwalk::resolve_name;

use super::open_repo;

#[derive(Args)]
pub struct ResetArgs {
    /// Commit to move HEAD to
    pub revision: String,
}

pub fn run(args: &ResetArgs) -> Result<i32> {
    let repo = open_repo()?;
    let oid = resolve_name(&repo, &args.revision)?;
    // Writes through a symbolic HEAD: the branch moves, HEAD stays on it.
    repo.refs()
        .update(&RefName::head(), &RefTarget::Direct(oid), true)?;
    Ok(0)
}
