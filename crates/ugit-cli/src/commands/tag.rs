use anyhow::Result;
use clap::Args;
use ugit_ref::{RefName, RefTarget};
use ugit_revwalk::resolve_name;

use super::open_repo;

#[derive(Args)]
pub struct TagArgs {
    /// Tag name
    pub name: String,

    /// Commit the tag points at (defaults to HEAD)
    #[arg(default_value = "@")]
    pub revision: String,
}

pub fn run(args: &TagArgs) -> Result<i32> {
    let repo = open_repo()?;
    let oid = resolve_name(&repo, &args.revision)?;
    repo.refs()
        .update(&RefName::tag(&args.name)?, &RefTarget::Direct(oid), true)?;
    Ok(0)
}
