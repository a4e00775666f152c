use std::io::Write;

use anyhow::Result;
use clap::Args;
use ugit_revwalk::resolve_name;

use super::open_repo;

#[derive(Args)]
pub struct CatFileArgs {
    /// Object to print (name or object id)
    pub object: String,
}

pub fn run(args: &CatFileArgs) -> Result<i32> {
    let repo = open_repo()?;
    let oid = resolve_name(&repo, &args.object)?;
    let payload = repo.objects().read_payload(&oid, None)?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    out.write_all(&payload)?;
    Ok(0)
}
