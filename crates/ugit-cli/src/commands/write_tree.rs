use anyhow::Result;
use clap::Args;

use super::open_repo;

#[derive(Args)]
pub struct WriteTreeArgs {}

pub fn run(_args: &WriteTreeArgs) -> Result<i32> {
    let repo = open_repo()?;
    let oid = ugit_worktree::write_tree(&repo)?;
    println!("{oid}");
    Ok(0)
}
