use anyhow::Result;
use clap::Args;

use super::open_repo;

#[derive(Args)]
pub struct AddArgs {
    /// Files or directories to stage
    #[arg(required = true)]
    pub paths: Vec<std::path::PathBuf>,
}

pub fn run(args: &AddArgs) -> Result<i32> {
    let repo = open_repo()?;
    ugit_worktree::add(&repo, &args.paths)?;
    Ok(0)
}
