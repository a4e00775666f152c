use anyhow::Result;
use clap::Args;
use ugit_revwalk::{merge_base, resolve_name};

use super::open_repo;

#[derive(Args)]
pub struct MergeBaseArgs {
    /// First commit
    pub commit1: String,

    /// Second commit
    pub commit2: String,
}

pub fn run(args: &MergeBaseArgs) -> Result<i32> {
    let repo = open_repo()?;
    let a = resolve_name(&repo, &args.commit1)?;
    let b = resolve_name(&repo, &args.commit2)?;

    match merge_base(&repo, a, b)? {
        Some(base) => {
            println!("{base}");
            Ok(0)
        }
        None => {
            eprintln!("no common ancestor");
            Ok(1)
        }
    }
}
