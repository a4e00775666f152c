use anyhow::Result;
use clap::Args;

use super::open_repo;

#[derive(Args)]
pub struct FetchArgs {
    /// Path of the repository to fetch from
    pub remote: std::path::PathBuf,
}

pub fn run(args: &FetchArgs) -> Result<i32> {
    let repo = open_repo()?;
    let summary = ugit_remote::fetch(&repo, &args.remote)?;

    println!("From {}", args.remote.display());
    for (name, oid) in &summary.heads {
        println!("  {} {name} -> refs/remote/{name}", oid.short(10));
    }
    println!("Fetched {} object(s)", summary.copied);
    Ok(0)
}
