use anyhow::Result;
use clap::Args;
use ugit_ref::RefName;

use super::open_repo;

#[derive(Args)]
pub struct PushArgs {
    /// Path of the repository to push to
    pub remote: std::path::PathBuf,

    /// Branch to push
    pub branch: String,
}

pub fn run(args: &PushArgs) -> Result<i32> {
    let repo = open_repo()?;
    let refname = RefName::branch(&args.branch)?;
    let summary = ugit_remote::push(&repo, &args.remote, &refname)?;

    println!(
        "Pushed {} to {} ({} object(s), now at {})",
        args.branch,
        args.remote.display(),
        summary.copied,
        summary.oid.short(10)
    );
    Ok(0)
}
