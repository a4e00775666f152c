use anyhow::Result;
use clap::Args;
use ugit_ref::{RefName, RefTarget};
use ugit_revwalk::resolve_name;

use super::open_repo;

#[derive(Args)]
pub struct BranchArgs {
    /// Branch to create; with no name, list branches
    pub name: Option<String>,

    /// Commit the new branch starts at (defaults to HEAD)
    #[arg(default_value = "@")]
    pub start_point: String,
}

pub fn run(args: &BranchArgs) -> Result<i32> {
    let repo = open_repo()?;

    match &args.name {
        Some(name) => {
            let oid = resolve_name(&repo, &args.start_point)?;
            repo.refs()
                .update(&RefName::branch(name)?, &RefTarget::Direct(oid), true)?;
            println!("Branch {name} created at {}", oid.short(10));
        }
        None => {
            let current = repo.current_branch()?;
            for (name, _) in repo.refs().iter("refs/heads/")? {
                let short = name.branch_name().unwrap_or(name.as_str());
                let marker = if Some(short) == current.as_deref() {
                    "*"
                } else {
                    " "
                };
                println!("{marker} {short}");
            }
        }
    }
    Ok(0)
}
