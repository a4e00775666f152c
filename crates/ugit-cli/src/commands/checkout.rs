use anyhow::Result;
use clap::Args;
use ugit_ref::{RefName, RefTarget};
use ugit_revwalk::resolve_name;

use super::open_repo;

#[derive(Args)]
pub struct CheckoutArgs {
    /// Branch name, tag, or commit to check out
    pub target: String,
}

pub fn run(args: &CheckoutArgs) -> Result<i32> {
    let repo = open_repo()?;

    let oid = resolve_name(&repo, &args.target)?;
    let commit = repo.objects().read_commit(&oid)?;
    ugit_worktree::read_tree(&repo, &commit.tree, true)?;

    // A branch name keeps HEAD symbolic; anything else detaches it. Either
    // way HEAD itself is rewritten, not the ref it pointed at.
    let head = match branch_ref(&repo, &args.target)? {
        Some(branch) => RefTarget::Symbolic(branch),
        None => RefTarget::Direct(oid),
    };
    repo.refs().update(&RefName::head(), &head, false)?;
    Ok(0)
}

fn branch_ref(
    repo: &ugit_repository::Repository,
    name: &str,
) -> Result<Option<RefName>> {
    let Ok(branch) = RefName::branch(name) else {
        return Ok(None);
    };
    if repo.refs().resolve_oid(&branch)?.is_some() {
        Ok(Some(branch))
    } else {
        Ok(None)
    }
}
