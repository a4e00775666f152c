use std::io::Write;

use anyhow::Result;
use clap::Args;
use ugit_diff::changed_paths;
use ugit_worktree::snapshot;

use super::diff::head_tree;
use super::open_repo;

#[derive(Args)]
pub struct StatusArgs {}

pub fn run(_args: &StatusArgs) -> Result<i32> {
    let repo = open_repo()?;
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match repo.current_branch()? {
        Some(branch) => writeln!(out, "On branch {branch}")?,
        None => match repo.head_oid()? {
            Some(oid) => writeln!(out, "HEAD detached at {}", oid.short(10))?,
            None => writeln!(out, "No commits yet")?,
        },
    }

    if let Some(merge_head) = repo.merge_head_oid()? {
        writeln!(out, "Merging with {}", merge_head.short(10))?;
    }

    let index = repo.read_index()?.to_map();

    let staged = changed_paths(&head_tree(&repo)?, &index);
    if !staged.is_empty() {
        writeln!(out, "\nChanges to be committed:")?;
        for (path, from, to) in staged {
            writeln!(out, "  {}: {path}", change_label(from.is_some(), to.is_some()))?;
        }
    }

    let unstaged = changed_paths(&index, &snapshot(&repo)?);
    if !unstaged.is_empty() {
        writeln!(out, "\nChanges not staged for commit:")?;
        for (path, from, to) in unstaged {
            writeln!(out, "  {}: {path}", change_label(from.is_some(), to.is_some()))?;
        }
    }

    Ok(0)
}

fn change_label(present_before: bool, present_after: bool) -> &'static str {
    match (present_before, present_after) {
        (false, true) => "new file",
        (true, false) => "deleted",
        _ => "modified",
    }
}
