use std::collections::HashMap;
use std::io::Write;

use anyhow::Result;
use clap::Args;
use ugit_hash::ObjectId;
use ugit_revwalk::{resolve_name, CommitWalk};

use super::open_repo;

#[derive(Args)]
pub struct LogArgs {
    /// Commit to start from (defaults to HEAD)
    pub revision: Option<String>,
}

pub fn run(args: &LogArgs) -> Result<i32> {
    let repo = open_repo()?;

    let start = match &args.revision {
        Some(rev) => resolve_name(&repo, rev)?,
        None => match repo.head_oid()? {
            Some(oid) => oid,
            // Nothing committed yet; an empty log, not an error.
            None => return Ok(0),
        },
    };

    // Decorate commits with the refs pointing at them.
    let mut decorations: HashMap<ObjectId, Vec<String>> = HashMap::new();
    for (name, oid) in repo.refs().iter("")? {
        decorations.entry(oid).or_default().push(name.to_string());
    }

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    for oid in CommitWalk::from_commit(&repo, start) {
        let oid = oid?;
        let commit = repo.objects().read_commit(&oid)?;
        write_entry(&mut out, &oid, &commit, &decorations)?;
    }
    Ok(0)
}

pub fn write_entry(
    out: &mut impl Write,
    oid: &ObjectId,
    commit: &ugit_object::Commit,
    decorations: &HashMap<ObjectId, Vec<String>>,
) -> Result<()> {
    match decorations.get(oid) {
        Some(refs) => writeln!(out, "commit {oid} ({})", refs.join(", "))?,
        None => writeln!(out, "commit {oid}")?,
    }
    writeln!(out)?;
    for line in commit.message.lines() {
        writeln!(out, "    {line}")?;
    }
    writeln!(out)?;
    Ok(())
}
