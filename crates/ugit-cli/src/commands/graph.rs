use std::io::Write;

use anyhow::Result;
use clap::Args;
use ugit_revwalk::CommitWalk;

use super::open_repo;

#[derive(Args)]
pub struct GraphArgs {}

/// Export refs and every reachable commit as Graphviz DOT text.
pub fn run(_args: &GraphArgs) -> Result<i32> {
    let repo = open_repo()?;
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    writeln!(out, "digraph commits {{")?;

    let refs = repo.refs().iter("")?;
    for (name, oid) in &refs {
        writeln!(out, "\"{name}\" [shape=note]")?;
        writeln!(out, "\"{name}\" -> \"{oid}\"")?;
    }

    let seeds: Vec<_> = refs.iter().map(|(_, oid)| *oid).collect();
    for oid in CommitWalk::new(&repo, seeds) {
        let oid = oid?;
        let commit = repo.objects().read_commit(&oid)?;
        writeln!(
            out,
            "\"{oid}\" [shape=box style=filled label=\"{}\"]",
            oid.short(10)
        )?;
        for parent in &commit.parents {
            writeln!(out, "\"{oid}\" -> \"{parent}\"")?;
        }
    }

    writeln!(out, "}}")?;
    Ok(0)
}
