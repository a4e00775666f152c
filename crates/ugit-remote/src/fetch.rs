use std::path::Path;

use tracing::debug;
use ugit_hash::ObjectId;
use ugit_ref::{RefName, RefTarget};
use ugit_repository::Repository;
use ugit_revwalk::reachable_objects;

use crate::RemoteError;

/// What a fetch brought over.
#[derive(Debug)]
pub struct FetchSummary {
    /// Remote branches, as `(short name, oid)`, now mirrored under
    /// `refs/remote/`.
    pub heads: Vec<(String, ObjectId)>,
    /// Number of objects that were actually copied.
    pub copied: usize,
}

/// Fetch from the repository at `remote_path`.
///
/// Copies every object reachable from the remote's branches that is missing
/// locally, then records each remote branch under `refs/remote/<name>`.
pub fn fetch(local: &Repository, remote_path: &Path) -> Result<FetchSummary, RemoteError> {
    let remote = Repository::open(remote_path)?;

    let remote_heads = remote.refs().iter("refs/heads/")?;
    let seeds: Vec<ObjectId> = remote_heads.iter().map(|(_, oid)| *oid).collect();

    // Reachability runs against the remote's stores; the copy is verbatim.
    let mut copied = 0;
    for oid in reachable_objects(&remote, seeds)? {
        if remote.objects().copy_to(&oid, local.objects())? {
            copied += 1;
        }
    }

    let mut heads = Vec::new();
    for (name, oid) in remote_heads {
        let Some(short) = name.branch_name() else {
            continue;
        };
        local
            .refs()
            .update(&RefName::remote(short)?, &RefTarget::Direct(oid), true)?;
        heads.push((short.to_string(), oid));
    }

    debug!(copied, heads = heads.len(), "fetch complete");
    Ok(FetchSummary { heads, copied })
}
