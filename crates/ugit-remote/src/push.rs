use std::collections::HashSet;
use std::path::Path;

use tracing::debug;
use ugit_hash::ObjectId;
use ugit_ref::{RefName, RefTarget};
use ugit_repository::Repository;
use ugit_revwalk::{is_ancestor, reachable_objects};

use crate::RemoteError;

/// What a push transferred.
#[derive(Debug)]
pub struct PushSummary {
    /// The oid the remote ref now points at.
    pub oid: ObjectId,
    /// Number of objects that were actually copied.
    pub copied: usize,
}

/// Push `refname` to the repository at `remote_path`.
///
/// Objects reachable from remote refs whose tips exist locally are assumed
/// present on the remote and excluded from the transfer; everything else
/// reachable from the pushed ref is copied. The remote branch must be an
/// ancestor of the pushed commit (fast-forward only).
pub fn push(
    local: &Repository,
    remote_path: &Path,
    refname: &RefName,
) -> Result<PushSummary, RemoteError> {
    let local_oid = local
        .refs()
        .resolve_oid(refname)?
        .ok_or_else(|| RemoteError::MissingLocalRef(refname.to_string()))?;

    let remote = Repository::open(remote_path)?;

    // Fast-forward guard: a remote tip we cannot prove to be an ancestor
    // (unknown locally, or diverged) rejects the push.
    if let Some(remote_oid) = remote.refs().resolve_oid(refname)? {
        let known = local.objects().contains(&remote_oid);
        if !known || !is_ancestor(local, local_oid, remote_oid)? {
            return Err(RemoteError::NotFastForward {
                refname: refname.to_string(),
            });
        }
    }

    // Everything reachable from remote tips that exist locally is already on
    // the remote; send only the rest.
    let known_remote_tips: Vec<ObjectId> = remote
        .refs()
        .iter("")?
        .into_iter()
        .map(|(_, oid)| oid)
        .filter(|oid| local.objects().contains(oid))
        .collect();
    let remote_has: HashSet<ObjectId> =
        reachable_objects(local, known_remote_tips)?.into_iter().collect();

    let mut copied = 0;
    for oid in reachable_objects(local, [local_oid])? {
        if remote_has.contains(&oid) {
            continue;
        }
        if local.objects().copy_to(&oid, remote.objects())? {
            copied += 1;
        }
    }

    remote
        .refs()
        .update(refname, &RefTarget::Direct(local_oid), true)?;

    debug!(copied, %local_oid, "push complete");
    Ok(PushSummary {
        oid: local_oid,
        copied,
    })
}
