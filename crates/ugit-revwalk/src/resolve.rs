use ugit_hash::{hex, ObjectId};
use ugit_ref::RefName;
use ugit_repository::Repository;

use crate::RevWalkError;

/// Resolve a revision name to an object id.
///
/// `@` is an alias for `HEAD`. The name is tried as a ref in this order:
/// literally, under `refs/`, under `refs/tags/`, then under `refs/heads/`.
/// If no ref matches, a 40-hex string is accepted as a literal object id.
pub fn resolve_name(repo: &Repository, name: &str) -> Result<ObjectId, RevWalkError> {
    let name = if name == "@" { "HEAD" } else { name };

    let candidates = [
        name.to_string(),
        format!("refs/{name}"),
        format!("refs/tags/{name}"),
        format!("refs/heads/{name}"),
    ];
    for candidate in &candidates {
        let Ok(refname) = RefName::new(candidate.clone()) else {
            continue;
        };
        if let Some(oid) = repo.refs().resolve_oid(&refname)? {
            return Ok(oid);
        }
    }

    if hex::is_hex_oid(name) {
        if let Ok(oid) = ObjectId::from_hex(name) {
            return Ok(oid);
        }
    }

    Err(RevWalkError::UnknownName(name.to_string()))
}
