use ugit_hash::ObjectId;

use crate::{ObjectError, ObjectType};

/// A commit object.
///
/// The payload is UTF-8 text: header lines (`tree <oid>`, then zero or more
/// `parent <oid>`), a blank line, then the free-form message. Parent order is
/// significant: the first parent is the mainline. Commits carry no timestamps
/// or author identity, so identical inputs hash identically.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
    /// OID of the root tree.
    pub tree: ObjectId,
    /// Parent commit OIDs (empty for root commits).
    pub parents: Vec<ObjectId>,
    /// Commit message — everything after the blank separator line, verbatim.
    pub message: String,
}

impl Commit {
    /// Build a commit, normalizing the message to end with a newline.
    pub fn new(tree: ObjectId, parents: Vec<ObjectId>, message: impl Into<String>) -> Self {
        let mut message = message.into();
        if !message.ends_with('\n') {
            message.push('\n');
        }
        Self {
            tree,
            parents,
            message,
        }
    }

    /// Parse commit payload text.
    ///
    /// Fails fast on the first unknown header; the header section ends at the
    /// first blank line (or at end of input for a message-less commit).
    pub fn parse(payload: &[u8]) -> Result<Self, ObjectError> {
        let text = std::str::from_utf8(payload).map_err(|_| ObjectError::NonUtf8Payload {
            kind: ObjectType::Commit,
        })?;

        let mut tree: Option<ObjectId> = None;
        let mut parents = Vec::new();
        let mut rest = text;

        loop {
            let (line, remainder) = match rest.split_once('\n') {
                Some(split) => split,
                None => (rest, ""),
            };

            if line.is_empty() {
                rest = remainder;
                break;
            }

            let (key, value) = line.split_once(' ').ok_or_else(|| {
                ObjectError::InvalidCommitHeader(format!("malformed header line '{line}'"))
            })?;
            match key {
                "tree" => {
                    tree = Some(ObjectId::from_hex(value)?);
                }
                "parent" => {
                    parents.push(ObjectId::from_hex(value)?);
                }
                other => {
                    return Err(ObjectError::InvalidCommitHeader(format!(
                        "unknown header '{other}'"
                    )));
                }
            }

            rest = remainder;
            if rest.is_empty() {
                break;
            }
        }

        let tree = tree.ok_or(ObjectError::MissingTree)?;

        Ok(Self {
            tree,
            parents,
            message: rest.to_string(),
        })
    }

    /// Serialize to canonical payload text.
    pub fn serialize_payload(&self) -> Vec<u8> {
        let mut out = String::new();
        out.push_str("tree ");
        out.push_str(&self.tree.to_hex());
        out.push('\n');
        for parent in &self.parents {
            out.push_str("parent ");
            out.push_str(&parent.to_hex());
            out.push('\n');
        }
        out.push('\n');
        out.push_str(&self.message);
        out.into_bytes()
    }

    /// The first parent, if any (the mainline).
    pub fn first_parent(&self) -> Option<ObjectId> {
        self.parents.first().copied()
    }

    /// Is this a merge commit? (more than one parent)
    pub fn is_merge(&self) -> bool {
        self.parents.len() > 1
    }

    /// The first line of the message.
    pub fn summary(&self) -> &str {
        self.message.lines().next().unwrap_or("")
    }
}
