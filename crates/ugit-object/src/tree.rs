use std::collections::BTreeMap;

use ugit_hash::ObjectId;

use crate::{ObjectError, ObjectType};

/// A flat directory snapshot: repository-relative path → blob object id.
///
/// This is the working currency of diff, merge, and the index; nested tree
/// objects are flattened into it and rebuilt from it.
pub type FlatTree = BTreeMap<String, ObjectId>;

/// A single entry in a tree object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeEntry {
    /// `Blob` for files, `Tree` for subdirectories.
    pub kind: ObjectType,
    pub oid: ObjectId,
    pub name: String,
}

impl TreeEntry {
    /// Create an entry, validating the kind and name.
    pub fn new(kind: ObjectType, oid: ObjectId, name: impl Into<String>) -> Result<Self, ObjectError> {
        let name = name.into();
        if kind == ObjectType::Commit {
            return Err(ObjectError::InvalidTreeEntry {
                line: 0,
                reason: "commit entries are not allowed in trees".into(),
            });
        }
        validate_name(&name, 0)?;
        Ok(Self { kind, oid, name })
    }
}

/// A tree object — one directory level, entries sorted by name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tree {
    pub entries: Vec<TreeEntry>,
}

impl Tree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse tree payload text: one `"<type> <oid> <name>"` line per entry.
    pub fn parse(payload: &[u8]) -> Result<Self, ObjectError> {
        let text = std::str::from_utf8(payload).map_err(|_| ObjectError::NonUtf8Payload {
            kind: ObjectType::Tree,
        })?;

        let mut entries = Vec::new();
        for (lineno, line) in text.lines().enumerate() {
            let line_num = lineno + 1;
            let mut parts = line.splitn(3, ' ');
            let (kind, oid, name) = match (parts.next(), parts.next(), parts.next()) {
                (Some(k), Some(o), Some(n)) => (k, o, n),
                _ => {
                    return Err(ObjectError::InvalidTreeEntry {
                        line: line_num,
                        reason: format!("expected '<type> <oid> <name>', got '{line}'"),
                    })
                }
            };

            let kind = ObjectType::from_bytes(kind.as_bytes())?;
            if kind == ObjectType::Commit {
                return Err(ObjectError::InvalidTreeEntry {
                    line: line_num,
                    reason: "commit entries are not allowed in trees".into(),
                });
            }
            let oid = ObjectId::from_hex(oid).map_err(|e| ObjectError::InvalidTreeEntry {
                line: line_num,
                reason: e.to_string(),
            })?;
            validate_name(name, line_num)?;

            entries.push(TreeEntry {
                kind,
                oid,
                name: name.to_string(),
            });
        }

        Ok(Self { entries })
    }

    /// Serialize to canonical payload text: entries sorted ascending by name,
    /// so identical snapshots always hash to the same object id.
    pub fn serialize_payload(&self) -> Vec<u8> {
        let mut sorted: Vec<&TreeEntry> = self.entries.iter().collect();
        sorted.sort_by(|a, b| a.name.cmp(&b.name));

        let mut out = String::new();
        for entry in sorted {
            out.push_str(entry.kind.as_str());
            out.push(' ');
            out.push_str(&entry.oid.to_hex());
            out.push(' ');
            out.push_str(&entry.name);
            out.push('\n');
        }
        out.into_bytes()
    }
}

/// Entry names are single path segments: no separators, no `.` or `..`.
fn validate_name(name: &str, line: usize) -> Result<(), ObjectError> {
    if name.is_empty() || name == "." || name == ".." || name.contains('/') {
        return Err(ObjectError::InvalidTreeEntry {
            line,
            reason: format!("invalid entry name '{name}'"),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn oid(n: u8) -> ObjectId {
        let mut bytes = [0u8; 20];
        bytes[19] = n;
        ObjectId::from_raw(bytes)
    }

    #[test]
    fn parse_entries() {
        let payload = format!(
            "blob {} a.txt\ntree {} sub\n",
            oid(1).to_hex(),
            oid(2).to_hex()
        );
        let tree = Tree::parse(payload.as_bytes()).unwrap();
        assert_eq!(tree.entries.len(), 2);
        assert_eq!(tree.entries[0].kind, ObjectType::Blob);
        assert_eq!(tree.entries[0].name, "a.txt");
        assert_eq!(tree.entries[1].kind, ObjectType::Tree);
        assert_eq!(tree.entries[1].name, "sub");
    }

    #[test]
    fn name_may_contain_spaces() {
        let payload = format!("blob {} hello world.txt\n", oid(1).to_hex());
        let tree = Tree::parse(payload.as_bytes()).unwrap();
        assert_eq!(tree.entries[0].name, "hello world.txt");
    }

    #[test]
    fn serialization_sorts_by_name() {
        let mut tree = Tree::new();
        tree.entries
            .push(TreeEntry::new(ObjectType::Blob, oid(1), "zebra").unwrap());
        tree.entries
            .push(TreeEntry::new(ObjectType::Blob, oid(2), "apple").unwrap());

        let text = String::from_utf8(tree.serialize_payload()).unwrap();
        let names: Vec<&str> = text
            .lines()
            .map(|l| l.rsplitn(2, ' ').next().unwrap())
            .collect();
        assert_eq!(names, ["apple", "zebra"]);
    }

    #[test]
    fn insertion_order_does_not_change_payload() {
        let mut a = Tree::new();
        a.entries
            .push(TreeEntry::new(ObjectType::Blob, oid(1), "x").unwrap());
        a.entries
            .push(TreeEntry::new(ObjectType::Blob, oid(2), "y").unwrap());

        let mut b = Tree::new();
        b.entries
            .push(TreeEntry::new(ObjectType::Blob, oid(2), "y").unwrap());
        b.entries
            .push(TreeEntry::new(ObjectType::Blob, oid(1), "x").unwrap());

        assert_eq!(a.serialize_payload(), b.serialize_payload());
    }

    #[test]
    fn roundtrip_preserves_entries() {
        let mut tree = Tree::new();
        tree.entries
            .push(TreeEntry::new(ObjectType::Blob, oid(1), "a").unwrap());
        tree.entries
            .push(TreeEntry::new(ObjectType::Tree, oid(2), "b").unwrap());

        let parsed = Tree::parse(&tree.serialize_payload()).unwrap();
        assert_eq!(parsed, tree);
    }

    #[test]
    fn rejects_dot_names() {
        for bad in [".", "..", "a/b", ""] {
            let payload = format!("blob {} {}\n", oid(1).to_hex(), bad);
            assert!(Tree::parse(payload.as_bytes()).is_err(), "accepted {bad:?}");
        }
    }

    #[test]
    fn rejects_commit_entries() {
        let payload = format!("commit {} sub\n", oid(1).to_hex());
        assert!(Tree::parse(payload.as_bytes()).is_err());
    }

    #[test]
    fn rejects_malformed_lines() {
        assert!(Tree::parse(b"blob abcdef\n").is_err());
        assert!(Tree::parse(b"blob\n").is_err());
    }
}
