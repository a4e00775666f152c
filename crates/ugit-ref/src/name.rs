use std::fmt;

use crate::RefError;

/// A validated ref name: `/`-separated segments relative to the repository
/// directory, e.g. `HEAD` or `refs/heads/master`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RefName(String);

pub const HEADS_PREFIX: &str = "refs/heads/";
pub const TAGS_PREFIX: &str = "refs/tags/";
pub const REMOTE_PREFIX: &str = "refs/remote/";

impl RefName {
    /// Validate and wrap a ref name.
    pub fn new(name: impl Into<String>) -> Result<Self, RefError> {
        let name = name.into();
        let invalid = |reason: &str| RefError::InvalidName {
            name: name.clone(),
            reason: reason.to_string(),
        };

        if name.is_empty() {
            return Err(invalid("empty name"));
        }
        if name.starts_with('/') || name.ends_with('/') {
            return Err(invalid("leading or trailing '/'"));
        }
        for segment in name.split('/') {
            if segment.is_empty() {
                return Err(invalid("empty path segment"));
            }
            if segment == "." || segment == ".." {
                return Err(invalid("'.' and '..' segments are not allowed"));
            }
        }
        if name
            .bytes()
            .any(|b| b.is_ascii_control() || b == b' ' || b == b'\\')
        {
            return Err(invalid("control characters, spaces, and '\\' are not allowed"));
        }

        Ok(Self(name))
    }

    /// The ref pointing at the current checkout.
    pub fn head() -> Self {
        Self("HEAD".to_string())
    }

    /// The transient ref present while a merge awaits its commit.
    pub fn merge_head() -> Self {
        Self("MERGE_HEAD".to_string())
    }

    /// The branch ref `refs/heads/<name>`.
    pub fn branch(name: &str) -> Result<Self, RefError> {
        Self::new(format!("{HEADS_PREFIX}{name}"))
    }

    /// The tag ref `refs/tags/<name>`.
    pub fn tag(name: &str) -> Result<Self, RefError> {
        Self::new(format!("{TAGS_PREFIX}{name}"))
    }

    /// The remote-tracking ref `refs/remote/<name>`.
    pub fn remote(name: &str) -> Result<Self, RefError> {
        Self::new(format!("{REMOTE_PREFIX}{name}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Is this a branch ref (under `refs/heads/`)?
    pub fn is_branch(&self) -> bool {
        self.0.starts_with(HEADS_PREFIX)
    }

    /// The short branch name, if this is a branch ref.
    pub fn branch_name(&self) -> Option<&str> {
        self.0.strip_prefix(HEADS_PREFIX)
    }
}

impl fmt::Display for RefName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for RefName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::str::FromStr for RefName {
    type Err = RefError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}
