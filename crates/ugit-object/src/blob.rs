use bstr::BString;

/// A blob object — opaque file bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Blob {
    pub data: BString,
}

impl Blob {
    pub fn new(data: impl AsRef<[u8]>) -> Self {
        Self {
            data: BString::from(data.as_ref()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn holds_arbitrary_bytes() {
        let blob = Blob::new(&b"\x00\xff\x01"[..]);
        assert_eq!(blob.data.as_slice(), b"\x00\xff\x01");
    }
}
