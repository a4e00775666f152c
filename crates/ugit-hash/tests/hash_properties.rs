//! Property tests for hashing and hex round-trips.

use proptest::prelude::*;
use ugit_hash::{hex, Hasher, ObjectId};

proptest! {
    #[test]
    fn digest_is_deterministic(data: Vec<u8>) {
        prop_assert_eq!(Hasher::digest(&data), Hasher::digest(&data));
    }

    #[test]
    fn digest_hex_roundtrips(data: Vec<u8>) {
        let oid = Hasher::digest(&data);
        let hex = oid.to_hex();
        prop_assert_eq!(hex.len(), 40);
        prop_assert!(hex.bytes().all(|b| b.is_ascii_hexdigit()));
        prop_assert_eq!(ObjectId::from_hex(&hex).unwrap(), oid);
    }

    #[test]
    fn split_update_matches_one_shot(data: Vec<u8>, split in 0usize..64) {
        let split = split.min(data.len());
        let mut h = Hasher::new();
        h.update(&data[..split]);
        h.update(&data[split..]);
        prop_assert_eq!(h.finalize(), Hasher::digest(&data));
    }

    #[test]
    fn hex_encode_decode(bytes: [u8; 20]) {
        let s = hex::encode(&bytes);
        let mut decoded = [0u8; 20];
        hex::decode(&s, &mut decoded).unwrap();
        prop_assert_eq!(decoded, bytes);
    }
}

#[cfg(feature = "serde")]
mod serde_roundtrip {
    use ugit_hash::ObjectId;

    #[test]
    fn json_roundtrip() {
        let oid = ObjectId::from_hex("a9993e364706816aba3e25717850c26c9cd0d89d").unwrap();
        let json = serde_json::to_string(&oid).unwrap();
        assert_eq!(json, "\"a9993e364706816aba3e25717850c26c9cd0d89d\"");
        let back: ObjectId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, oid);
    }
}
