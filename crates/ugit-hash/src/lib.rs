//! SHA-1 object identity for the ugit version-control engine.
//!
//! Provides the [`ObjectId`] type (40-char lowercase hex), hex
//! encoding/decoding, and the streaming [`Hasher`] used to address objects
//! by content.

mod error;
pub mod hasher;
pub mod hex;
mod oid;

pub use error::HashError;
pub use hasher::Hasher;
pub use oid::ObjectId;
