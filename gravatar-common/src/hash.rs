//! Identifier hashing.
//!
//! Gravatar addresses users by the SHA-256 of their normalized email, hex
//! encoded. The hash is what ends up in avatar URLs and profile endpoints, so
//! the raw address is never sent over the wire.

use sha2::{Digest, Sha256};

/// Length of a hex encoded identifier hash.
pub const HASH_HEX_LEN: usize = 64;

/// Trim surrounding whitespace and lowercase an email address.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Hash an email into the identifier Gravatar expects.
///
/// The email is normalized first, so `" Foo@Example.com "` and
/// `"foo@example.com"` produce the same 64-character lowercase hex string.
pub fn hash_email(email: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(normalize_email(email).as_bytes());
    hex::encode(hasher.finalize())
}

/// Returns true if `value` looks like an identifier hash (64 lowercase hex chars).
pub fn is_identifier_hash(value: &str) -> bool {
    value.len() == HASH_HEX_LEN
        && value
            .bytes()
            .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
}
