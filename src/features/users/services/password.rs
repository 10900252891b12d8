//! Password digests for stored credentials.
//!
//! Stored hashes are the uppercase hex SHA-256 of the UTF-8 password, with no
//! salt and a single round. This format is kept so existing accounts can still
//! log in; it is weak against offline guessing and should be migrated to an
//! adaptive, salted scheme before wider use.

use sha2::{Digest, Sha256};

/// Uppercase hex SHA-256 digest of the password
pub fn hash_password(password: &str) -> String {
    let digest = Sha256::digest(password.as_bytes());
    hex::encode_upper(digest)
}

/// Compare a candidate password with a stored digest, ignoring hex case
pub fn verify_password(candidate: &str, stored_hash: &str) -> bool {
    hash_password(candidate).eq_ignore_ascii_case(stored_hash)
}
