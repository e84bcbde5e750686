//! Preview tokens for sharing unpublished versions.
//!
//! A preview token is an opaque random string handed out once. Only its
//! SHA-256 hash is stored, so a database leak does not expose working links.

use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::error::CoreError;
use crate::types::Timestamp;

/// Length of a plaintext token: two simple-format UUIDs (hex, no hyphens).
pub const TOKEN_LENGTH: usize = 64;

/// Generate a new preview token.
///
/// Returns `(plaintext_token, sha256_hex_hash)`. The plaintext goes to the
/// caller; only the hash is persisted.
pub fn generate_preview_token() -> (String, String) {
    let plaintext = format!("{}{}", Uuid::new_v4().simple(), Uuid::new_v4().simple());
    let hash = hash_preview_token(&plaintext);
    (plaintext, hash)
}

/// Compute the SHA-256 hex digest of a preview token.
pub fn hash_preview_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Reject tokens that could not have been issued by [`generate_preview_token`].
pub fn validate_token_format(token: &str) -> Result<(), CoreError> {
    let well_formed = token.len() == TOKEN_LENGTH
        && token
            .chars()
            .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c));
    if !well_formed {
        return Err(CoreError::Validation("Malformed preview token".into()));
    }
    Ok(())
}

/// Expiry timestamp for a token issued at `now` with the given lifetime.
pub fn expires_at(now: Timestamp, ttl_hours: i64) -> Timestamp {
    now + chrono::Duration::hours(ttl_hours)
}
