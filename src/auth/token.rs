//! Opaque bearer token material.
//!
//! Access tokens travel as `"{token_id}|{secret}"` so validation is a
//! primary-key lookup plus a digest comparison. Refresh tokens are bare
//! random strings. Neither secret is ever persisted in plaintext; storage
//! holds SHA-256 hex digests only.

use rand::{distributions::Alphanumeric, Rng};
use sha2::{Digest, Sha256};
use uuid::Uuid;

/// Advertised in every token response. Not enforced server-side: an access
/// token lives until its record is revoked or rotated.
pub const ACCESS_TOKEN_EXPIRES_IN_SECS: u64 = 3600;

/// Refresh tokens expire 30 days after issuance.
pub const REFRESH_TOKEN_TTL_DAYS: i64 = 30;

pub const TOKEN_TYPE: &str = "Bearer";

/// Length of the random access secret (the part after `|`).
pub const ACCESS_SECRET_LEN: usize = 40;

/// Length of the random refresh secret.
pub const REFRESH_SECRET_LEN: usize = 64;

/// Generates a random alphanumeric secret of the given length.
pub fn random_secret(len: usize) -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}

/// SHA-256 hex digest of a secret, the only form that touches storage.
pub fn hash_secret(secret: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(secret.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Builds the plaintext access token handed to the client.
pub fn compose_access_token(token_id: Uuid, secret: &str) -> String {
    format!("{}|{}", token_id, secret)
}

/// Splits a presented access token back into record id and secret.
/// Returns `None` for anything that does not look like `"{uuid}|{secret}"`.
pub fn split_access_token(raw: &str) -> Option<(Uuid, &str)> {
    let (id_part, secret) = raw.split_once('|')?;
    if secret.is_empty() {
        return None;
    }
    let token_id = Uuid::parse_str(id_part).ok()?;
    Some((token_id, secret))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_random_secret_length_and_charset() {
        let secret = random_secret(REFRESH_SECRET_LEN);
        assert_eq!(secret.len(), 64);
        assert!(secret.chars().all(|c| c.is_ascii_alphanumeric()));

        // Two draws colliding would mean the generator is broken.
        assert_ne!(secret, random_secret(REFRESH_SECRET_LEN));
    }

    #[test]
    fn test_hash_secret_is_stable_hex() {
        let digest = hash_secret("some-secret");
        assert_eq!(digest.len(), 64);
        assert_eq!(digest, hash_secret("some-secret"));
        assert_ne!(digest, hash_secret("other-secret"));
    }

    #[test]
    fn test_access_token_round_trip() {
        let token_id = Uuid::new_v4();
        let secret = random_secret(ACCESS_SECRET_LEN);
        let raw = compose_access_token(token_id, &secret);

        let (parsed_id, parsed_secret) = split_access_token(&raw).unwrap();
        assert_eq!(parsed_id, token_id);
        assert_eq!(parsed_secret, secret);
    }

    #[test]
    fn test_split_rejects_malformed_tokens() {
        assert!(split_access_token("no-separator").is_none());
        assert!(split_access_token("not-a-uuid|secret").is_none());
        assert!(split_access_token(&format!("{}|", Uuid::new_v4())).is_none());
        assert!(split_access_token("").is_none());
    }
}
