use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// An access-token record.
///
/// Only SHA-256 digests of the two secrets are persisted; the plaintext pair
/// is shown once at issuance and never retrievable again. The access secret
/// has no tracked expiry of its own — a record dies by being superseded at
/// login, rotated at refresh, or aging past `refresh_token_expires_at`.
#[derive(Debug, FromRow)]
pub struct Token {
    pub id: Uuid,
    pub user_id: i32,
    /// SHA-256 hex digest of the access secret.
    pub token_hash: String,
    /// SHA-256 hex digest of the paired single-use refresh secret.
    pub refresh_token_hash: String,
    pub refresh_token_expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}
