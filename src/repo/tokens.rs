//! Storage for access-token records.
//!
//! Callers hand in digests, never plaintext secrets; the revoke functions
//! delete rows outright (a revoked token leaves no trace beyond its absence).

use chrono::{DateTime, Utc};
use sqlx::PgExecutor;
use uuid::Uuid;

use crate::models::Token;

const TOKEN_COLUMNS: &str =
    "id, user_id, token_hash, refresh_token_hash, refresh_token_expires_at, created_at";

pub async fn insert(
    ex: impl PgExecutor<'_>,
    id: Uuid,
    user_id: i32,
    token_hash: &str,
    refresh_token_hash: &str,
    refresh_token_expires_at: DateTime<Utc>,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO tokens (id, user_id, token_hash, refresh_token_hash, refresh_token_expires_at) \
         VALUES ($1, $2, $3, $4, $5)",
    )
    .bind(id)
    .bind(user_id)
    .bind(token_hash)
    .bind(refresh_token_hash)
    .bind(refresh_token_expires_at)
    .execute(ex)
    .await?;

    Ok(())
}

pub async fn find_by_id(
    ex: impl PgExecutor<'_>,
    token_id: Uuid,
) -> Result<Option<Token>, sqlx::Error> {
    sqlx::query_as::<_, Token>(&format!(
        "SELECT {} FROM tokens WHERE id = $1",
        TOKEN_COLUMNS
    ))
    .bind(token_id)
    .fetch_optional(ex)
    .await
}

/// Finds the record a presented refresh token belongs to, requiring its
/// expiry to be strictly in the future. Expired and unknown digests are
/// indistinguishable here: both come back as `None`.
pub async fn find_active_by_refresh_hash(
    ex: impl PgExecutor<'_>,
    refresh_token_hash: &str,
    now: DateTime<Utc>,
) -> Result<Option<Token>, sqlx::Error> {
    sqlx::query_as::<_, Token>(&format!(
        "SELECT {} FROM tokens WHERE refresh_token_hash = $1 AND refresh_token_expires_at > $2",
        TOKEN_COLUMNS
    ))
    .bind(refresh_token_hash)
    .bind(now)
    .fetch_optional(ex)
    .await
}

/// Deletes every token the user holds. Login calls this to enforce a single
/// active session per login.
pub async fn revoke_all_for_user(
    ex: impl PgExecutor<'_>,
    user_id: i32,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM tokens WHERE user_id = $1")
        .bind(user_id)
        .execute(ex)
        .await?;

    Ok(result.rows_affected())
}

/// Deletes one token record. Refresh calls this for the record being
/// rotated, leaving the user's other sessions untouched.
pub async fn revoke(ex: impl PgExecutor<'_>, token_id: Uuid) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM tokens WHERE id = $1")
        .bind(token_id)
        .execute(ex)
        .await?;

    Ok(result.rows_affected())
}
