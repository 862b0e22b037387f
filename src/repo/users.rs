use sqlx::PgExecutor;

use crate::models::UserCredentials;

/// Looks up the credential projection for a login attempt.
pub async fn find_by_email(
    ex: impl PgExecutor<'_>,
    email: &str,
) -> Result<Option<UserCredentials>, sqlx::Error> {
    sqlx::query_as::<_, UserCredentials>("SELECT id, password_hash FROM users WHERE email = $1")
        .bind(email)
        .fetch_optional(ex)
        .await
}
