//! Session orchestration: the login and refresh flows.
//!
//! Both flows end by issuing a fresh access/refresh pair, and both wrap
//! their revoke-then-issue writes in one transaction so a crash cannot leave
//! the revocation without the issuance.
//!
//! The two flows differ deliberately in revocation scope: login deletes
//! every token the user holds (one active session per login), refresh
//! deletes only the record being rotated, leaving any other session alone.

use chrono::{Duration, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::auth::password::verify_password;
use crate::auth::token::{
    compose_access_token, hash_secret, random_secret, ACCESS_SECRET_LEN,
    ACCESS_TOKEN_EXPIRES_IN_SECS, REFRESH_SECRET_LEN, REFRESH_TOKEN_TTL_DAYS, TOKEN_TYPE,
};
use crate::auth::{LoginRequest, RefreshRequest, TokenResponse};
use crate::error::AppError;
use crate::repo::{tokens, users};

/// Validates credentials, revokes every token the user holds and issues a
/// new pair.
///
/// An unknown email and a wrong password produce the same error so callers
/// cannot probe which addresses have accounts.
pub async fn login(pool: &PgPool, request: &LoginRequest) -> Result<TokenResponse, AppError> {
    let user = match users::find_by_email(pool, &request.email).await? {
        Some(user) => user,
        None => return Err(AppError::InvalidCredentials),
    };

    if !verify_password(&request.password, &user.password_hash)? {
        return Err(AppError::InvalidCredentials);
    }

    let mut tx = pool.begin().await?;
    tokens::revoke_all_for_user(&mut *tx, user.id).await?;
    let response = issue_pair(&mut *tx, user.id).await?;
    tx.commit().await?;

    log::debug!("issued new token pair for user {}", user.id);

    Ok(response)
}

/// Exchanges a refresh token for a new pair, consuming it.
///
/// The lookup goes through the stored digest and requires the expiry to be
/// strictly in the future; unknown and expired tokens get the same response.
/// Deleting the matched record also kills the access token it was paired
/// with — a refresh is a rotation, not a renewal.
pub async fn refresh(pool: &PgPool, request: &RefreshRequest) -> Result<TokenResponse, AppError> {
    let presented_hash = hash_secret(&request.refresh_token);
    let token = tokens::find_active_by_refresh_hash(pool, &presented_hash, Utc::now())
        .await?
        .ok_or(AppError::InvalidRefreshToken)?;

    let mut tx = pool.begin().await?;
    tokens::revoke(&mut *tx, token.id).await?;
    let response = issue_pair(&mut *tx, token.user_id).await?;
    tx.commit().await?;

    log::debug!("rotated token {} for user {}", token.id, token.user_id);

    Ok(response)
}

/// Creates one token record and returns the plaintext pair.
///
/// The plaintext secrets exist only in this return value; storage gets their
/// digests.
async fn issue_pair(
    ex: impl sqlx::PgExecutor<'_>,
    user_id: i32,
) -> Result<TokenResponse, AppError> {
    let token_id = Uuid::new_v4();
    let access_secret = random_secret(ACCESS_SECRET_LEN);
    let refresh_secret = random_secret(REFRESH_SECRET_LEN);
    let refresh_expires_at = Utc::now() + Duration::days(REFRESH_TOKEN_TTL_DAYS);

    tokens::insert(
        ex,
        token_id,
        user_id,
        &hash_secret(&access_secret),
        &hash_secret(&refresh_secret),
        refresh_expires_at,
    )
    .await?;

    Ok(TokenResponse {
        access_token: compose_access_token(token_id, &access_secret),
        refresh_token: refresh_secret,
        token_type: TOKEN_TYPE.to_string(),
        expires_in: ACCESS_TOKEN_EXPIRES_IN_SECS,
    })
}
