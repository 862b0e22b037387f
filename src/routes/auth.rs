use crate::{
    auth::{session, LoginRequest, RefreshRequest},
    error::AppError,
};
use actix_web::{post, web, HttpResponse, Responder};
use sqlx::PgPool;
use validator::Validate;

/// Authenticate with email and password.
///
/// A successful login revokes every token previously issued to the user and
/// responds with a fresh access/refresh pair. The pair is shown once; only
/// digests are stored.
///
/// ## Responses:
/// - `200 OK`: `{access_token, refresh_token, token_type, expires_in}`.
/// - `422 Unprocessable Entity`: invalid payload, unknown email or wrong
///   password — the latter two share one generic message.
#[post("/login")]
pub async fn login(
    pool: web::Data<PgPool>,
    login_data: web::Json<LoginRequest>,
) -> Result<impl Responder, AppError> {
    login_data.validate()?;

    let tokens = session::login(&pool, &login_data).await?;

    Ok(HttpResponse::Ok().json(tokens))
}

/// Exchange a refresh token for a new access/refresh pair.
///
/// The presented refresh token is consumed: reusing it, or the access token
/// it was paired with, fails afterwards. Other sessions of the same user are
/// not affected.
///
/// ## Responses:
/// - `200 OK`: a new token pair.
/// - `401 Unauthorized`: unknown or expired refresh token (one shared
///   message for both).
/// - `422 Unprocessable Entity`: missing `refresh_token` field value.
#[post("/refresh")]
pub async fn refresh(
    pool: web::Data<PgPool>,
    refresh_data: web::Json<RefreshRequest>,
) -> Result<impl Responder, AppError> {
    refresh_data.validate()?;

    let tokens = session::refresh(&pool, &refresh_data).await?;

    Ok(HttpResponse::Ok().json(tokens))
}
