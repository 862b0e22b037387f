//! Bearer-token validation middleware for the `/api` scope.
//!
//! Resolving a token requires a database lookup, so the service keeps the
//! inner service behind an `Rc` and runs the whole call in one boxed future.
//! Rejections are rendered here as envelope-shaped 401 responses rather than
//! bubbled as service errors.

use std::rc::Rc;

use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    error::ResponseError,
    http::header,
    web, Error, HttpMessage,
};
use futures::future::{ready, LocalBoxFuture, Ready};
use sqlx::PgPool;

use crate::auth::extractors::AuthenticatedUser;
use crate::auth::token::{hash_secret, split_access_token};
use crate::error::AppError;
use crate::repo::tokens;

/// Paths served without a bearer token.
const PUBLIC_PATHS: [&str; 3] = ["/health", "/api/login", "/api/refresh"];

pub struct AuthMiddleware;

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = AuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service: Rc::new(service),
        }))
    }
}

pub struct AuthMiddlewareService<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);

        Box::pin(async move {
            if PUBLIC_PATHS.contains(&req.path()) {
                return service
                    .call(req)
                    .await
                    .map(|res| res.map_into_left_body());
            }

            let bearer = req
                .headers()
                .get(header::AUTHORIZATION)
                .and_then(|value| value.to_str().ok())
                .and_then(|value| value.strip_prefix("Bearer "))
                .map(str::to_owned);

            let pool = req.app_data::<web::Data<PgPool>>().cloned();

            let auth_result = match (bearer, pool) {
                (Some(bearer), Some(pool)) => resolve_bearer(&pool, &bearer).await,
                (None, _) => Err(AppError::Unauthorized("Missing bearer token".into())),
                (_, None) => Err(AppError::InternalServerError(
                    "Database pool not configured".into(),
                )),
            };

            match auth_result {
                Ok(user_id) => {
                    req.extensions_mut().insert(AuthenticatedUser(user_id));
                    service
                        .call(req)
                        .await
                        .map(|res| res.map_into_left_body())
                }
                Err(err) => {
                    let response = err.error_response().map_into_right_body();
                    Ok(req.into_response(response))
                }
            }
        })
    }
}

/// Maps a presented `"{id}|{secret}"` bearer value to the owning user.
///
/// The record is addressed by its id and the secret is compared by digest,
/// so storage never learns the plaintext.
async fn resolve_bearer(pool: &PgPool, raw: &str) -> Result<i32, AppError> {
    let (token_id, secret) = split_access_token(raw)
        .ok_or_else(|| AppError::Unauthorized("Malformed bearer token".into()))?;

    let record = tokens::find_by_id(pool, token_id)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Unknown token".into()))?;

    if record.token_hash != hash_secret(secret) {
        return Err(AppError::Unauthorized("Token digest mismatch".into()));
    }

    Ok(record.user_id)
}
