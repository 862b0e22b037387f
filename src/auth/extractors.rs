use actix_web::dev::Payload;
use actix_web::{Error as ActixError, FromRequest, HttpMessage, HttpRequest};
use std::future::{ready, Ready};

use crate::error::AppError;

/// The authenticated user's id, taken from request extensions.
///
/// `AuthMiddleware` inserts this after resolving the bearer token; handlers
/// behind the middleware take it as an argument. If it is absent the
/// middleware did not run for this route, and rejecting with 401 is the safe
/// answer.
#[derive(Debug, Clone, Copy)]
pub struct AuthenticatedUser(pub i32);

impl FromRequest for AuthenticatedUser {
    type Error = ActixError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        match req.extensions().get::<AuthenticatedUser>().copied() {
            Some(user) => ready(Ok(user)),
            None => {
                let err =
                    AppError::Unauthorized("User id missing from request extensions".to_string());
                ready(Err(err.into()))
            }
        }
    }
}
