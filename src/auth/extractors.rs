use actix_web::dev::Payload;
use actix_web::{Error as ActixError, FromRequest, HttpMessage, HttpRequest};
use std::future::{ready, Ready};

use crate::auth::middleware::INVALID_AUTH_TOKEN_MESSAGE;
use crate::auth::token::Claims;
use crate::error::AppError;

/// The verified session of the caller, read from request extensions.
///
/// Only available on routes wrapped in `AuthMiddleware`, which inserts the
/// decoded [`Claims`]. Without them extraction fails with a 403.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub Claims);

impl FromRequest for AuthenticatedUser {
    type Error = ActixError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        match req.extensions().get::<Claims>().cloned() {
            Some(claims) => ready(Ok(AuthenticatedUser(claims))),
            None => {
                let err = AppError::Forbidden(INVALID_AUTH_TOKEN_MESSAGE.into());
                ready(Err(err.into()))
            }
        }
    }
}
