use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::header::{self, HeaderMap},
    web, Error, HttpMessage,
};
use futures::future::{ready, LocalBoxFuture, Ready};

use crate::auth::token::Claims;
use crate::error::AppError;
use crate::state::AppState;

pub const INVALID_AUTH_TOKEN_MESSAGE: &str = "Invalid Auth Token!";

/// Rejects requests without a valid bearer token with 403.
///
/// On success the decoded [`Claims`] are inserted into the request extensions,
/// where [`AuthenticatedUser`](crate::auth::extractors::AuthenticatedUser) picks them up.
/// Verification uses the `JwtKeys` held in `web::Data<AppState>`.
pub struct AuthMiddleware;

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = AuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService { service }))
    }
}

pub struct AuthMiddlewareService<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let claims = match authenticate(&req) {
            Ok(claims) => claims,
            Err(app_err) => {
                log::warn!("rejected {} {}: {}", req.method(), req.path(), app_err);
                let res = req.error_response(app_err).map_into_right_body();
                return Box::pin(async move { Ok(res) });
            }
        };

        req.extensions_mut().insert(claims);
        let fut = self.service.call(req);
        Box::pin(async move { fut.await.map(ServiceResponse::map_into_left_body) })
    }
}

fn authenticate(req: &ServiceRequest) -> Result<Claims, AppError> {
    let state = req
        .app_data::<web::Data<AppState>>()
        .ok_or_else(|| AppError::InternalServerError("AppState is not registered".into()))?;

    let token = bearer_token(req.headers())
        .ok_or_else(|| AppError::Forbidden(INVALID_AUTH_TOKEN_MESSAGE.into()))?;

    state.keys.verify_token(token)
}

/// The token part of an `Authorization: Bearer <token>` header.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
}
