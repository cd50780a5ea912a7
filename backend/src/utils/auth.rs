// src/utils/auth.rs

use axum::{
    body::Body,
    extract::State,
    http::{Request, header},
    middleware::Next,
    response::Response,
};

use crate::{error::AppError, services::identity::IdentityApi};

/// Extracts the token from an `Authorization: Bearer <token>` header value.
pub fn bearer_token(header_value: &str) -> Option<&str> {
    header_value
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// Axum Middleware: Authentication.
///
/// Resolves the bearer token to a `User` and injects it into the request
/// extensions for handlers to use. A missing header or a token that does not
/// resolve yields 401 Unauthorized.
pub async fn auth_middleware(
    State(identity): State<IdentityApi>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let token = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(bearer_token)
        .ok_or_else(|| AppError::AuthError("Missing bearer token".to_string()))?;

    let user = identity.resolve(token).await?;

    req.extensions_mut().insert(user);
    Ok(next.run(req).await)
}
