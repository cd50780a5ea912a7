// src/handlers/auth.rs

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use validator::Validate;

use crate::{
    error::AppError,
    models::user::{LoginRequest, RegisterRequest},
    services::identity::IdentityApi,
};

/// Registers a new user.
///
/// Returns 201 Created with the access token and the new user.
/// An email that is already registered yields 409 Conflict.
pub async fn register(
    State(identity): State<IdentityApi>,
    Json(payload): Json<RegisterRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    let response = identity.register(&payload).await?;

    Ok((StatusCode::CREATED, Json(response)))
}

/// Authenticates a user and returns their bearer token.
pub async fn login(
    State(identity): State<IdentityApi>,
    Json(payload): Json<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    let response = identity.login(&payload).await?;

    Ok(Json(response))
}
