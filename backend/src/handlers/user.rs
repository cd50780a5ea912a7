// src/handlers/user.rs

use axum::{Extension, Json, response::IntoResponse};

use crate::models::user::User;

/// Returns the user the bearer token resolved to.
pub async fn get_me(Extension(user): Extension<User>) -> impl IntoResponse {
    Json(user)
}
