// src/models/user.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// The two stages of the university entrance exam.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExamType {
    Tyt,
    Ayt,
}

/// AYT sub-field track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AytField {
    /// Quantitative.
    Sayisal,
    /// Mixed (equal weight).
    EsitAgirlik,
    /// Verbal.
    Sozel,
    /// Foreign language.
    Dil,
}

/// A registered identity. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,

    /// Unique, used as the lookup key.
    pub email: String,

    pub name: String,

    pub exam_type: ExamType,

    /// Only meaningful for AYT students.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ayt_field: Option<AytField>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// DTO for user login.
#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, max = 254))]
    pub email: String,
    #[validate(length(min = 1, max = 128))]
    pub password: String,
}

/// DTO for creating a new user (Registration).
#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = validate_track))]
pub struct RegisterRequest {
    #[validate(length(
        min = 1,
        max = 100,
        message = "Name length must be between 1 and 100 characters."
    ))]
    pub name: String,
    #[validate(email(message = "Email address is not valid."))]
    pub email: String,
    #[validate(length(
        min = 6,
        max = 128,
        message = "Password length must be between 6 and 128 characters."
    ))]
    pub password: String,
    pub exam_type: ExamType,
    #[serde(default)]
    pub ayt_field: Option<AytField>,
}

fn validate_track(req: &RegisterRequest) -> Result<(), ValidationError> {
    if req.exam_type == ExamType::Ayt && req.ayt_field.is_none() {
        return Err(ValidationError::new("ayt_field_required"));
    }
    Ok(())
}

/// Returned by login and registration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub access_token: String,
    pub user: User,
}
