// src/handlers/analysis.rs

use std::sync::Arc;

use axum::{Extension, Json, extract::State, response::IntoResponse};

use crate::{
    config::Config,
    models::user::User,
    services::{dashboard, exam_store::ExamStore},
};

/// Exam count and average net of the caller.
pub async fn get_dashboard(
    State(store): State<Arc<ExamStore>>,
    Extension(user): Extension<User>,
) -> impl IntoResponse {
    let exams = store.list_exams_for_user(&user.id, None).await;
    Json(dashboard::summarize(&exams))
}

/// Per-subject totals and trend of the caller.
pub async fn get_lessons(
    State(store): State<Arc<ExamStore>>,
    State(config): State<Config>,
    Extension(user): Extension<User>,
) -> impl IntoResponse {
    let exams = store.list_exams_for_user(&user.id, None).await;
    Json(dashboard::lesson_breakdown(&exams, config.trend_window))
}
