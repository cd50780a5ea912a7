// src/handlers/exam.rs

use std::sync::Arc;

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use validator::Validate;

use crate::{
    error::AppError,
    models::{
        exam_record::{CreateExamRequest, ExamListParams, NewExam, SubjectParams},
        subject::subjects_for,
        user::User,
    },
    services::exam_store::ExamStore,
};

/// Lists the caller's exams, newest first. `?type=TYT|AYT` narrows the list.
pub async fn list_exams(
    State(store): State<Arc<ExamStore>>,
    Extension(user): Extension<User>,
    Query(params): Query<ExamListParams>,
) -> impl IntoResponse {
    Json(store.list_exams_for_user(&user.id, params.exam_type).await)
}

/// Records a new exam attempt for the caller.
///
/// Any `totalNet` in the payload is ignored; the store recomputes it.
pub async fn create_exam(
    State(store): State<Arc<ExamStore>>,
    Extension(user): Extension<User>,
    Json(payload): Json<CreateExamRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    let record = store
        .add_exam(NewExam {
            name: payload.name.trim().to_string(),
            exam_type: payload.exam_type,
            results: payload.results,
            user_id: user.id,
        })
        .await;

    Ok((StatusCode::CREATED, Json(record)))
}

pub async fn get_exam(
    State(store): State<Arc<ExamStore>>,
    Extension(user): Extension<User>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let record = store
        .get_exam(&id)
        .await
        .filter(|e| e.user_id == user.id)
        .ok_or_else(|| AppError::NotFound(format!("Exam '{}' not found", id)))?;

    Ok(Json(record))
}

pub async fn delete_exam(
    State(store): State<Arc<ExamStore>>,
    Extension(user): Extension<User>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    if !store.delete_exam(&user.id, &id).await {
        return Err(AppError::NotFound(format!("Exam '{}' not found", id)));
    }

    Ok(StatusCode::NO_CONTENT)
}

/// Subject catalogue for a booklet, with the question count of each section.
pub async fn list_subjects(Query(params): Query<SubjectParams>) -> impl IntoResponse {
    Json(subjects_for(params.exam_type, params.ayt_field))
}
