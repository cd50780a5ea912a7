// src/models/exam_record.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use super::subject::{net_score, round2};
use super::user::{AytField, ExamType};

/// One exam attempt, as persisted in the `exams` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExamRecord {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub exam_type: ExamType,
    pub created_at: DateTime<Utc>,
    pub user_id: String,
    /// Always the sum of `results[*].net`, recomputed by the store.
    pub total_net: f64,
    pub results: Vec<SubjectResult>,
}

/// Per-subject counts of an exam attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubjectResult {
    pub lesson: String,
    pub correct: u32,
    pub wrong: u32,
    pub empty: u32,
    pub net: f64,
}

/// Subject result as submitted by a client. `net` may be left out.
///
/// Counts are capped well above the largest booklet section (80).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct SubjectResultInput {
    #[serde(default)]
    pub lesson: String,
    #[serde(default)]
    #[validate(range(max = 200))]
    pub correct: u32,
    #[serde(default)]
    #[validate(range(max = 200))]
    pub wrong: u32,
    #[serde(default)]
    #[validate(range(max = 200))]
    pub empty: u32,
    #[serde(default)]
    pub net: Option<f64>,
}

impl SubjectResultInput {
    /// The submitted net, or `correct - wrong/4` when none was given.
    pub fn resolved_net(&self) -> f64 {
        self.net.unwrap_or_else(|| net_score(self.correct, self.wrong))
    }
}

impl From<SubjectResultInput> for SubjectResult {
    fn from(input: SubjectResultInput) -> Self {
        let net = input.resolved_net();
        SubjectResult {
            lesson: input.lesson,
            correct: input.correct,
            wrong: input.wrong,
            empty: input.empty,
            net,
        }
    }
}

impl From<SubjectResult> for SubjectResultInput {
    fn from(result: SubjectResult) -> Self {
        SubjectResultInput {
            lesson: result.lesson,
            correct: result.correct,
            wrong: result.wrong,
            empty: result.empty,
            net: Some(result.net),
        }
    }
}

/// Sum of the subject nets, rounded to two decimals.
pub fn total_net(results: &[SubjectResult]) -> f64 {
    round2(results.iter().map(|r| r.net).sum())
}

/// Everything the store needs to create a record; id, timestamp and
/// total are assigned by the store.
#[derive(Debug, Clone, PartialEq)]
pub struct NewExam {
    pub name: String,
    pub exam_type: ExamType,
    pub results: Vec<SubjectResultInput>,
    pub user_id: String,
}

/// DTO for submitting an exam result.
///
/// A client-supplied `totalNet` is accepted for compatibility and ignored.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = validate_track))]
pub struct CreateExamRequest {
    #[validate(custom(function = validate_exam_name))]
    pub name: String,
    #[serde(rename = "type")]
    pub exam_type: ExamType,
    #[serde(default)]
    pub ayt_field: Option<AytField>,
    #[validate(nested, length(max = 16, message = "Too many subject results."))]
    pub results: Vec<SubjectResultInput>,
    #[serde(default)]
    pub total_net: Option<f64>,
}

fn validate_exam_name(name: &str) -> Result<(), ValidationError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::new("exam_name_required"));
    }
    if trimmed.chars().count() > 100 {
        return Err(ValidationError::new("exam_name_too_long"));
    }
    // Names are stored and served as plain text.
    if trimmed.contains(['<', '>']) {
        return Err(ValidationError::new("exam_name_markup"));
    }
    Ok(())
}

fn validate_track(req: &CreateExamRequest) -> Result<(), ValidationError> {
    if req.exam_type == ExamType::Ayt && req.ayt_field.is_none() {
        return Err(ValidationError::new("ayt_field_required"));
    }
    Ok(())
}

/// Query params for listing exams.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExamListParams {
    #[serde(rename = "type")]
    pub exam_type: Option<ExamType>,
}

/// Query params for the subject catalogue.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectParams {
    #[serde(rename = "type")]
    pub exam_type: ExamType,
    pub ayt_field: Option<AytField>,
}
