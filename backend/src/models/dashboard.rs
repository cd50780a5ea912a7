// src/models/dashboard.rs

use serde::{Deserialize, Serialize};

/// Headline figures for the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub total_exams: usize,
    /// Mean of `totalNet`, 0 when there are no exams.
    pub avg_net: f64,
    pub best_net: Option<f64>,
    /// `totalNet` of the most recently added exam.
    pub last_net: Option<f64>,
}

/// Aggregated performance in one subject across exams.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LessonStats {
    pub lesson: String,
    /// Number of exams containing this subject.
    pub exams: usize,
    pub correct: u64,
    pub wrong: u64,
    pub empty: u64,
    pub total_net: f64,
    pub avg_net: f64,
    /// Average net of the latest window minus the window before it.
    pub trend: Option<f64>,
}
