// src/services/dashboard.rs

//! Derived figures over a user's exams. Nothing here is stored; everything
//! is recomputed from the record list on each request.

use std::collections::BTreeMap;

use crate::models::{
    dashboard::{DashboardSummary, LessonStats},
    exam_record::{ExamRecord, SubjectResult},
    subject::round2,
};

/// Count and mean of `totalNet`. Expects records newest first.
pub fn summarize(records: &[ExamRecord]) -> DashboardSummary {
    let total_exams = records.len();
    let avg_net = if total_exams == 0 {
        0.0
    } else {
        round2(records.iter().map(|r| r.total_net).sum::<f64>() / total_exams as f64)
    };

    DashboardSummary {
        total_exams,
        avg_net,
        best_net: records.iter().map(|r| r.total_net).reduce(f64::max),
        last_net: records.first().map(|r| r.total_net),
    }
}

/// Per-subject totals across `records` (newest first), sorted by subject.
///
/// `trend` compares the mean net of the `window` latest attempts at a subject
/// with the mean of up to `window` attempts before them; `None` until there
/// is at least one earlier attempt.
pub fn lesson_breakdown(records: &[ExamRecord], window: usize) -> Vec<LessonStats> {
    let window = window.max(1);

    let mut by_lesson: BTreeMap<&str, Vec<&SubjectResult>> = BTreeMap::new();
    for record in records {
        for result in &record.results {
            by_lesson.entry(result.lesson.as_str()).or_default().push(result);
        }
    }

    by_lesson
        .into_iter()
        .map(|(lesson, results)| {
            let nets: Vec<f64> = results.iter().map(|r| r.net).collect();
            let total_net: f64 = nets.iter().sum();

            let trend = (nets.len() > window).then(|| {
                let prior_end = nets.len().min(window * 2);
                round2(mean(&nets[..window]) - mean(&nets[window..prior_end]))
            });

            LessonStats {
                lesson: lesson.to_string(),
                exams: results.len(),
                correct: results.iter().map(|r| u64::from(r.correct)).sum(),
                wrong: results.iter().map(|r| u64::from(r.wrong)).sum(),
                empty: results.iter().map(|r| u64::from(r.empty)).sum(),
                total_net: round2(total_net),
                avg_net: round2(mean(&nets)),
                trend,
            }
        })
        .collect()
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}
