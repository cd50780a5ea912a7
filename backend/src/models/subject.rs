// src/models/subject.rs

use serde::Serialize;

use super::exam_record::SubjectResult;
use super::user::{AytField, ExamType};

/// One section of an exam booklet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Subject {
    /// Stored as `SubjectResult::lesson`.
    pub key: &'static str,
    /// Display label.
    pub label: &'static str,
    pub max_questions: u32,
}

const fn subject(key: &'static str, label: &'static str, max_questions: u32) -> Subject {
    Subject {
        key,
        label,
        max_questions,
    }
}

const TYT_SUBJECTS: &[Subject] = &[
    subject("Turkish", "Türkçe", 40),
    subject("Social Sciences", "Sosyal Bilimler", 20),
    subject("Basic Mathematics", "Temel Matematik", 40),
    subject("Science", "Fen Bilimleri", 20),
];

const AYT_SAYISAL: &[Subject] = &[
    subject("Mathematics", "Matematik", 40),
    subject("Physics", "Fizik", 14),
    subject("Chemistry", "Kimya", 13),
    subject("Biology", "Biyoloji", 13),
];

const AYT_ESIT_AGIRLIK: &[Subject] = &[
    subject("Mathematics", "Matematik", 40),
    subject("Literature", "Edebiyat", 24),
    subject("History", "Tarih", 10),
    subject("Geography", "Coğrafya", 6),
];

const AYT_SOZEL: &[Subject] = &[
    subject("Literature", "Edebiyat", 24),
    subject("History", "Tarih", 10),
    subject("Geography", "Coğrafya", 24),
    subject("Philosophy", "Felsefe", 12),
];

const AYT_DIL: &[Subject] = &[subject("Foreign Language", "Yabancı Dil", 80)];

/// Subjects of a booklet. AYT without a field has none.
pub fn subjects_for(exam_type: ExamType, ayt_field: Option<AytField>) -> &'static [Subject] {
    match (exam_type, ayt_field) {
        (ExamType::Tyt, _) => TYT_SUBJECTS,
        (ExamType::Ayt, Some(AytField::Sayisal)) => AYT_SAYISAL,
        (ExamType::Ayt, Some(AytField::EsitAgirlik)) => AYT_ESIT_AGIRLIK,
        (ExamType::Ayt, Some(AytField::Sozel)) => AYT_SOZEL,
        (ExamType::Ayt, Some(AytField::Dil)) => AYT_DIL,
        (ExamType::Ayt, None) => &[],
    }
}

/// Rounds to two decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Net score: every four wrong answers cancel one correct answer.
pub fn net_score(correct: u32, wrong: u32) -> f64 {
    round2(correct as f64 - wrong as f64 / 4.0)
}

/// Which count the student typed last; the other one is left alone when
/// the total has to be clamped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditedField {
    Correct,
    Wrong,
}

impl SubjectResult {
    /// Builds a result from raw counts, clamped to the subject size.
    ///
    /// If `correct + wrong` exceeds `max_questions`, the overflow is taken
    /// from `edited` and `empty` becomes zero.
    pub fn from_counts(
        lesson: &str,
        mut correct: u32,
        mut wrong: u32,
        max_questions: u32,
        edited: EditedField,
    ) -> Self {
        let total = correct.saturating_add(wrong);
        if total > max_questions {
            let excess = total - max_questions;
            match edited {
                EditedField::Correct => correct = correct.saturating_sub(excess),
                EditedField::Wrong => wrong = wrong.saturating_sub(excess),
            }
        }
        // Both inputs may exceed the size on their own.
        correct = correct.min(max_questions);
        wrong = wrong.min(max_questions - correct);

        SubjectResult {
            lesson: lesson.to_string(),
            correct,
            wrong,
            empty: max_questions - correct - wrong,
            net: net_score(correct, wrong),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn net_penalizes_a_quarter_per_wrong_answer() {
        assert_eq!(net_score(30, 8), 28.0);
        assert_eq!(net_score(10, 3), 9.25);
        assert_eq!(net_score(0, 5), -1.25);
        assert_eq!(net_score(0, 0), 0.0);
    }

    #[test]
    fn from_counts_fills_empty_for_every_valid_split() {
        let max = 20;
        for correct in 0..=max {
            for wrong in 0..=(max - correct) {
                let r = SubjectResult::from_counts("Science", correct, wrong, max, EditedField::Wrong);
                assert_eq!(r.correct, correct);
                assert_eq!(r.wrong, wrong);
                assert_eq!(r.empty, max - correct - wrong);
                assert_eq!(r.net, round2(correct as f64 - wrong as f64 / 4.0));
            }
        }
    }

    #[test]
    fn from_counts_clamps_the_edited_field() {
        let r = SubjectResult::from_counts("Physics", 10, 8, 14, EditedField::Wrong);
        assert_eq!((r.correct, r.wrong, r.empty), (10, 4, 0));
        assert_eq!(r.net, 9.0);

        let r = SubjectResult::from_counts("Physics", 10, 8, 14, EditedField::Correct);
        assert_eq!((r.correct, r.wrong, r.empty), (6, 8, 0));
        assert_eq!(r.net, 4.0);

        let r = SubjectResult::from_counts("Physics", 99, 0, 14, EditedField::Wrong);
        assert_eq!((r.correct, r.wrong, r.empty), (14, 0, 0));
    }

    #[test]
    fn from_counts_survives_counts_near_u32_max() {
        let r = SubjectResult::from_counts("Physics", u32::MAX, 1, 14, EditedField::Wrong);
        assert_eq!((r.correct, r.wrong, r.empty), (14, 0, 0));

        let r = SubjectResult::from_counts("Physics", u32::MAX, u32::MAX, 14, EditedField::Correct);
        assert_eq!((r.correct, r.wrong, r.empty), (14, 0, 0));
        assert_eq!(r.net, 14.0);
    }

    #[test]
    fn catalogue_matches_booklets() {
        let tyt: u32 = subjects_for(ExamType::Tyt, None)
            .iter()
            .map(|s| s.max_questions)
            .sum();
        assert_eq!(tyt, 120);

        assert_eq!(subjects_for(ExamType::Ayt, Some(AytField::Dil))[0].max_questions, 80);
        assert_eq!(subjects_for(ExamType::Ayt, Some(AytField::Sozel)).len(), 4);
        assert!(subjects_for(ExamType::Ayt, None).is_empty());
    }
}
