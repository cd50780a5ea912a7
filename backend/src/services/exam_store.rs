// src/services/exam_store.rs

use std::sync::Arc;

use chrono::Utc;
use rand::Rng;
use tokio::sync::Mutex;

use crate::{
    config::EXAMS_KEY,
    models::{
        exam_record::{ExamRecord, NewExam, SubjectResult, total_net},
        user::ExamType,
    },
    storage::KeyValueStore,
};

/// Exam Record Store.
///
/// Owns the serialized exam collection under `EXAMS_KEY`. Reads go straight
/// to storage; every mutation takes the write gate for its whole
/// read-modify-write, so there is never more than one write in flight and
/// concurrent adds cannot overwrite each other.
///
/// Storage failures never reach the caller: a failed read yields an empty
/// collection and a failed write is logged and dropped.
pub struct ExamStore {
    storage: Arc<dyn KeyValueStore>,
    write_gate: Mutex<()>,
}

impl ExamStore {
    pub fn new(storage: Arc<dyn KeyValueStore>) -> Self {
        Self {
            storage,
            write_gate: Mutex::new(()),
        }
    }

    /// Returns every record in storage order (newest first).
    pub async fn list_exams(&self) -> Vec<ExamRecord> {
        let raw = match self.storage.get(EXAMS_KEY).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                tracing::error!("Failed to read exams: {:?}", e);
                return Vec::new();
            }
        };

        serde_json::from_str(&raw).unwrap_or_else(|e| {
            tracing::error!("Failed to parse stored exams: {}", e);
            Vec::new()
        })
    }

    /// Records belonging to `user_id`, optionally restricted to one exam type.
    pub async fn list_exams_for_user(
        &self,
        user_id: &str,
        exam_type: Option<ExamType>,
    ) -> Vec<ExamRecord> {
        self.list_exams()
            .await
            .into_iter()
            .filter(|e| e.user_id == user_id)
            .filter(|e| exam_type.is_none_or(|t| e.exam_type == t))
            .collect()
    }

    pub async fn get_exam(&self, id: &str) -> Option<ExamRecord> {
        self.list_exams().await.into_iter().find(|e| e.id == id)
    }

    /// Creates a record and prepends it to the collection.
    ///
    /// `totalNet` is always recomputed from the subject nets; a subject
    /// without a net counts as `correct - wrong/4`.
    pub async fn add_exam(&self, new_exam: NewExam) -> ExamRecord {
        let _guard = self.write_gate.lock().await;

        let mut exams = self.list_exams().await;

        let results: Vec<SubjectResult> = new_exam.results.into_iter().map(Into::into).collect();
        let record = ExamRecord {
            id: generate_id(),
            name: new_exam.name,
            exam_type: new_exam.exam_type,
            created_at: Utc::now(),
            user_id: new_exam.user_id,
            total_net: total_net(&results),
            results,
        };

        exams.insert(0, record.clone());
        self.write(&exams).await;

        tracing::info!(
            "Exam {} added for user {} (total net {})",
            record.id,
            record.user_id,
            record.total_net
        );
        record
    }

    /// Replaces the whole collection.
    pub async fn save_exams(&self, records: &[ExamRecord]) {
        let _guard = self.write_gate.lock().await;
        self.write(records).await;
    }

    /// Removes the record `id` if it belongs to `user_id`.
    /// Returns whether a record was removed.
    pub async fn delete_exam(&self, user_id: &str, id: &str) -> bool {
        let _guard = self.write_gate.lock().await;

        let mut exams = self.list_exams().await;
        let before = exams.len();
        exams.retain(|e| !(e.id == id && e.user_id == user_id));

        if exams.len() == before {
            return false;
        }

        self.write(&exams).await;
        true
    }

    // Callers must hold the write gate.
    async fn write(&self, records: &[ExamRecord]) {
        let raw = match serde_json::to_string(records) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::error!("Failed to serialize exams: {}", e);
                return;
            }
        };

        if let Err(e) = self.storage.set(EXAMS_KEY, &raw).await {
            tracing::error!("Failed to save exams: {:?}", e);
        }
    }
}

/// `<unix millis>_<random suffix below one million>`.
fn generate_id() -> String {
    let suffix: u32 = rand::thread_rng().gen_range(0..1_000_000);
    format!("{}_{}", Utc::now().timestamp_millis(), suffix)
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use async_trait::async_trait;

    use super::*;
    use crate::{error::AppError, models::exam_record::SubjectResultInput, storage::MemoryStore};

    fn candidate(user_id: &str, nets: &[f64]) -> NewExam {
        NewExam {
            name: "Deneme".to_string(),
            exam_type: ExamType::Tyt,
            results: nets
                .iter()
                .map(|n| SubjectResultInput {
                    lesson: "Turkish".to_string(),
                    net: Some(*n),
                    ..Default::default()
                })
                .collect(),
            user_id: user_id.to_string(),
        }
    }

    fn store() -> ExamStore {
        ExamStore::new(Arc::new(MemoryStore::new()))
    }

    /// Storage where every call fails.
    struct BrokenStore;

    #[async_trait]
    impl KeyValueStore for BrokenStore {
        async fn get(&self, _key: &str) -> Result<Option<String>, AppError> {
            Err(AppError::StorageReadFailure("disk gone".to_string()))
        }

        async fn set(&self, _key: &str, _value: &str) -> Result<(), AppError> {
            Err(AppError::StorageWriteFailure("disk gone".to_string()))
        }

        async fn remove(&self, _key: &str) -> Result<(), AppError> {
            Err(AppError::StorageWriteFailure("disk gone".to_string()))
        }
    }

    /// Memory storage that sleeps between read and write paths.
    struct SlowStore(MemoryStore);

    #[async_trait]
    impl KeyValueStore for SlowStore {
        async fn get(&self, key: &str) -> Result<Option<String>, AppError> {
            tokio::time::sleep(Duration::from_millis(5)).await;
            self.0.get(key).await
        }

        async fn set(&self, key: &str, value: &str) -> Result<(), AppError> {
            tokio::time::sleep(Duration::from_millis(5)).await;
            self.0.set(key, value).await
        }

        async fn remove(&self, key: &str) -> Result<(), AppError> {
            self.0.remove(key).await
        }
    }

    #[tokio::test]
    async fn empty_storage_lists_nothing() {
        assert!(store().list_exams().await.is_empty());
    }

    #[tokio::test]
    async fn corrupt_blob_reads_as_empty() {
        let storage = Arc::new(MemoryStore::new());
        storage.set(EXAMS_KEY, "{not json").await.unwrap();
        let store = ExamStore::new(storage.clone());
        assert!(store.list_exams().await.is_empty());

        storage.set(EXAMS_KEY, r#"{"an":"object"}"#).await.unwrap();
        assert!(store.list_exams().await.is_empty());
    }

    #[tokio::test]
    async fn total_net_is_recomputed() {
        let store = store();
        let record = store.add_exam(candidate("1", &[2.5, -0.25])).await;
        assert_eq!(record.total_net, 2.25);
    }

    #[tokio::test]
    async fn missing_nets_use_the_formula() {
        let store = store();
        let mut new_exam = candidate("1", &[]);
        new_exam.results = vec![
            SubjectResultInput {
                lesson: "Turkish".to_string(),
                correct: 30,
                wrong: 6,
                empty: 4,
                net: None,
            },
            SubjectResultInput {
                lesson: "Science".to_string(),
                correct: 10,
                wrong: 1,
                empty: 9,
                net: None,
            },
        ];

        let record = store.add_exam(new_exam).await;
        assert_eq!(record.results[0].net, 28.5);
        assert_eq!(record.results[1].net, 9.75);
        assert_eq!(record.total_net, 38.25);
    }

    #[tokio::test]
    async fn adding_twice_creates_two_distinct_records() {
        let store = store();
        let first = store.add_exam(candidate("1", &[5.0])).await;
        let second = store.add_exam(candidate("1", &[5.0])).await;

        assert_ne!(first.id, second.id);
        assert!(second.created_at >= first.created_at);

        let all = store.list_exams().await;
        assert_eq!(all.len(), 2);
        // Newest first
        assert_eq!(all[0].id, second.id);
        assert_eq!(all[1].id, first.id);
    }

    #[tokio::test]
    async fn save_then_list_round_trips() {
        let store = store();
        let a = store.add_exam(candidate("1", &[1.0])).await;
        let b = store.add_exam(candidate("2", &[3.75])).await;

        let fresh = ExamStore::new(Arc::new(MemoryStore::new()));
        fresh.save_exams(&[a.clone(), b.clone()]).await;
        assert_eq!(fresh.list_exams().await, vec![a, b]);
    }

    #[tokio::test]
    async fn concurrent_adds_are_not_lost() {
        let store = Arc::new(ExamStore::new(Arc::new(SlowStore(MemoryStore::new()))));

        let mut tasks = tokio::task::JoinSet::new();
        for i in 0..10 {
            let store = store.clone();
            tasks.spawn(async move { store.add_exam(candidate("1", &[i as f64])).await });
        }
        while let Some(res) = tasks.join_next().await {
            res.unwrap();
        }

        assert_eq!(store.list_exams().await.len(), 10);
    }

    #[tokio::test]
    async fn storage_failures_degrade_silently() {
        let store = ExamStore::new(Arc::new(BrokenStore));
        assert!(store.list_exams().await.is_empty());

        let record = store.add_exam(candidate("1", &[4.0])).await;
        assert_eq!(record.total_net, 4.0);
        assert!(store.get_exam(&record.id).await.is_none());
    }

    #[tokio::test]
    async fn filters_by_user_and_type() {
        let store = store();
        store.add_exam(candidate("1", &[1.0])).await;
        store.add_exam(candidate("2", &[2.0])).await;
        let mut ayt = candidate("1", &[3.0]);
        ayt.exam_type = ExamType::Ayt;
        store.add_exam(ayt).await;

        assert_eq!(store.list_exams_for_user("1", None).await.len(), 2);
        assert_eq!(
            store
                .list_exams_for_user("1", Some(ExamType::Ayt))
                .await
                .len(),
            1
        );
        assert!(store.list_exams_for_user("3", None).await.is_empty());
    }

    #[tokio::test]
    async fn delete_only_removes_own_records() {
        let store = store();
        let record = store.add_exam(candidate("1", &[1.0])).await;

        assert!(!store.delete_exam("2", &record.id).await);
        assert!(store.get_exam(&record.id).await.is_some());

        assert!(store.delete_exam("1", &record.id).await);
        assert!(store.get_exam(&record.id).await.is_none());
        assert!(!store.delete_exam("1", &record.id).await);
    }
}
