use std::sync::Arc;

use crate::config::Config;
use crate::services::{
    exam_store::ExamStore,
    identity::{IdentityApi, MockLatency, UserRepository},
};
use crate::storage::KeyValueStore;
use axum::extract::FromRef;

#[derive(Clone)]
pub struct AppState {
    pub exams: Arc<ExamStore>,
    pub identity: IdentityApi,
    pub config: Config,
}

impl AppState {
    pub fn new(
        config: Config,
        storage: Arc<dyn KeyValueStore>,
        users: Arc<dyn UserRepository>,
    ) -> Self {
        let latency = if config.mock_latency {
            MockLatency::realistic()
        } else {
            MockLatency::none()
        };

        Self {
            exams: Arc::new(ExamStore::new(storage)),
            identity: IdentityApi::new(users, latency),
            config,
        }
    }
}

impl FromRef<AppState> for Arc<ExamStore> {
    fn from_ref(state: &AppState) -> Self {
        state.exams.clone()
    }
}

impl FromRef<AppState> for IdentityApi {
    fn from_ref(state: &AppState) -> Self {
        state.identity.clone()
    }
}

impl FromRef<AppState> for Config {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}
