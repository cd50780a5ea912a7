// src/services/session.rs

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::{
    config::ACCESS_TOKEN_KEY,
    error::AppError,
    models::user::{LoginRequest, RegisterRequest, User},
    services::identity::IdentityApi,
    storage::KeyValueStore,
};

/// Where a client session stands.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    /// Initial state, before the persisted token has been checked.
    Loading,
    Authenticated(User),
    Anonymous,
}

/// Client-side session handle.
///
/// Holds the current user for the lifetime of the process and keeps the
/// bearer token in key-value storage so the session survives a restart.
/// Callers receive this handle explicitly; nothing here is global.
pub struct SessionProvider {
    storage: Arc<dyn KeyValueStore>,
    identity: IdentityApi,
    state: RwLock<SessionState>,
}

impl SessionProvider {
    pub fn new(storage: Arc<dyn KeyValueStore>, identity: IdentityApi) -> Self {
        Self {
            storage,
            identity,
            state: RwLock::new(SessionState::Loading),
        }
    }

    /// Startup check: resolves a persisted token, or falls back to anonymous.
    ///
    /// A token that no longer resolves is removed from storage.
    pub async fn restore(&self) -> SessionState {
        let token = self.storage.get(ACCESS_TOKEN_KEY).await.unwrap_or_else(|e| {
            tracing::error!("Failed to read session token: {:?}", e);
            None
        });

        let next = match token {
            None => SessionState::Anonymous,
            Some(token) => match self.identity.current_user(&token).await {
                Ok(user) => {
                    tracing::info!("Session restored for user {}", user.id);
                    SessionState::Authenticated(user)
                }
                Err(e) => {
                    tracing::warn!("Stored token rejected: {:?}", e);
                    self.clear_token().await;
                    SessionState::Anonymous
                }
            },
        };

        *self.state.write().await = next.clone();
        next
    }

    /// Authenticates and persists the issued token.
    /// On failure the session is left as it was.
    pub async fn login(&self, req: &LoginRequest) -> Result<User, AppError> {
        let resp = self.identity.login(req).await?;
        self.store_token(&resp.access_token).await;
        *self.state.write().await = SessionState::Authenticated(resp.user.clone());
        Ok(resp.user)
    }

    /// Registers a new account and signs it in.
    pub async fn register(&self, req: &RegisterRequest) -> Result<User, AppError> {
        let resp = self.identity.register(req).await?;
        self.store_token(&resp.access_token).await;
        *self.state.write().await = SessionState::Authenticated(resp.user.clone());
        Ok(resp.user)
    }

    /// Always ends anonymous, even if the token cannot be cleared.
    pub async fn logout(&self) {
        self.clear_token().await;
        *self.state.write().await = SessionState::Anonymous;
    }

    pub async fn current_user(&self) -> Option<User> {
        match &*self.state.read().await {
            SessionState::Authenticated(user) => Some(user.clone()),
            _ => None,
        }
    }

    pub async fn state(&self) -> SessionState {
        self.state.read().await.clone()
    }

    pub async fn is_authenticated(&self) -> bool {
        matches!(*self.state.read().await, SessionState::Authenticated(_))
    }

    async fn store_token(&self, token: &str) {
        if let Err(e) = self.storage.set(ACCESS_TOKEN_KEY, token).await {
            tracing::error!("Failed to persist session token: {:?}", e);
        }
    }

    async fn clear_token(&self) {
        if let Err(e) = self.storage.remove(ACCESS_TOKEN_KEY).await {
            tracing::error!("Failed to clear session token: {:?}", e);
        }
    }
}
