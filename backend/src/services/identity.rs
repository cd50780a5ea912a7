// src/services/identity.rs

//! Stand-in for the remote identity backend.
//!
//! `IdentityApi` speaks the same contract a real backend would
//! (login, register, resolve a bearer token to a user). Where users live is
//! behind `UserRepository`; `MockUserRepository` keeps them in memory,
//! seeded with fixture accounts.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::{
    error::AppError,
    models::user::{AuthResponse, AytField, ExamType, LoginRequest, RegisterRequest, User},
    utils::hash::{hash_password, verify_password},
};

/// Storage of identities and their credentials.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;

    /// Resolves a bearer token to its user.
    async fn find_by_token(&self, token: &str) -> Result<Option<User>, AppError>;

    /// The token issued to `email`, if any.
    async fn token_for(&self, email: &str) -> Result<Option<String>, AppError>;

    /// Creates a user from a registration and binds `token` to it.
    ///
    /// Fails with `AppError::DuplicateEmail` if the email is taken.
    async fn insert(&self, registration: &RegisterRequest, token: &str) -> Result<User, AppError>;

    /// Whether `password` matches the stored credential of `email`.
    /// Unknown emails never match.
    async fn verify_password(&self, email: &str, password: &str) -> Result<bool, AppError>;

    async fn count(&self) -> Result<usize, AppError>;
}

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    // email -> argon2 hash
    passwords: HashMap<String, String>,
    // email -> token
    tokens: HashMap<String, String>,
}

/// In-memory `UserRepository`. Registrations live as long as the process.
pub struct MockUserRepository {
    tables: RwLock<Tables>,
}

struct Fixture {
    id: &'static str,
    email: &'static str,
    name: &'static str,
    exam_type: ExamType,
    ayt_field: Option<AytField>,
    password: &'static str,
    token: &'static str,
}

const FIXTURES: &[Fixture] = &[
    Fixture {
        id: "1",
        email: "test@example.com",
        name: "Test Kullanıcı",
        exam_type: ExamType::Tyt,
        ayt_field: None,
        password: "123456",
        token: "dummy_token_test_user_12345",
    },
    Fixture {
        id: "2",
        email: "ayt@example.com",
        name: "AYT Kullanıcı",
        exam_type: ExamType::Ayt,
        ayt_field: Some(AytField::Sayisal),
        password: "password",
        token: "dummy_token_ayt_user_67890",
    },
    Fixture {
        id: "3",
        email: "admin@example.com",
        name: "Admin Kullanıcı",
        exam_type: ExamType::Ayt,
        ayt_field: Some(AytField::EsitAgirlik),
        password: "admin123",
        token: "dummy_token_admin_user_11111",
    },
];

impl MockUserRepository {
    pub fn empty() -> Self {
        Self {
            tables: RwLock::new(Tables::default()),
        }
    }

    /// Repository holding the three fixture accounts.
    pub fn seeded() -> Result<Self, AppError> {
        let seeded_at: DateTime<Utc> = "2024-01-01T00:00:00Z"
            .parse()
            .map_err(|e: chrono::ParseError| AppError::InternalServerError(e.to_string()))?;

        let mut tables = Tables::default();
        for f in FIXTURES {
            tables.users.push(User {
                id: f.id.to_string(),
                email: f.email.to_string(),
                name: f.name.to_string(),
                exam_type: f.exam_type,
                ayt_field: f.ayt_field,
                created_at: seeded_at,
                updated_at: seeded_at,
            });
            tables
                .passwords
                .insert(f.email.to_string(), hash_password(f.password)?);
            tables
                .tokens
                .insert(f.email.to_string(), f.token.to_string());
        }

        Ok(Self {
            tables: RwLock::new(tables),
        })
    }
}

#[async_trait]
impl UserRepository for MockUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables.users.iter().find(|u| u.email == email).cloned())
    }

    async fn find_by_token(&self, token: &str) -> Result<Option<User>, AppError> {
        let tables = self.tables.read().await;
        let Some(email) = tables
            .tokens
            .iter()
            .find(|(_, t)| t.as_str() == token)
            .map(|(email, _)| email)
        else {
            return Ok(None);
        };
        Ok(tables.users.iter().find(|u| &u.email == email).cloned())
    }

    async fn token_for(&self, email: &str) -> Result<Option<String>, AppError> {
        Ok(self.tables.read().await.tokens.get(email).cloned())
    }

    async fn insert(&self, registration: &RegisterRequest, token: &str) -> Result<User, AppError> {
        let password_hash = hash_password(&registration.password)?;

        let mut tables = self.tables.write().await;
        if tables.users.iter().any(|u| u.email == registration.email) {
            return Err(AppError::DuplicateEmail(registration.email.clone()));
        }

        let now = Utc::now();
        let user = User {
            id: (tables.users.len() + 1).to_string(),
            email: registration.email.clone(),
            name: registration.name.clone(),
            exam_type: registration.exam_type,
            ayt_field: registration.ayt_field,
            created_at: now,
            updated_at: now,
        };

        tables.users.push(user.clone());
        tables
            .passwords
            .insert(registration.email.clone(), password_hash);
        tables
            .tokens
            .insert(registration.email.clone(), token.to_string());

        Ok(user)
    }

    async fn verify_password(&self, email: &str, password: &str) -> Result<bool, AppError> {
        let hash = self.tables.read().await.passwords.get(email).cloned();
        match hash {
            Some(hash) => verify_password(password, &hash),
            None => Ok(false),
        }
    }

    async fn count(&self) -> Result<usize, AppError> {
        Ok(self.tables.read().await.users.len())
    }
}

/// Artificial delays imitating a remote round trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockLatency {
    pub login: Duration,
    pub register: Duration,
    pub resolve: Duration,
}

impl MockLatency {
    pub fn realistic() -> Self {
        Self {
            login: Duration::from_millis(1000),
            register: Duration::from_millis(1500),
            resolve: Duration::from_millis(500),
        }
    }

    pub fn none() -> Self {
        Self {
            login: Duration::ZERO,
            register: Duration::ZERO,
            resolve: Duration::ZERO,
        }
    }
}

async fn simulate(delay: Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}

/// Mock remote identity API.
#[derive(Clone)]
pub struct IdentityApi {
    users: Arc<dyn UserRepository>,
    latency: MockLatency,
}

impl IdentityApi {
    pub fn new(users: Arc<dyn UserRepository>, latency: MockLatency) -> Self {
        Self { users, latency }
    }

    /// `POST /auth/login`
    pub async fn login(&self, req: &LoginRequest) -> Result<AuthResponse, AppError> {
        simulate(self.latency.login).await;

        let user = self
            .users
            .find_by_email(&req.email)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        if !self.users.verify_password(&req.email, &req.password).await? {
            tracing::warn!("Rejected login for {}", req.email);
            return Err(AppError::InvalidCredentials);
        }

        let access_token = self.users.token_for(&req.email).await?.ok_or_else(|| {
            AppError::InternalServerError(format!("No token issued for {}", req.email))
        })?;

        tracing::info!("User {} logged in", user.id);
        Ok(AuthResponse { access_token, user })
    }

    /// `POST /auth/register`
    pub async fn register(&self, req: &RegisterRequest) -> Result<AuthResponse, AppError> {
        simulate(self.latency.register).await;

        let access_token = issue_token(&req.email, Utc::now());
        let user = self.users.insert(req, &access_token).await?;

        tracing::info!("Registered user {} ({})", user.id, user.email);
        Ok(AuthResponse { access_token, user })
    }

    /// `GET /user/me`
    pub async fn current_user(&self, token: &str) -> Result<User, AppError> {
        simulate(self.latency.resolve).await;
        self.resolve(token).await
    }

    /// Token lookup without the simulated round trip, for request
    /// authentication inside the service.
    pub async fn resolve(&self, token: &str) -> Result<User, AppError> {
        self.users
            .find_by_token(token)
            .await?
            .ok_or(AppError::TokenResolutionFailure)
    }
}

/// `dummy_token_<email with '@' and the first '.' replaced>_<unix millis>`.
fn issue_token(email: &str, at: DateTime<Utc>) -> String {
    let slug = email.replacen('@', "_", 1).replacen('.', "_", 1);
    format!("dummy_token_{}_{}", slug, at.timestamp_millis())
}
