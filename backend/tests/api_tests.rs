// tests/api_tests.rs

use std::sync::Arc;

use exam_tracker::{
    config::Config, routes, services::identity::MockUserRepository, state::AppState,
    storage::SqliteStore,
};

/// Helper function to spawn the app on a random port for testing.
/// Returns the base URL (e.g., "http://127.0.0.1:12345/api/v1").
async fn spawn_app() -> String {
    let config = Config::for_tests();

    // 1. In-memory storage with migrations applied
    let storage = SqliteStore::connect(&config.database_url)
        .await
        .expect("Failed to open in-memory storage");

    // 2. Fixture users
    let users = MockUserRepository::seeded().expect("Failed to seed users");

    // 3. Create the router with the app state
    let state = AppState::new(config, Arc::new(storage), Arc::new(users));
    let app = routes::create_router(state);

    // 4. Bind to port 0 to get a random available port
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");

    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}/api/v1", port);

    // 5. Spawn the server in the background
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    address
}

fn unique_email() -> String {
    format!("u_{}@example.com", &uuid::Uuid::new_v4().to_string()[..8])
}

#[tokio::test]
async fn unknown_path_is_404() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    let response = client
        .get(format!("{}/random_path_that_does_not_exist", address))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 404);
}

#[tokio::test]
async fn fixture_login_works() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{}/auth/login", address))
        .json(&serde_json::json!({
            "email": "test@example.com",
            "password": "123456"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["accessToken"], "dummy_token_test_user_12345");
    assert_eq!(body["user"]["examType"], "TYT");
    assert_eq!(body["user"]["email"], "test@example.com");
}

#[tokio::test]
async fn wrong_password_is_401() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{}/auth/login", address))
        .json(&serde_json::json!({
            "email": "test@example.com",
            "password": "wrong"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 401);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Invalid email or password");
}

#[tokio::test]
async fn register_then_me_resolves_same_user() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();
    let email = unique_email();

    let response = client
        .post(format!("{}/auth/register", address))
        .json(&serde_json::json!({
            "name": "Yeni Öğrenci",
            "email": email,
            "password": "password123",
            "examType": "AYT",
            "aytField": "SOZEL"
        }))
        .send()
        .await
        .expect("Register failed");

    assert_eq!(response.status().as_u16(), 201);
    let body: serde_json::Value = response.json().await.unwrap();
    let token = body["accessToken"].as_str().expect("Token not found");

    let me: serde_json::Value = client
        .get(format!("{}/user/me", address))
        .bearer_auth(token)
        .send()
        .await
        .expect("Fetch me failed")
        .json()
        .await
        .unwrap();

    assert_eq!(me, body["user"]);
    assert_eq!(me["aytField"], "SOZEL");
}

#[tokio::test]
async fn duplicate_email_is_409() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{}/auth/register", address))
        .json(&serde_json::json!({
            "name": "Kopya",
            "email": "test@example.com",
            "password": "password123",
            "examType": "TYT"
        }))
        .send()
        .await
        .expect("Register failed");

    assert_eq!(response.status().as_u16(), 409);
}

#[tokio::test]
async fn register_fails_validation() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    // AYT without a field
    let response = client
        .post(format!("{}/auth/register", address))
        .json(&serde_json::json!({
            "name": "Eksik",
            "email": unique_email(),
            "password": "password123",
            "examType": "AYT"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 400);
}

#[tokio::test]
async fn protected_routes_need_a_valid_token() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    let missing = client
        .get(format!("{}/user/me", address))
        .send()
        .await
        .unwrap();
    assert_eq!(missing.status().as_u16(), 401);

    let forged = client
        .get(format!("{}/exams", address))
        .bearer_auth("dummy_token_forged")
        .send()
        .await
        .unwrap();
    assert_eq!(forged.status().as_u16(), 401);
}
