// src/routes.rs

use axum::{
    Router,
    http::{HeaderValue, Method, header},
    middleware,
    routing::{get, post},
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    handlers::{analysis, auth, exam, user},
    state::AppState,
    utils::auth::auth_middleware,
};

/// Assembles the main application router.
///
/// * Public routes: auth and the subject catalogue.
/// * Bearer-protected routes: profile, exams, analysis.
/// * Global middleware: Trace, CORS.
pub fn create_router(state: AppState) -> Router {
    let origins = [
        HeaderValue::from_static("http://localhost:8081"),
        HeaderValue::from_static("http://127.0.0.1:8081"),
    ];

    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE]);

    let auth_routes = Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login));

    let protected = Router::new()
        .route("/user/me", get(user::get_me))
        .route("/exams", get(exam::list_exams).post(exam::create_exam))
        .route(
            "/exams/{id}",
            get(exam::get_exam).delete(exam::delete_exam),
        )
        .route("/analysis/dashboard", get(analysis::get_dashboard))
        .route("/analysis/lessons", get(analysis::get_lessons))
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

    let api = Router::new()
        .nest("/auth", auth_routes)
        .route("/exams/subjects", get(exam::list_subjects))
        .merge(protected);

    Router::new()
        .nest("/api/v1", api)
        // Global Middleware (applied from outside in)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}
