// src/routes.rs

use axum::{
    Router,
    http::{HeaderValue, Method, header},
    middleware,
    routing::{delete, get, post, put},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    handlers::{admin, ai, auth, categories, quiz},
    state::AppState,
    utils::jwt::{admin_middleware, auth_middleware},
};

/// Assembles the main application router.
///
/// * Merges all sub-routers (auth, quiz, admin).
/// * Applies global middleware (Trace, CORS).
/// * Injects global state (bank, local store, AI client).
pub fn create_router(state: AppState) -> Router {
    let origins = [
        HeaderValue::from_static("http://localhost:3000"),
        HeaderValue::from_static("http://127.0.0.1:3000"),
        HeaderValue::from_static("http://localhost:5173"),
    ];

    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE]);

    let auth_routes = Router::new().route("/login", post(auth::login));

    let quiz_routes = Router::new()
        .route("/categories", get(quiz::list_categories))
        .route("/settings", get(quiz::get_settings))
        .route("/generate", get(quiz::generate_quiz))
        .route("/submit", post(quiz::submit_quiz))
        .route("/analyze", post(ai::analyze_performance));

    let admin_routes = Router::new()
        .route(
            "/questions",
            get(admin::list_questions)
                .post(admin::save_question)
                .delete(admin::clear_questions),
        )
        .route("/questions/import", post(admin::import_csv))
        .route("/questions/template", get(admin::csv_template))
        .route("/questions/export", get(admin::export_csv))
        .route("/questions/{id}", delete(admin::delete_question))
        .route(
            "/categories",
            get(categories::list_categories).post(categories::create_category),
        )
        .route("/categories/overview", get(categories::category_overview))
        .route(
            "/categories/{id}",
            put(categories::update_category).delete(categories::delete_category),
        )
        .route("/categories/{id}/toggle", post(categories::toggle_category))
        .route(
            "/settings",
            get(admin::get_settings).put(admin::update_settings),
        )
        .route("/users", get(admin::list_users))
        .route("/ai/generate", post(ai::generate_questions))
        // Double middleware protection: Auth first, then Admin check
        .layer(middleware::from_fn(admin_middleware))
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

    Router::new()
        .nest("/api/auth", auth_routes)
        .nest("/api/quiz", quiz_routes)
        .nest("/api/admin", admin_routes)
        // Global Middleware (applied from outside in)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
