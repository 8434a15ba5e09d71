pub mod auth;
pub mod middleware;
pub mod quotes;
pub mod state;
pub mod views;

pub use state::AppState;

use std::time::Duration;

use axum::{
    middleware as axum_middleware,
    response::Html,
    routing::{get, post, put},
    Router,
};
use serde::Serialize;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    version: String,
}

pub fn create_router(state: AppState) -> Router {
    // Public surface: browsing quotes needs no session.
    let public = Router::new()
        .route("/", get(home))
        .route("/health", get(health))
        .route("/quotes", get(quotes::list))
        .route("/quotes/:id", get(quotes::show));

    // Mutating quote routes and the profile page sit behind the login gate.
    let gated = Router::new()
        .route("/quotes", post(quotes::create))
        .route("/quotes/add", get(quotes::add_form))
        .route("/quotes/edit/:id", get(quotes::edit_form))
        .route("/quotes/:id", put(quotes::update).delete(quotes::destroy))
        .route("/user", get(auth::profile))
        .route_layer(axum_middleware::from_fn(middleware::require_login));

    // Login/registration forms bounce users who already hold a session.
    let anonymous_only = Router::new()
        .route("/auth/login", get(auth::login_form))
        .route("/auth/register", get(auth::register_form))
        .route_layer(axum_middleware::from_fn(middleware::redirect_if_logged_in));

    let open = Router::new()
        .route("/auth/login", post(auth::login))
        .route("/auth/register", post(auth::register))
        .route("/auth/logout", get(auth::logout));

    Router::new()
        .merge(public)
        .merge(gated)
        .merge(anonymous_only)
        .merge(open)
        // Session resolution runs before any route-level gate.
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::load_session,
        ))
        .layer(TimeoutLayer::new(Duration::from_secs(
            state.config.request_timeout_secs,
        )))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn home() -> Html<String> {
    views::home()
}

async fn health() -> axum::Json<HealthResponse> {
    axum::Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
