use axum::{
    extract::{Query, State},
    http::{header::SET_COOKIE, HeaderMap, StatusCode},
    response::{AppendHeaders, Html, IntoResponse, Redirect, Response},
    Extension, Form, Json,
};
use serde::Deserialize;

use crate::auth::{self, Credentials};
use crate::db::{SessionRepository, UserRepository};
use crate::error::AppError;
use crate::http::middleware::{clear_session_cookie, session_cookie, session_token, CurrentUser};
use crate::http::state::AppState;
use crate::http::views;

#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginPageQuery {
    pub failed: Option<u8>,
}

/// Validate and sanitize username
fn validate_username(username: &str) -> Result<String, AppError> {
    let trimmed = username.trim();

    if trimmed.len() < 3 || trimmed.len() > 32 {
        return Err(AppError::Auth("Username must be 3-32 characters".to_string()));
    }

    if !trimmed.chars().all(|c| c.is_alphanumeric() || c == '_' || c == '-') {
        return Err(AppError::Auth(
            "Username must be alphanumeric, underscore, or hyphen".to_string(),
        ));
    }

    // Convert to lowercase for consistency
    Ok(trimmed.to_lowercase())
}

/// Establish a session for the user and redirect to the profile page.
async fn start_session(state: &AppState, user_id: String) -> Result<Response, AppError> {
    let session =
        SessionRepository::create(&state.db, user_id, state.config.session_expiry_hours).await?;

    Ok((
        AppendHeaders([(SET_COOKIE, session_cookie(&session.token))]),
        Redirect::to("/user"),
    )
        .into_response())
}

/// GET /auth/login (anonymous only)
///
/// The `failed` query parameter is the flash failure flag set by a rejected
/// login; it is consumed by this single render.
pub async fn login_form(Query(query): Query<LoginPageQuery>) -> Html<String> {
    views::login(query.failed.is_some())
}

/// GET /auth/register (anonymous only)
pub async fn register_form() -> Html<String> {
    views::register()
}

/// POST /auth/register
pub async fn register(
    State(state): State<AppState>,
    Form(form): Form<RegisterForm>,
) -> Result<Response, AppError> {
    let username = validate_username(&form.username)?;

    if form.password.len() < 8 {
        return Err(AppError::Auth(
            "Password must be at least 8 characters".to_string(),
        ));
    }

    let password_hash = auth::hash_password(&form.password)?;

    // Persistence failure (duplicate username included) is a 500 with a JSON
    // error body and no session change.
    let user = match UserRepository::create(
        &state.db,
        username,
        form.first_name,
        form.last_name,
        form.email,
        &password_hash,
    )
    .await
    {
        Ok(user) => user,
        Err(err) => {
            tracing::warn!("Registration failed: {}", err);
            return Ok((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({"status": "error"})),
            )
                .into_response());
        }
    };

    start_session(&state, user.id).await
}

/// POST /auth/login
///
/// Bad credentials are not an HTTP error: the browser is redirected back to
/// the login page with the flash failure flag.
pub async fn login(
    State(state): State<AppState>,
    Form(form): Form<LoginForm>,
) -> Result<Response, AppError> {
    let credentials = Credentials {
        username: form.username.trim().to_lowercase(),
        password: form.password,
    };

    match auth::authenticate(&state.db, &credentials).await? {
        Ok(user) => start_session(&state, user.id).await,
        Err(_) => Ok(Redirect::to("/auth/login?failed=1").into_response()),
    }
}

/// GET /auth/logout
///
/// Destroys the session unconditionally, whatever the current state, and
/// sends the browser home with the cookie cleared.
pub async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    if let Some(token) = session_token(&headers) {
        SessionRepository::delete(&state.db, &token).await?;
    }

    Ok((
        AppendHeaders([(SET_COOKIE, clear_session_cookie())]),
        Redirect::to("/"),
    )
        .into_response())
}

/// GET /user (requires auth)
pub async fn profile(Extension(CurrentUser(user)): Extension<CurrentUser>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "user": "user profile page placeholder",
        "userInfo": user,
    }))
}
