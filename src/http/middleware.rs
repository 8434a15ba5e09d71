use axum::{
    extract::{Request, State},
    http::header::COOKIE,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};

use crate::db::{models::User, SessionRepository, UserRepository};
use crate::error::AppError;
use crate::http::state::AppState;

pub const SESSION_COOKIE: &str = "adaquote_session";

/// Authenticated user attached to the request by `load_session`.
#[derive(Clone, Debug)]
pub struct CurrentUser(pub User);

/// `Set-Cookie` value establishing a session.
pub fn session_cookie(token: &str) -> String {
    format!("{}={}; Path=/; HttpOnly; SameSite=Lax", SESSION_COOKIE, token)
}

/// `Set-Cookie` value clearing the session cookie.
pub fn clear_session_cookie() -> String {
    format!("{}=; Path=/; HttpOnly; Max-Age=0", SESSION_COOKIE)
}

/// Session token from the request's `Cookie` header, if present.
pub fn session_token(headers: &axum::http::HeaderMap) -> Option<String> {
    let header = headers.get(COOKIE)?.to_str().ok()?;

    header.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        (name == SESSION_COOKIE).then(|| value.to_string())
    })
}

/// Resolve the session cookie to a user and attach it to the request.
///
/// Applied to the whole router; the gates below only inspect the result.
/// An expired or unknown token reads the same as no cookie at all.
pub async fn load_session(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    if let Some(token) = session_token(request.headers()) {
        if let Some(session) = SessionRepository::get_by_token(&state.db, &token).await? {
            if let Some(user) = UserRepository::get_by_id(&state.db, &session.user_id).await? {
                request.extensions_mut().insert(CurrentUser(user));
            }
        }
    }

    Ok(next.run(request).await)
}

/// Session gate: anonymous requests short-circuit to the login page.
pub async fn require_login(request: Request, next: Next) -> Response {
    if request.extensions().get::<CurrentUser>().is_none() {
        return Redirect::to("/auth/login").into_response();
    }

    next.run(request).await
}

/// Session gate: keeps already-authenticated users off the login and
/// registration pages by bouncing them to their profile.
pub async fn redirect_if_logged_in(request: Request, next: Next) -> Response {
    if request.extensions().get::<CurrentUser>().is_some() {
        return Redirect::to("/user").into_response();
    }

    next.run(request).await
}
