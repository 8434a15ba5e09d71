use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use sqlx::sqlite::SqlitePoolOptions;
use tower::ServiceExt;

use adaquote::config::{Config, Environment};
use adaquote::http::{create_router, AppState};

async fn test_app() -> Router {
    let db = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("in-memory database");

    sqlx::migrate!("./migrations").run(&db).await.expect("migrations");

    let config = Arc::new(Config {
        environment: Environment::Development,
        server_host: "127.0.0.1".to_string(),
        server_port: 0,
        database_url: "sqlite::memory:".to_string(),
        session_expiry_hours: 24,
        db_max_connections: 1,
        db_min_connections: 1,
        request_timeout_secs: 30,
    });

    create_router(AppState { db, config })
}

fn get(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap()
}

fn form(method: &str, uri: &str, body: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

fn location(response: &axum::response::Response) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .expect("Location header")
        .to_str()
        .unwrap()
}

/// Session cookie pair from a Set-Cookie header, attributes stripped.
fn session_cookie(response: &axum::response::Response) -> String {
    response
        .headers()
        .get(header::SET_COOKIE)
        .expect("Set-Cookie header")
        .to_str()
        .unwrap()
        .split(';')
        .next()
        .unwrap()
        .to_string()
}

async fn body_text(response: axum::response::Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

const REGISTER_BODY: &str =
    "username=ada&first_name=Ada&last_name=Lovelace&email=ada%40example.com&password=enchantress1";

async fn register(app: &Router) -> String {
    let response = app
        .clone()
        .oneshot(form("POST", "/auth/register", REGISTER_BODY, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/user");
    session_cookie(&response)
}

/// Pull the first quote link out of the rendered index page.
fn first_quote_id(index_html: &str) -> String {
    let start = index_html
        .find("href=\"/quotes/")
        .expect("quote link in index")
        + "href=\"/quotes/".len();
    index_html[start..]
        .split('"')
        .next()
        .unwrap()
        .to_string()
}

#[tokio::test]
async fn register_then_login_authenticates() {
    let app = test_app().await;
    register(&app).await;

    // Fresh login with the same credentials, no prior cookie.
    let response = app
        .clone()
        .oneshot(form(
            "POST",
            "/auth/login",
            "username=ada&password=enchantress1",
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/user");
    let cookie = session_cookie(&response);

    // The session cookie opens gated routes.
    let response = app.clone().oneshot(get("/user", Some(&cookie))).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    assert!(body.contains("\"username\":\"ada\""));
    assert!(!body.contains("password"));
}

#[tokio::test]
async fn login_with_bad_password_redirects_with_failure_flag() {
    let app = test_app().await;
    register(&app).await;

    let response = app
        .clone()
        .oneshot(form(
            "POST",
            "/auth/login",
            "username=ada&password=wrong-password",
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/auth/login?failed=1");
    assert!(response.headers().get(header::SET_COOKIE).is_none());

    // The flash flag is rendered by the next login page.
    let response = app
        .clone()
        .oneshot(get("/auth/login?failed=1", None))
        .await
        .unwrap();
    let body = body_text(response).await;
    assert!(body.contains("Login failed"));
}

#[tokio::test]
async fn duplicate_registration_is_500_without_session() {
    let app = test_app().await;
    register(&app).await;

    let response = app
        .clone()
        .oneshot(form("POST", "/auth/register", REGISTER_BODY, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(response.headers().get(header::SET_COOKIE).is_none());
    let body = body_text(response).await;
    assert!(body.contains("error"));
}

#[tokio::test]
async fn logout_always_lands_anonymous() {
    let app = test_app().await;
    let cookie = register(&app).await;

    let response = app
        .clone()
        .oneshot(get("/auth/logout", Some(&cookie)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");

    // The old cookie no longer opens gated routes.
    let response = app.clone().oneshot(get("/user", Some(&cookie))).await.unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/auth/login");

    // Logging out without any session behaves the same.
    let response = app.clone().oneshot(get("/auth/logout", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");
}

#[tokio::test]
async fn anonymous_add_form_redirects_to_login() {
    let app = test_app().await;

    let response = app.clone().oneshot(get("/quotes/add", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/auth/login");
}

#[tokio::test]
async fn logged_in_user_is_bounced_off_login_page() {
    let app = test_app().await;
    let cookie = register(&app).await;

    let response = app
        .clone()
        .oneshot(get("/auth/login", Some(&cookie)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/user");
}

#[tokio::test]
async fn created_quote_appears_in_list() {
    let app = test_app().await;
    let cookie = register(&app).await;

    let response = app
        .clone()
        .oneshot(form(
            "POST",
            "/quotes",
            "content=Test&author=Ada&genre_id=1",
            Some(&cookie),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/quotes");

    let response = app.clone().oneshot(get("/quotes", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    assert!(body.contains("Test"));
    assert!(body.contains("Ada"));
}

#[tokio::test]
async fn updated_quote_reflects_new_content() {
    let app = test_app().await;
    let cookie = register(&app).await;

    app.clone()
        .oneshot(form(
            "POST",
            "/quotes",
            "content=Original&author=Ada&genre_id=1",
            Some(&cookie),
        ))
        .await
        .unwrap();

    let index = body_text(app.clone().oneshot(get("/quotes", None)).await.unwrap()).await;
    let id = first_quote_id(&index);

    let response = app
        .clone()
        .oneshot(form(
            "PUT",
            &format!("/quotes/{}", id),
            "content=Rewritten&author=Ada&genre_id=2",
            Some(&cookie),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/quotes");

    let body = body_text(
        app.clone()
            .oneshot(get(&format!("/quotes/{}", id), None))
            .await
            .unwrap(),
    )
    .await;
    assert!(body.contains("Rewritten"));
    assert!(!body.contains("Original"));
}

#[tokio::test]
async fn deleted_quote_is_gone() {
    let app = test_app().await;
    let cookie = register(&app).await;

    app.clone()
        .oneshot(form(
            "POST",
            "/quotes",
            "content=Ephemeral&author=Ada&genre_id=1",
            Some(&cookie),
        ))
        .await
        .unwrap();

    let index = body_text(app.clone().oneshot(get("/quotes", None)).await.unwrap()).await;
    let id = first_quote_id(&index);

    let response = app
        .clone()
        .oneshot(form("DELETE", &format!("/quotes/{}", id), "", Some(&cookie)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/quotes");

    let index = body_text(app.clone().oneshot(get("/quotes", None)).await.unwrap()).await;
    assert!(!index.contains("Ephemeral"));

    // Fetching the deleted id is a distinct not-found, not an empty render.
    let response = app
        .clone()
        .oneshot(get(&format!("/quotes/{}", id), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn missing_id_maps_to_404() {
    let app = test_app().await;
    let cookie = register(&app).await;

    let response = app
        .clone()
        .oneshot(get("/quotes/nope", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app
        .clone()
        .oneshot(get("/quotes/edit/nope", Some(&cookie)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app
        .clone()
        .oneshot(form(
            "PUT",
            "/quotes/nope",
            "content=X&author=Y&genre_id=1",
            Some(&cookie),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app
        .clone()
        .oneshot(form("DELETE", "/quotes/nope", "", Some(&cookie)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn health_endpoint_reports_healthy() {
    let app = test_app().await;

    let response = app.clone().oneshot(get("/health", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    assert!(body.contains("healthy"));
}
