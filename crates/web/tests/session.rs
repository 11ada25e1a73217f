//! Session flows against a real Postgres.
//!
//! Skipped unless `DATABASE_URL` points at a reachable database.

use axum::{
    body::{Body, to_bytes},
    http::{Method, Request, StatusCode, header},
};
use axum_extra::extract::cookie::CookieJar;
use deporty_api::{
    auth::{jwt::REFRESH_COOKIE, session},
    build_router,
    config::Config,
    state::AppState,
};
use serde_json::{Value, json};
use storage::{
    Database,
    models::{ROLE_USER, User},
    repository::{NewUser, UserRepository},
};
use tower::ServiceExt;
use uuid::Uuid;

async fn test_state() -> Option<AppState> {
    let url = std::env::var("DATABASE_URL").ok()?;
    let db = Database::new(&url).await.ok()?;
    db.run_migrations().await.ok()?;
    Some(AppState::new(
        db,
        Config::for_development(&url, "session-test-secret"),
    ))
}

async fn create_user(state: &AppState) -> User {
    let email = format!("session-{}@deporty.app", Uuid::new_v4());
    UserRepository::new(state.db.pool())
        .create(&NewUser {
            first_name: "Valentina",
            last_name: "Torres",
            email: &email,
            password_hash: "not-a-real-hash",
            role: ROLE_USER,
        })
        .await
        .unwrap()
}

fn refresh_value(jar: &CookieJar) -> String {
    jar.get(REFRESH_COOKIE).unwrap().value().to_string()
}

#[tokio::test]
async fn test_refresh_token_is_single_use() {
    let Some(state) = test_state().await else {
        return;
    };
    let user = create_user(&state).await;

    let (jar, _) = session::issue_session(&state, CookieJar::new(), &user)
        .await
        .unwrap();
    let first = refresh_value(&jar);

    let (jar, rotated) = session::rotate_refresh_token(&state, CookieJar::new(), &first)
        .await
        .unwrap();
    assert_eq!(rotated.unwrap().id, user.id);
    let second = refresh_value(&jar);
    assert_ne!(first, second);

    let (jar, replayed) = session::rotate_refresh_token(&state, CookieJar::new(), &first)
        .await
        .unwrap();
    assert!(replayed.is_none());
    assert_eq!(refresh_value(&jar), "");

    let (_, rotated) = session::rotate_refresh_token(&state, CookieJar::new(), &second)
        .await
        .unwrap();
    assert!(rotated.is_some());
}

#[tokio::test]
async fn test_revoked_refresh_token_is_rejected() {
    let Some(state) = test_state().await else {
        return;
    };
    let user = create_user(&state).await;

    let (jar, _) = session::issue_session(&state, CookieJar::new(), &user)
        .await
        .unwrap();
    let token = refresh_value(&jar);
    session::revoke_refresh_token(&state, &token).await.unwrap();

    let (_, rotated) = session::rotate_refresh_token(&state, CookieJar::new(), &token)
        .await
        .unwrap();
    assert!(rotated.is_none());
}

async fn login(app: &axum::Router, email: &str, password: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/auth/login")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            json!({ "email": email, "password": password }).to_string(),
        ))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_login_failures_do_not_reveal_accounts() {
    let Some(state) = test_state().await else {
        return;
    };
    let app = build_router(state);
    let email = format!("login-{}@deporty.app", Uuid::new_v4());

    let register = Request::builder()
        .method(Method::POST)
        .uri("/api/auth/register")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            json!({
                "firstName": "Camila",
                "lastName": "Vargas",
                "email": email,
                "password": "password123"
            })
            .to_string(),
        ))
        .unwrap();
    let response = app.clone().oneshot(register).await.unwrap();
    assert!(response.status().is_success());

    let (wrong_status, wrong_body) = login(&app, &email, "password124").await;
    let unknown_email = format!("nobody-{}@deporty.app", Uuid::new_v4());
    let (unknown_status, unknown_body) = login(&app, &unknown_email, "password124").await;

    assert_eq!(wrong_status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_body, unknown_body);
    assert_eq!(wrong_body["code"], "INVALID_CREDENTIALS");

    let (status, body) = login(&app, &email, "password123").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["email"], email);
}
