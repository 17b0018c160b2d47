//! Authentication API integration tests
//!
//! Login, logout and profile through the full router, including the session
//! layer and the auth guard.

mod common;

use std::time::Duration;

use account_service::backend::server::ServerConfig;
use account_service::shared::User;
use axum::http::StatusCode;
use axum_test::TestResponse;
use common::{set_cookie_line, test_config, TestApp, TEST_PASSWORD};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use uuid::Uuid;

/// Percent-decoded value of a cookie the response set
fn decoded(response: &TestResponse, name: &str) -> String {
    let cookie = response.cookie(name);
    urlencoding::decode(cookie.value()).unwrap().into_owned()
}

#[tokio::test]
async fn test_login_sets_signed_cookies() {
    let app = TestApp::new();
    let user = app.create_user("ada").await;

    let response = app.login("ada", TEST_PASSWORD).await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.json::<Value>(), json!({ "message": "Login authenticated" }));

    for name in ["isAuthenticated", "userId"] {
        let line = set_cookie_line(&response, name).unwrap();
        assert!(line.contains("Max-Age=180"), "{line}");
        assert!(line.contains("Path=/"), "{line}");
        assert!(line.contains("Expires="), "{line}");
        assert!(line.contains("HttpOnly"), "{line}");
    }

    let flag = decoded(&response, "isAuthenticated");
    assert!(flag.starts_with("s:true."));
    assert_eq!(app.state.signer.unsign(&flag).as_deref(), Some("true"));

    let user_id = decoded(&response, "userId");
    assert_eq!(app.state.signer.unsign(&user_id), Some(user.id.to_string()));
}

#[tokio::test]
async fn test_login_starts_session() {
    let app = TestApp::new();
    app.create_user("ada").await;

    let response = app.login("ada", TEST_PASSWORD).await;

    let line = set_cookie_line(&response, "sid").unwrap();
    assert!(line.contains("HttpOnly"), "{line}");
    assert!(line.contains("SameSite=Lax"), "{line}");
}

#[tokio::test]
async fn test_login_rotates_session_id() {
    let app = TestApp::new();
    app.create_user("ada").await;

    let first = app.login("ada", TEST_PASSWORD).await.cookie("sid");
    let second = app.login("ada", TEST_PASSWORD).await.cookie("sid");

    assert_ne!(first.value(), second.value());
}

#[tokio::test]
async fn test_login_unknown_user() {
    let app = TestApp::new();
    app.create_user("ada").await;

    let response = app.login("nobody", TEST_PASSWORD).await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    assert_eq!(response.json::<Value>(), json!({ "message": "User not found" }));
    for name in ["isAuthenticated", "userId", "sid"] {
        assert!(set_cookie_line(&response, name).is_none(), "{name}");
    }
}

#[tokio::test]
async fn test_login_wrong_password() {
    let app = TestApp::new();
    app.create_user("ada").await;

    let response = app.login("ada", "wrong").await;

    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
    assert_eq!(response.json::<Value>(), json!({ "message": "Password is invalid" }));
    for name in ["isAuthenticated", "userId", "sid"] {
        assert!(set_cookie_line(&response, name).is_none(), "{name}");
    }
    assert_eq!(app.server.get("/profile").await.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_profile_requires_login() {
    let app = TestApp::new();
    app.create_user("ada").await;

    let response = app.server.get("/profile").await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
    assert_eq!(response.json::<Value>(), json!({ "message": "Not authenticated" }));
    assert!(set_cookie_line(&response, "sid").is_none());
}

#[tokio::test]
async fn test_profile_after_login() {
    let app = TestApp::new();
    let user = app.create_user("ada").await;
    app.login("ada", TEST_PASSWORD).await;

    let response = app.server.get("/profile").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.json::<User>(), user);
}

#[tokio::test]
async fn test_profile_follows_latest_login_on_session() {
    let app = TestApp::new();
    app.create_user("ada").await;
    let grace = app.create_user("grace").await;

    app.login("ada", TEST_PASSWORD).await;
    let response = app.login("grace", TEST_PASSWORD).await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let profile = app.server.get("/profile").await.json::<User>();
    assert_eq!(profile.id, grace.id);
}

#[tokio::test]
async fn test_profile_rejects_tampered_user_cookie() {
    let app = TestApp::new();
    app.create_user("ada").await;
    let login = app.login("ada", TEST_PASSWORD).await;

    // Swap the value but keep the old signature
    let original = decoded(&login, "userId");
    let signature = original.rsplit_once('.').unwrap().1;
    let forged = format!("s:{}.{}", Uuid::new_v4(), signature);
    let mut cookie = login.cookie("userId");
    cookie.set_value(urlencoding::encode(&forged).into_owned());

    let response = app.server.get("/profile").add_cookie(cookie).await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_profile_rejects_mismatched_user_cookie() {
    let app = TestApp::new();
    app.create_user("ada").await;
    let grace = app.create_user("grace").await;
    let login = app.login("ada", TEST_PASSWORD).await;

    // Validly signed, but not the session's user
    let other = app.state.signer.sign(&grace.id.to_string());
    let mut cookie = login.cookie("userId");
    cookie.set_value(urlencoding::encode(&other).into_owned());

    let response = app.server.get("/profile").add_cookie(cookie).await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
    assert_eq!(response.json::<Value>(), json!({ "message": "Not authenticated" }));
}

#[tokio::test]
async fn test_profile_rejects_missing_flag_cookie() {
    let app = TestApp::new();
    app.create_user("ada").await;
    let login = app.login("ada", TEST_PASSWORD).await;

    let response = app
        .server
        .get("/profile")
        .clear_cookies()
        .add_cookie(login.cookie("sid"))
        .add_cookie(login.cookie("userId"))
        .await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_profile_rejects_cookies_without_session() {
    let app = TestApp::new();
    app.create_user("ada").await;
    let login = app.login("ada", TEST_PASSWORD).await;

    // Valid auth cookies presented from a different client
    let response = app
        .server
        .get("/profile")
        .clear_cookies()
        .add_cookie(login.cookie("isAuthenticated"))
        .add_cookie(login.cookie("userId"))
        .await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_profile_of_deleted_user() {
    let app = TestApp::new();
    let user = app.create_user("ada").await;
    app.login("ada", TEST_PASSWORD).await;

    let response = app.server.delete(&format!("/users/{}", user.id)).await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let response = app.server.get("/profile").await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    assert_eq!(response.json::<Value>(), json!({ "message": "User not found" }));
}

#[tokio::test]
async fn test_lapsed_login_is_rejected_without_touching_session() {
    let app = TestApp::with_config(ServerConfig {
        auth_cookie_ttl_secs: 1,
        ..test_config()
    });
    app.create_user("ada").await;
    let login = app.login("ada", TEST_PASSWORD).await;

    tokio::time::sleep(Duration::from_millis(1100)).await;

    // The client still replays the cookies
    let response = app
        .server
        .get("/profile")
        .add_cookie(login.cookie("sid"))
        .add_cookie(login.cookie("isAuthenticated"))
        .add_cookie(login.cookie("userId"))
        .await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);

    // Rejection leaves the session alone: no removal, no new id
    let sid = login.cookie("sid");
    if let Some(line) = set_cookie_line(&response, "sid") {
        assert!(line.starts_with(&format!("sid={};", sid.value())), "{line}");
        assert!(!line.contains("Max-Age=0"), "{line}");
    }
    assert!(set_cookie_line(&response, "isAuthenticated").is_none());

    // A fresh login on the same client works again
    assert_eq!(app.login("ada", TEST_PASSWORD).await.status_code(), StatusCode::OK);
    assert_eq!(app.server.get("/profile").await.status_code(), StatusCode::OK);
}

#[tokio::test]
async fn test_logout_without_session_clears_cookies() {
    let app = TestApp::new();

    let response = app.server.post("/logout").json(&json!({})).await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.json::<Value>(), json!({ "message": "Logged out" }));
    for name in ["isAuthenticated", "userId"] {
        let line = set_cookie_line(&response, name).unwrap();
        assert!(line.contains("Max-Age=0"), "{line}");
        assert!(line.contains("Expires=Thu, 01 Jan 1970 00:00:00 GMT"), "{line}");
    }
    assert!(set_cookie_line(&response, "sid").is_none());
}

#[tokio::test]
async fn test_logout_keeps_session_by_default() {
    let app = TestApp::new();
    app.create_user("ada").await;
    let login = app.login("ada", TEST_PASSWORD).await;

    let response = app.server.post("/logout").json(&json!({})).await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(app.server.get("/profile").await.status_code(), StatusCode::UNAUTHORIZED);

    // The session survives, so replayed cookies are still accepted
    let replay = app
        .server
        .get("/profile")
        .add_cookie(login.cookie("sid"))
        .add_cookie(login.cookie("isAuthenticated"))
        .add_cookie(login.cookie("userId"))
        .await;
    assert_eq!(replay.status_code(), StatusCode::OK);
}

#[tokio::test]
async fn test_logout_can_clear_session() {
    let app = TestApp::with_config(ServerConfig {
        logout_clears_session: true,
        ..test_config()
    });
    app.create_user("ada").await;
    let login = app.login("ada", TEST_PASSWORD).await;

    let response = app.server.post("/logout").json(&json!({})).await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let replay = app
        .server
        .get("/profile")
        .add_cookie(login.cookie("sid"))
        .add_cookie(login.cookie("isAuthenticated"))
        .add_cookie(login.cookie("userId"))
        .await;
    assert_eq!(replay.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_cookies_from_other_secret_are_rejected() {
    let app = TestApp::new();
    app.create_user("ada").await;
    let login = app.login("ada", TEST_PASSWORD).await;

    let other = TestApp::with_config(ServerConfig {
        cookie_secret: Some("another-secret".to_string()),
        ..test_config()
    });
    assert!(other.state.signer.unsign(&decoded(&login, "isAuthenticated")).is_none());
}
