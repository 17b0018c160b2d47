//! Common test utilities and helpers
//!
//! Builds the full router over in-memory user and session stores and serves
//! it through `axum_test::TestServer`, which keeps cookies between requests.

#![allow(dead_code)]

use std::sync::Arc;

use account_service::backend::server::{build_app, AppState, ServerConfig};
use account_service::backend::users::MemoryUserStore;
use account_service::shared::User;
use axum::http::{header::SET_COOKIE, StatusCode};
use axum_test::{TestResponse, TestServer};
use serde_json::json;
use tower_sessions::MemoryStore;

pub const TEST_SECRET: &str = "integration-test-secret";
pub const TEST_PASSWORD: &str = "correct horse battery staple";

/// Config with a fixed secret and the cheapest bcrypt cost
pub fn test_config() -> ServerConfig {
    ServerConfig {
        cookie_secret: Some(TEST_SECRET.to_string()),
        bcrypt_cost: 4,
        ..Default::default()
    }
}

pub struct TestApp {
    pub server: TestServer,
    pub state: AppState,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_config(test_config())
    }

    pub fn with_config(config: ServerConfig) -> Self {
        let state = AppState::new(config, Arc::new(MemoryUserStore::new()));
        let app = build_app(state.clone(), MemoryStore::default());

        let mut server = TestServer::new(app).unwrap();
        server.save_cookies();

        Self { server, state }
    }

    /// Create a user through the API and return the stored record
    pub async fn create_user(&self, username: &str) -> User {
        let response = self
            .server
            .post("/users")
            .json(&json!({
                "username": username,
                "password": TEST_PASSWORD,
                "firstname": "Test",
                "lastname": "User",
            }))
            .await;
        assert_eq!(response.status_code(), StatusCode::CREATED);
        response.json::<User>()
    }

    pub async fn login(&self, username: &str, password: &str) -> TestResponse {
        self.server
            .post("/login")
            .json(&json!({ "username": username, "password": password }))
            .await
    }
}

/// The raw `Set-Cookie` line for `name`, if the response set one
pub fn set_cookie_line(response: &TestResponse, name: &str) -> Option<String> {
    let prefix = format!("{name}=");
    response
        .headers()
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .find(|line| line.starts_with(&prefix))
        .map(str::to_string)
}
