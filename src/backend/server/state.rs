/**
 * Application State Management
 *
 * This module defines the application state structure and implements
 * the necessary `FromRef` traits for Axum state extraction.
 *
 * # Architecture
 *
 * The `AppState` struct serves as the central state container for the
 * application, holding:
 * - The user store (memory or SQLite, behind the `UserStore` trait)
 * - The cookie signer
 * - The loaded configuration
 *
 * Everything is behind `Arc` or is cheaply clonable, so Axum can clone the
 * state for every request. Sessions are not part of the state: they are
 * owned by the session layer and reached through `CurrentSession`.
 *
 * # Example
 *
 * ```rust,no_run
 * use account_service::backend::server::state::AppState;
 * use axum::extract::State;
 *
 * async fn handler(State(state): State<AppState>) {
 *     let users = state.users.find_all().await.unwrap_or_default();
 *     // ...
 * }
 * ```
 */

use std::sync::Arc;

use axum::extract::FromRef;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use rand::RngCore;

use crate::backend::auth::CookieSigner;
use crate::backend::server::config::ServerConfig;
use crate::backend::users::UserStore;

/// Application state shared by every handler
#[derive(Clone)]
pub struct AppState {
    /// User records
    pub users: Arc<dyn UserStore>,

    /// Signs and verifies the auth cookies
    pub signer: CookieSigner,

    pub config: Arc<ServerConfig>,
}

impl AppState {
    pub fn new(config: ServerConfig, users: Arc<dyn UserStore>) -> Self {
        let secret = match &config.cookie_secret {
            Some(secret) => secret.clone(),
            None => {
                tracing::warn!(
                    "COOKIE_SECRET not set, using a random secret; auth cookies will not survive a restart"
                );
                random_secret()
            }
        };

        Self {
            users,
            signer: CookieSigner::new(secret),
            config: Arc::new(config),
        }
    }
}

fn random_secret() -> String {
    let mut bytes = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut bytes);
    STANDARD.encode(bytes)
}

/// Lets handlers take `State<Arc<dyn UserStore>>` directly
impl FromRef<AppState> for Arc<dyn UserStore> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.users.clone()
    }
}

impl FromRef<AppState> for CookieSigner {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.signer.clone()
    }
}

impl FromRef<AppState> for Arc<ServerConfig> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.config.clone()
    }
}
