/**
 * Server Initialization
 *
 * This module handles the initialization and setup of the Axum HTTP server,
 * including store selection, state creation and route configuration.
 *
 * # Initialization Process
 *
 * 1. Open the user store (SQLite when `database_url` is set, memory otherwise)
 * 2. Open the session store (the same database, or a private in-memory one)
 * 3. Create the application state (cookie signer, config)
 * 4. Create the router
 * 5. Start the periodic deletion of expired sessions
 */

use std::sync::Arc;

use axum::Router;
use tower_sessions::{ExpiredDeletion, SessionStore};

use crate::backend::auth::sessions::load_session_store;
use crate::backend::routes::router::create_router;
use crate::backend::server::config::ServerConfig;
use crate::backend::server::state::AppState;
use crate::backend::users::{MemoryUserStore, SqliteUserStore, StoreError, UserStore};

/// Open the user store named by the configuration
pub async fn load_user_store(config: &ServerConfig) -> Result<Arc<dyn UserStore>, StoreError> {
    match &config.database_url {
        Some(url) => {
            tracing::info!("Using SQLite user store");
            let store = SqliteUserStore::connect(url).await?;
            Ok(Arc::new(store))
        }
        None => {
            tracing::info!("DATABASE_URL not set, using in-memory user store");
            Ok(Arc::new(MemoryUserStore::new()))
        }
    }
}

/// Build the router for an existing state and session store, without
/// background tasks
pub fn build_app<S>(state: AppState, sessions: S) -> Router<()>
where
    S: SessionStore + Clone,
{
    create_router(state, sessions)
}

/// Create and configure the Axum application
///
/// Fails only when the configured database cannot be opened.
pub async fn create_app(config: ServerConfig) -> Result<Router<()>, StoreError> {
    tracing::info!("Initializing account service");

    let users = load_user_store(&config).await?;
    let sessions = load_session_store(config.database_url.as_deref()).await?;
    let cleanup_interval = config.session_cleanup_interval();
    let app_state = AppState::new(config, users);

    let app = build_app(app_state, sessions.clone());

    // Delete expired sessions
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(cleanup_interval);
        loop {
            interval.tick().await;
            if let Err(e) = sessions.delete_expired().await {
                tracing::warn!("Failed to delete expired sessions: {:?}", e);
            }
        }
    });

    tracing::info!("Router configured with periodic session cleanup");

    Ok(app)
}
