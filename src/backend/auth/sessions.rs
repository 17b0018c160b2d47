/**
 * Server-Side Sessions
 *
 * Sessions are managed by `tower-sessions`. The session layer (see
 * `middleware::session`) issues the `sid` cookie, persists records in SQLite
 * and expires them after a period of inactivity. A session is only stored
 * once something is written to it, which here means a successful login.
 *
 * The authentication state lives under a single key as [`SessionData`];
 * handlers reach it through the [`CurrentSession`] extractor.
 */

use std::time::Duration;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tower_sessions_sqlx_store::SqliteStore;
use uuid::Uuid;

use crate::backend::error::BackendError;
use crate::backend::users::sqlite::connect_pool;
use crate::backend::users::StoreError;

/// Session key holding [`SessionData`]
pub const SESSION_DATA_KEY: &str = "auth";

/// Authentication state of one client
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionData {
    pub is_authenticated: bool,
    pub user_id: Option<Uuid>,
    /// When the login that populated this session happened
    pub authenticated_at: Option<DateTime<Utc>>,
}

impl SessionData {
    pub fn authenticated(user_id: Uuid, at: DateTime<Utc>) -> Self {
        Self {
            is_authenticated: true,
            user_id: Some(user_id),
            authenticated_at: Some(at),
        }
    }

    /// The logged-in user, if the session is authenticated
    pub fn authenticated_user(&self) -> Option<Uuid> {
        self.user_id.filter(|_| self.is_authenticated)
    }

    /// Whether the login is older than `ttl` at `now` (or never happened)
    pub fn auth_expired(&self, ttl: Duration, now: DateTime<Utc>) -> bool {
        let Some(at) = self.authenticated_at else {
            return true;
        };
        match chrono::Duration::from_std(ttl) {
            Ok(ttl) => now.signed_duration_since(at) >= ttl,
            Err(_) => false,
        }
    }
}

/// Open the session store
///
/// Sessions share the configured database when there is one, so they
/// survive a restart; otherwise they go to a private in-memory database.
pub async fn load_session_store(database_url: Option<&str>) -> Result<SqliteStore, StoreError> {
    let pool = connect_pool(database_url.unwrap_or("sqlite::memory:")).await?;
    let store = SqliteStore::new(pool);
    store.migrate().await?;
    Ok(store)
}

/// The session attached to the current request
///
/// `data()` is the state as loaded at the start of the request; writes go
/// through the underlying `tower_sessions::Session`.
#[derive(Clone)]
pub struct CurrentSession {
    session: Session,
    data: SessionData,
}

impl CurrentSession {
    pub async fn load(session: Session) -> Result<Self, BackendError> {
        let data = session
            .get::<SessionData>(SESSION_DATA_KEY)
            .await?
            .unwrap_or_default();
        Ok(Self { session, data })
    }

    pub fn data(&self) -> &SessionData {
        &self.data
    }

    /// Record a successful login for `user_id`
    ///
    /// The session id is rotated first, so an id issued before the login
    /// never names an authenticated session.
    pub async fn set_authenticated(&self, user_id: Uuid) -> Result<(), BackendError> {
        self.session.cycle_id().await?;
        self.session
            .insert(SESSION_DATA_KEY, SessionData::authenticated(user_id, Utc::now()))
            .await?;
        Ok(())
    }

    /// Drop the session and its stored record
    pub async fn clear(&self) -> Result<(), BackendError> {
        self.session.flush().await?;
        Ok(())
    }
}

impl<S> FromRequestParts<S> for CurrentSession
where
    S: Send + Sync,
{
    type Rejection = BackendError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let session = Session::from_request_parts(parts, state)
            .await
            .map_err(|(_, message)| {
                tracing::error!("Session unavailable: {}", message);
                BackendError::internal(message)
            })?;
        Self::load(session).await
    }
}
