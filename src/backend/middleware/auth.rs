/**
 * Authentication Middleware
 *
 * Guards routes that need a logged-in caller. The server-side session is
 * authoritative; the signed auth cookies must agree with it.
 *
 * A request passes when:
 * 1. the session is authenticated and names a user
 * 2. the login is younger than the auth cookie TTL
 * 3. the signed `isAuthenticated` cookie verifies to `"true"`
 * 4. the signed `userId` cookie verifies and equals the session's user
 *
 * Anything else is 401 `{"message": "Not authenticated"}`. The guard only
 * reads the session; a lapsed login stays in place and keeps failing check 2
 * until the client logs in again, which rotates the session.
 */

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use chrono::Utc;
use uuid::Uuid;

use crate::backend::auth::cookies::{IS_AUTHENTICATED_COOKIE, USER_ID_COOKIE};
use crate::backend::auth::sessions::CurrentSession;
use crate::backend::error::BackendError;
use crate::backend::server::state::AppState;

const NOT_AUTHENTICATED: &str = "Not authenticated";

pub async fn require_auth(
    State(state): State<AppState>,
    session: CurrentSession,
    request: Request,
    next: Next,
) -> Result<Response, BackendError> {
    let current = session.data();

    let user_id = current.authenticated_user().ok_or_else(|| {
        tracing::warn!("Rejected request without an authenticated session");
        BackendError::unauthorized(NOT_AUTHENTICATED)
    })?;

    if current.auth_expired(state.config.auth_cookie_ttl(), Utc::now()) {
        tracing::warn!("Login window lapsed for user {}", user_id);
        return Err(BackendError::unauthorized(NOT_AUTHENTICATED));
    }

    let headers = request.headers();

    let flag = state.signer.read_signed(headers, IS_AUTHENTICATED_COOKIE);
    if flag.as_deref() != Some("true") {
        tracing::warn!("Missing or invalid isAuthenticated cookie for user {}", user_id);
        return Err(BackendError::unauthorized(NOT_AUTHENTICATED));
    }

    let cookie_user = state
        .signer
        .read_signed(headers, USER_ID_COOKIE)
        .and_then(|value| Uuid::parse_str(&value).ok());
    if cookie_user != Some(user_id) {
        tracing::warn!("userId cookie does not match session user {}", user_id);
        return Err(BackendError::unauthorized(NOT_AUTHENTICATED));
    }

    Ok(next.run(request).await)
}
