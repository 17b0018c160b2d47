/**
 * Logout Handler
 *
 * POST /logout
 *
 * Both auth cookies are cleared on every call, whether or not they were
 * set. The server-side session is deleted only when `logout_clears_session`
 * is enabled; by default it keeps its login fields, and the auth guard
 * rejects it anyway once the cookies are gone.
 */

use axum::{
    extract::State,
    http::{header::SET_COOKIE, StatusCode},
    response::{AppendHeaders, IntoResponse, Json},
};

use crate::backend::auth::cookies::{clear_cookie, IS_AUTHENTICATED_COOKIE, USER_ID_COOKIE};
use crate::backend::auth::handlers::types::MessageResponse;
use crate::backend::auth::sessions::CurrentSession;
use crate::backend::error::BackendError;
use crate::backend::server::state::AppState;

pub async fn logout(
    State(state): State<AppState>,
    session: CurrentSession,
) -> Result<impl IntoResponse, BackendError> {
    let secure = state.config.secure_cookies;

    if state.config.logout_clears_session {
        session.clear().await?;
        tracing::debug!("Session cleared on logout");
    }

    tracing::info!("Logged out");

    Ok((
        StatusCode::OK,
        AppendHeaders([
            (SET_COOKIE, clear_cookie(IS_AUTHENTICATED_COOKIE, secure)),
            (SET_COOKIE, clear_cookie(USER_ID_COOKIE, secure)),
        ]),
        Json(MessageResponse::new("Logged out")),
    ))
}
