/**
 * Profile Handler
 *
 * GET /profile
 *
 * Mounted behind `middleware::auth::require_auth`, so by the time this runs
 * the session is authenticated and agrees with the auth cookies. The user id
 * is read from the server-side session, never from the cookie.
 */

use axum::{extract::State, response::Json};

use crate::backend::auth::sessions::CurrentSession;
use crate::backend::error::BackendError;
use crate::backend::server::state::AppState;
use crate::backend::users::handlers::USER_NOT_FOUND;
use crate::shared::User;

/// Return the logged-in user's record
///
/// # Errors
///
/// * `401 Unauthorized` - the session carries no authenticated user
/// * `404 Not Found` - the user was deleted after logging in
pub async fn get_profile(
    State(state): State<AppState>,
    session: CurrentSession,
) -> Result<Json<User>, BackendError> {
    let user_id = session.data().authenticated_user().ok_or_else(|| {
        tracing::warn!("Profile requested without an authenticated session");
        BackendError::unauthorized("Not authenticated")
    })?;

    let user = state.users.find_by_id(user_id).await?.ok_or_else(|| {
        tracing::warn!("Profile user no longer exists: {}", user_id);
        BackendError::not_found_json(USER_NOT_FOUND)
    })?;

    Ok(Json(user))
}
