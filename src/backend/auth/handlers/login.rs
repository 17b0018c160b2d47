/**
 * Login Handler
 *
 * POST /login
 *
 * # Authentication Process
 *
 * 1. Look up the user by username (404 if absent)
 * 2. Verify the password against the stored bcrypt hash (401 on mismatch)
 * 3. Emit the signed auth cookies (`isAuthenticated`, `userId`)
 * 4. Rotate the session id and record the login in the session
 *
 * Failed attempts leave cookies and session untouched. There is no lockout
 * or attempt counting.
 */

use axum::{
    extract::State,
    http::{header::SET_COOKIE, StatusCode},
    response::{AppendHeaders, IntoResponse, Json},
};

use crate::backend::auth::cookies::{IS_AUTHENTICATED_COOKIE, USER_ID_COOKIE};
use crate::backend::auth::handlers::types::{LoginRequest, MessageResponse};
use crate::backend::auth::password::verify_password;
use crate::backend::auth::sessions::CurrentSession;
use crate::backend::error::BackendError;
use crate::backend::server::state::AppState;
use crate::backend::users::handlers::USER_NOT_FOUND;

/// Login handler
///
/// # Errors
///
/// * `404 Not Found` - no user with this username
/// * `401 Unauthorized` - the password does not match
/// * `500 Internal Server Error` - store or bcrypt failure
///
/// # Example Request
///
/// ```http
/// POST /login HTTP/1.1
/// Content-Type: application/json
///
/// { "username": "ada", "password": "password123" }
/// ```
///
/// # Example Response
///
/// ```http
/// HTTP/1.1 200 OK
/// Set-Cookie: isAuthenticated=s%3Atrue.<sig>; Max-Age=180; Path=/; Expires=...; HttpOnly
/// Set-Cookie: userId=s%3A<id>.<sig>; Max-Age=180; Path=/; Expires=...; HttpOnly
///
/// { "message": "Login authenticated" }
/// ```
pub async fn login(
    State(state): State<AppState>,
    session: CurrentSession,
    Json(request): Json<LoginRequest>,
) -> Result<impl IntoResponse, BackendError> {
    tracing::info!("Login request for: {}", request.username);

    let user = state
        .users
        .find_by_username(&request.username)
        .await?
        .ok_or_else(|| {
            tracing::warn!("User not found: {}", request.username);
            BackendError::not_found_json(USER_NOT_FOUND)
        })?;

    if !verify_password(&request.password, &user.password).await? {
        tracing::warn!("Invalid password for user: {}", request.username);
        return Err(BackendError::unauthorized("Password is invalid"));
    }

    let ttl = state.config.auth_cookie_ttl();
    let secure = state.config.secure_cookies;
    let user_id = user.id.to_string();
    let cookies = [
        (
            SET_COOKIE,
            state
                .signer
                .auth_cookie(IS_AUTHENTICATED_COOKIE, "true", ttl, secure),
        ),
        (
            SET_COOKIE,
            state.signer.auth_cookie(USER_ID_COOKIE, &user_id, ttl, secure),
        ),
    ];

    session.set_authenticated(user.id).await?;

    tracing::info!("User logged in successfully: {} ({})", user.username, user.id);

    Ok((
        StatusCode::OK,
        AppendHeaders(cookies),
        Json(MessageResponse::new("Login authenticated")),
    ))
}
