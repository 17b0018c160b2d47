/**
 * User Handlers
 *
 * Pass-through CRUD over the user store.
 *
 * # Routes
 *
 * - `GET /users` - list users
 * - `GET /users/{id}` - get one user (404 plain text)
 * - `POST /users` - create a user, hashing the password first
 * - `PUT|PATCH /users/{id}` - partial update, password never applied (404 JSON)
 * - `DELETE /users/{id}` - delete (404 plain text)
 *
 * An `{id}` that is not a UUID cannot name a stored user and answers 404
 * like any other unknown id.
 */

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use uuid::Uuid;

use crate::backend::auth::password::hash_password;
use crate::backend::error::BackendError;
use crate::backend::server::state::AppState;
use crate::backend::users::store::{NewUser, UserChanges, UserStore};
use crate::shared::{CreateUserRequest, UpdateUserRequest, User};

pub const USER_NOT_FOUND: &str = "User not found";

fn parse_user_id(raw: &str) -> Option<Uuid> {
    Uuid::parse_str(raw).ok()
}

async fn find_user(users: &dyn UserStore, raw_id: &str) -> Result<Option<User>, BackendError> {
    match parse_user_id(raw_id) {
        Some(id) => Ok(users.find_by_id(id).await?),
        None => Ok(None),
    }
}

/// GET /users
pub async fn list_users(
    State(users): State<Arc<dyn UserStore>>,
) -> Result<Json<Vec<User>>, BackendError> {
    let all = users.find_all().await?;
    tracing::debug!("Listing {} users", all.len());
    Ok(Json(all))
}

/// GET /users/{id}
pub async fn get_user(
    State(users): State<Arc<dyn UserStore>>,
    Path(id): Path<String>,
) -> Result<Json<User>, BackendError> {
    find_user(users.as_ref(), &id)
        .await?
        .map(Json)
        .ok_or_else(|| {
            tracing::warn!("User not found: {}", id);
            BackendError::not_found_text(USER_NOT_FOUND)
        })
}

/// POST /users
///
/// The plaintext password is hashed before the store sees it. Identity and
/// username uniqueness are left to the store; a duplicate username answers
/// 409.
pub async fn create_user(
    State(state): State<AppState>,
    Json(request): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<User>), BackendError> {
    tracing::info!("Create user request for: {}", request.username);

    let password = hash_password(&request.password, state.config.bcrypt_cost).await?;

    let user = state
        .users
        .create(NewUser {
            username: request.username,
            password,
            firstname: request.firstname,
            lastname: request.lastname,
        })
        .await?;

    tracing::info!("User created successfully: {} ({})", user.username, user.id);
    Ok((StatusCode::CREATED, Json(user)))
}

/// PUT /users/{id} and PATCH /users/{id}
///
/// Only username, firstname and lastname are forwarded. A `password` in the
/// body is ignored.
pub async fn update_user(
    State(users): State<Arc<dyn UserStore>>,
    Path(id): Path<String>,
    Json(request): Json<UpdateUserRequest>,
) -> Result<Json<User>, BackendError> {
    if request.password.is_some() {
        tracing::debug!("Ignoring password field in update for user {}", id);
    }

    let changes = UserChanges {
        username: request.username,
        firstname: request.firstname,
        lastname: request.lastname,
    };

    let updated = match parse_user_id(&id) {
        Some(user_id) => users.edit(user_id, changes).await?,
        None => None,
    };

    updated.map(Json).ok_or_else(|| {
        tracing::warn!("User not found for update: {}", id);
        BackendError::not_found_json(USER_NOT_FOUND)
    })
}

/// DELETE /users/{id}
pub async fn delete_user(
    State(users): State<Arc<dyn UserStore>>,
    Path(id): Path<String>,
) -> Result<(StatusCode, &'static str), BackendError> {
    let deleted = match parse_user_id(&id) {
        Some(user_id) => users.delete(user_id).await?,
        None => false,
    };

    if !deleted {
        tracing::warn!("User not found for delete: {}", id);
        return Err(BackendError::not_found_text(USER_NOT_FOUND));
    }

    tracing::info!("User deleted: {}", id);
    Ok((StatusCode::OK, "User deleted!"))
}
