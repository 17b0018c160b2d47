/**
 * User Types
 *
 * The user record as stored and returned by the service, and the request
 * bodies accepted by the user endpoints.
 */

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A stored user account
///
/// Records are returned verbatim by the user endpoints. `password` always
/// holds a bcrypt hash; the plaintext never reaches the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Identity assigned by the store
    pub id: Uuid,
    /// Login name, unique across the store
    pub username: String,
    /// bcrypt hash of the password
    pub password: String,
    pub firstname: String,
    pub lastname: String,
}

/// Body of `POST /users`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUserRequest {
    pub username: String,
    /// Plaintext password, hashed before it is stored
    pub password: String,
    pub firstname: String,
    pub lastname: String,
}

/// Body of `PUT /users/{id}` and `PATCH /users/{id}`
///
/// Every field is optional. `password` is accepted so existing clients keep
/// working, but it is never applied: passwords cannot change through this
/// path.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateUserRequest {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub firstname: Option<String>,
    #[serde(default)]
    pub lastname: Option<String>,
}
