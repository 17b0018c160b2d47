/**
 * Authentication Handler Types
 *
 * Request and response bodies used by the login, profile and logout
 * handlers.
 */

use serde::{Deserialize, Serialize};

/// Login request
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct LoginRequest {
    /// Username to authenticate as
    pub username: String,
    /// Plaintext password, compared against the stored hash
    pub password: String,
}

/// `{"message": ...}` envelope returned by the auth endpoints
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
