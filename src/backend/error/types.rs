/**
 * Backend Error Types
 *
 * `BackendError` is returned by every handler. Expected outcomes (missing
 * user, wrong password, duplicate username) carry the message shown to the
 * client; internal failures keep their source for logging and are rendered
 * with a generic message.
 */

use axum::http::StatusCode;
use thiserror::Error;

use crate::backend::users::store::StoreError;

/// How an error body is rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyStyle {
    /// `text/plain` body holding the message
    Text,
    /// `{"message": ...}` JSON envelope
    Json,
}

/// Backend-specific error types
#[derive(Debug, Error)]
pub enum BackendError {
    /// The addressed user (by id, username or session) does not exist
    #[error("{message}")]
    NotFound {
        message: String,
        style: BodyStyle,
    },

    /// Credentials or session did not authenticate the caller
    #[error("{message}")]
    Unauthorized { message: String },

    /// The request collides with existing state
    #[error("{message}")]
    Conflict { message: String },

    /// Any other server-side failure
    #[error("Internal error: {message}")]
    Internal { message: String },

    /// User store failure
    #[error(transparent)]
    Store(#[from] StoreError),

    /// bcrypt failure while hashing or verifying
    #[error("Password hashing failed: {0}")]
    Hash(#[from] bcrypt::BcryptError),

    /// Session could not be loaded or written
    #[error("Session error: {0}")]
    Session(#[from] tower_sessions::session::Error),
}

impl BackendError {
    /// 404 rendered as plain text
    pub fn not_found_text(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
            style: BodyStyle::Text,
        }
    }

    /// 404 rendered as a JSON envelope
    pub fn not_found_json(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
            style: BodyStyle::Json,
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized {
            message: message.into(),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Get the HTTP status code for this error
    ///
    /// # Status Code Mapping
    ///
    /// - `NotFound` - 404
    /// - `Unauthorized` - 401
    /// - `Conflict` and `Store(DuplicateUsername)` - 409
    /// - everything else - 500
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            Self::Conflict { .. } => StatusCode::CONFLICT,
            Self::Store(StoreError::DuplicateUsername(_)) => StatusCode::CONFLICT,
            Self::Internal { .. } | Self::Store(_) | Self::Hash(_) | Self::Session(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Message shown to the client
    ///
    /// Internal failures are not described to the client.
    pub fn message(&self) -> String {
        match self {
            Self::NotFound { message, .. }
            | Self::Unauthorized { message }
            | Self::Conflict { message } => message.clone(),
            Self::Store(StoreError::DuplicateUsername(_)) => "Username already exists".to_string(),
            Self::Internal { .. } | Self::Store(_) | Self::Hash(_) | Self::Session(_) => {
                "Internal server error".to_string()
            }
        }
    }

    /// Body style for this error
    pub fn body_style(&self) -> BodyStyle {
        match self {
            Self::NotFound { style, .. } => *style,
            _ => BodyStyle::Json,
        }
    }
}
