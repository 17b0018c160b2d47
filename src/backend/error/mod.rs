//! Backend Error Module
//!
//! Error types used by the HTTP handlers and their conversion to responses.
//!
//! # Module Structure
//!
//! ```text
//! error/
//! ├── mod.rs        - Module exports and documentation
//! ├── types.rs      - Error type definitions
//! └── conversion.rs - IntoResponse implementation
//! ```
//!
//! # Response Bodies
//!
//! Endpoints disagree on how failures are rendered: `GET /users/{id}` and
//! `DELETE /users/{id}` answer 404 with plain text, everything else answers
//! with a `{"message": ...}` JSON envelope. The error carries its
//! [`BodyStyle`] so each handler keeps its established wire format.

/// Error type definitions
pub mod types;

/// Error conversion implementations
pub mod conversion;

pub use types::{BackendError, BodyStyle};
