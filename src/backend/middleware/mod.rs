//! Middleware Module
//!
//! - **`session`** - The `tower-sessions` layer behind the `sid` cookie
//! - **`auth`** - Guard for routes that need a logged-in caller
//!
//! # Example
//!
//! ```rust,ignore
//! use axum::{middleware, routing::get, Router};
//!
//! let router = Router::new()
//!     .route(
//!         "/profile",
//!         get(get_profile).route_layer(middleware::from_fn_with_state(state.clone(), require_auth)),
//!     )
//!     .layer(session_layer(MemoryStore::default(), &state.config))
//!     .with_state(state);
//! ```

pub mod auth;
pub mod session;

pub use auth::require_auth;
pub use session::session_layer;
