//! Backend Module
//!
//! All server-side code for the account service.
//!
//! # Architecture
//!
//! - **`server`** - Configuration, application state, app creation
//! - **`routes`** - Route configuration and router assembly
//! - **`users`** - User store and the user CRUD handlers
//! - **`auth`** - Password hashing, signed cookies, sessions, auth handlers
//! - **`middleware`** - Session loading and the authentication guard
//! - **`error`** - Backend error type and its HTTP conversion
//!
//! # Module Structure
//!
//! ```text
//! backend/
//! ├── mod.rs          - Module exports and documentation
//! ├── server/         - Config, state, initialisation
//! ├── routes/         - Route configuration
//! ├── users/          - User store and CRUD handlers
//! ├── auth/           - Login, profile, logout and their building blocks
//! ├── middleware/     - Session layer and auth guard
//! └── error/          - Error types
//! ```
//!
//! # State Management
//!
//! `AppState` is cloned into every handler and holds:
//! - the user store (`Arc<dyn UserStore>`)
//! - the cookie signer
//! - the loaded configuration
//!
//! The in-memory user store guards its map with `tokio::sync::RwLock`. The
//! lock is never held across a bcrypt computation, which runs on the blocking
//! pool.

/// Server setup and configuration
pub mod server;

/// Route configuration
pub mod routes;

/// User store and user management handlers
pub mod users;

/// Authentication and session management
pub mod auth;

/// Middleware for request processing
pub mod middleware;

/// Backend error types
pub mod error;

pub use error::BackendError;
pub use server::create_app;
