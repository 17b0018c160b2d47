//! Route Configuration Module
//!
//! This module configures all HTTP routes for the backend server.
//!
//! # Module Structure
//!
//! ```text
//! routes/
//! ├── mod.rs        - Module exports and documentation
//! ├── router.rs     - Main router creation and middleware
//! └── api_routes.rs - User and auth endpoints
//! ```
//!
//! # Routes
//!
//! | Method | Path | Handler |
//! |---|---|---|
//! | GET | `/health` | liveness check |
//! | GET, POST | `/users` | `list_users`, `create_user` |
//! | GET, PUT, PATCH, DELETE | `/users/{id}` | `get_user`, `update_user`, `delete_user` |
//! | POST | `/login` | `login` |
//! | POST | `/logout` | `logout` |
//! | GET | `/profile` | `get_profile` (behind `require_auth`) |
//!
//! Anything else falls through to a plain text `404 Not Found`.

/// Main router creation
pub mod router;

/// User and auth routes
pub mod api_routes;

pub use router::create_router;
