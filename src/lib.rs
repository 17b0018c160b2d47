//! Account Service - Main Library
//!
//! A small user account service built on Axum: user CRUD plus
//! cookie and session based authentication.
//!
//! # Module Structure
//!
//! - **`shared`** - Wire types (user record, request bodies)
//! - **`backend`** - Server-side code
//!   - User store trait with in-memory and SQLite implementations
//!   - Password hashing, signed cookies, server-side sessions
//!   - HTTP handlers, auth guard, router and server initialisation
//!
//! # Usage
//!
//! ```rust,no_run
//! use account_service::backend::server::{config::ServerConfig, init::create_app};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ServerConfig::load()?;
//! let app = create_app(config).await?;
//! let listener = tokio::net::TcpListener::bind("127.0.0.1:3000").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Authentication
//!
//! A successful `POST /login` records the caller as authenticated twice:
//! in two signed, HttpOnly cookies (`isAuthenticated`, `userId`) that expire
//! three minutes after login, and in the server-side session named by the
//! `sid` cookie. The session is authoritative; the guard in front of
//! `GET /profile` also requires the cookies to agree with it.

/// Shared types and data structures
pub mod shared;

/// Backend server-side code
pub mod backend;
