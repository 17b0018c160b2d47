//! Authentication Module
//!
//! Password hashing, signed cookies, server-side sessions and the login,
//! profile and logout handlers.
//!
//! # Module Structure
//!
//! ```text
//! auth/
//! ├── mod.rs          - Module exports and documentation
//! ├── password.rs     - bcrypt hash/verify on the blocking pool
//! ├── cookies.rs      - HMAC-signed cookies and Set-Cookie rendering
//! ├── sessions.rs     - Session data, SQLite session store, CurrentSession extractor
//! └── handlers/       - HTTP handlers
//! ```
//!
//! # Authentication Flow
//!
//! 1. **Login**: username looked up, password verified, then two signed
//!    cookies (`isAuthenticated`, `userId`, three minutes) are set and the
//!    server-side session is rotated and marked authenticated
//! 2. **Profile**: the auth guard checks session and cookies agree, then the
//!    user named by the session is returned
//! 3. **Logout**: both cookies are cleared
//!
//! # Security
//!
//! - Passwords are hashed with bcrypt before storage
//! - Auth cookies are HttpOnly and HMAC-SHA256 signed
//! - The auth cookies are not renewed on activity; the guard enforces the
//!   same three-minute window against the session's login time

/// Password hashing
pub mod password;

/// Signed cookies
pub mod cookies;

/// Server-side sessions
pub mod sessions;

/// HTTP handlers for authentication endpoints
pub mod handlers;

pub use cookies::CookieSigner;
pub use handlers::{get_profile, login, logout, LoginRequest, MessageResponse};
pub use sessions::{load_session_store, CurrentSession, SessionData};
