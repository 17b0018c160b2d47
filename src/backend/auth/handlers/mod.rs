//! Authentication Handlers Module
//!
//! # Module Structure
//!
//! ```text
//! handlers/
//! ├── mod.rs      - Module exports and documentation
//! ├── types.rs    - Request and response types
//! ├── login.rs    - POST /login
//! ├── profile.rs  - GET /profile
//! └── logout.rs   - POST /logout
//! ```

/// Request and response types
pub mod types;

/// Login handler
pub mod login;

/// Profile handler
pub mod profile;

/// Logout handler
pub mod logout;

pub use types::{LoginRequest, MessageResponse};

pub use login::login;
pub use logout::logout;
pub use profile::get_profile;
