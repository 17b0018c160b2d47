//! Users Module
//!
//! User records, the store they live in, and the CRUD handlers.
//!
//! # Module Structure
//!
//! ```text
//! users/
//! ├── mod.rs      - Module exports and documentation
//! ├── store.rs    - UserStore trait, NewUser, UserChanges, StoreError
//! ├── memory.rs   - In-memory store (default)
//! ├── sqlite.rs   - SQLite store (when DATABASE_URL is set)
//! └── handlers.rs - GET/POST/PUT/PATCH/DELETE /users handlers
//! ```
//!
//! # Store Contract
//!
//! - `create` assigns the identity and rejects duplicate usernames
//! - `edit` applies only the fields that are present and never touches the
//!   password hash
//! - `delete` reports whether a record was removed
//!
//! Handlers never generate ids or check uniqueness themselves.

/// Store trait and its input types
pub mod store;

/// In-memory user store
pub mod memory;

/// SQLite user store
pub mod sqlite;

/// User CRUD handlers
pub mod handlers;

pub use handlers::{create_user, delete_user, get_user, list_users, update_user};
pub use memory::MemoryUserStore;
pub use sqlite::SqliteUserStore;
pub use store::{NewUser, StoreError, UserChanges, UserStore};
