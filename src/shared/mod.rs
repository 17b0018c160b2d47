//! Shared Module
//!
//! Types that travel over the wire between the account service and its
//! clients. Everything here is plain serde data with no server dependencies.

/// User record and user request bodies
pub mod user;

pub use user::{CreateUserRequest, UpdateUserRequest, User};
