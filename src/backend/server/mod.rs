//! Server Module
//!
//! Everything needed to turn a configuration into a running Axum app.
//!
//! # Module Structure
//!
//! ```text
//! server/
//! ├── mod.rs    - Module exports and documentation
//! ├── state.rs  - AppState and FromRef implementations
//! ├── config.rs - Configuration loading (defaults, TOML file, environment)
//! └── init.rs   - Store selection and app creation
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use account_service::backend::server::{config::ServerConfig, create_app};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ServerConfig::load()?;
//! let app = create_app(config).await?;
//! # Ok(())
//! # }
//! ```

/// Application state management
pub mod state;

/// Server configuration loading
pub mod config;

/// Server initialization
pub mod init;

pub use config::{ConfigError, ServerConfig};
pub use init::{build_app, create_app};
pub use state::AppState;
