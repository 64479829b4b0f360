//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! .env file (dotenvy, process variables win)
//!     → defaults
//!     → optional TOML file (loader.rs)
//!     → environment overrides (DB_SERVER, DB_PORT, PORT, ...)
//!     → validation.rs (semantic checks)
//!     → StorefrontConfig (validated, immutable)
//! ```
//!
//! # Design Decisions
//! - Config is read once at startup; the pool is built from it and never rebuilt
//! - All fields have defaults to allow an empty environment in development
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, load_env_file, ConfigError};
pub use schema::{DatabaseConfig, ListenerConfig, LogFormat, StorefrontConfig};
