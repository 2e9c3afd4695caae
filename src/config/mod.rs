//! Configuration module
//!
//! Settings for the store, the HTTP service, shell display and logging,
//! read from a TOML file in the platform config directory.

pub mod config;

pub use config::{Config, DisplayConfig, LoggingConfig, ServerConfig, StoreConfig};
