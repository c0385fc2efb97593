//! Shared utilities

pub mod config;
pub mod fs;
pub mod shell;

pub use config::{Config, ConfigError};
pub use shell::Shell;
