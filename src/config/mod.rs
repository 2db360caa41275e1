//! Application configuration and constants.
//!
//! This module provides:
//! - Configuration constants (file prefixes, endpoints, timeouts, limits)
//! - The library `Config` and the logging option types
//! - The `clap` command-line definition used by the binary

mod cli;
mod constants;
mod types;

// Re-export all constants
pub use cli::{Cli, Command};
pub use constants::*;
pub use types::{Config, LogFormat, LogLevel};
