//! Process-wide resource setup.
//!
//! The binary calls these once at startup; the library components receive
//! the results (and a [`Config`](crate::Config)) explicitly.

mod client;
mod logger;

// Re-export public API
pub use client::init_client;
pub use logger::init_logger_with;
