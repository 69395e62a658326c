//! Built-in handlers.
//!
//! Domain handlers (authentication, project operations, …) live outside
//! this binary and are registered by whoever embeds the registry; the
//! config handler ships here so the binary has a working surface out of
//! the box.

pub mod config;

pub use config::ConfigHandler;
