//! Core domain types for the opkit operation registry.
//!
//! Handlers contribute named, typed, asynchronously-executed operations;
//! the [`Api`] aggregator merges every handler's [`Operations`] collection
//! into one addressable, deterministically-ordered surface. Nothing in
//! this crate knows about the CLI — the binder in the `opkit` package
//! works purely from the metadata exposed here.

pub mod api;
pub mod collection;
pub mod errors;
pub mod handler;
pub mod operation;
pub mod property;
pub mod result;

pub use api::Api;
pub use collection::PropertyCollection;
pub use errors::PropertyError;
pub use handler::Handler;
pub use operation::{Operation, Operations};
pub use property::{Audience, OpaqueValue, Property, PropertyType, PropertyUsage, Value};
pub use result::{OperationResult, Outcome};
