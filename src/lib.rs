pub mod binder;
pub mod config;
pub mod handlers;
pub mod report;
