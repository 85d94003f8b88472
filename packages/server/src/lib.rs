//! Rhetoric gateway HTTP service.
//!
//! Thin axum boundary over the [`pipeline`] crate: configuration from the
//! environment, a router with CORS/trace/timeout layers, and handlers that
//! map pipeline outcomes onto HTTP responses.

pub mod config;
pub mod server;

pub use config::Config;
