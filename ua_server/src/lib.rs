//! HTTP server for the user authentication service.
//!
//! Thin axum surface over [`user_auth`]: request routing, session cookies,
//! configuration, structured logging, and Prometheus metrics. All domain
//! behavior lives in the library crate.

pub mod api;
pub mod config;
pub mod logging;
pub mod metrics;
