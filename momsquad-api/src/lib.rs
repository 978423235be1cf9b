//! # MomSquad API Server library
//!
//! Exposes the router, configuration, and error types so integration tests
//! can drive the application without a running process.

pub mod app;
pub mod config;
pub mod error;
pub mod oauth;
pub mod routes;
