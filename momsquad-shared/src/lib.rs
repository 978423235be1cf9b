//! # MomSquad Shared Library
//!
//! This crate contains the types and store access code shared by the MomSquad
//! API server.
//!
//! ## Module Organization
//!
//! - `models`: User, squad, and membership records plus their store operations
//! - `store`: Client for the hosted data store's REST interface

pub mod models;
pub mod store;

/// Current version of the MomSquad shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
