//! Client for the hosted data store.
//!
//! The store is a managed relational service reached over HTTPS. Tables are
//! addressed by name and queried with column projections and equality
//! filters; there is no local cache or replica.

pub mod client;

pub use client::{StoreClient, StoreError};
