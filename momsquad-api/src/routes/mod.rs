//! Route handlers.
//!
//! Every non-redirect endpoint answers with the [`Envelope`] shape
//! `{message, data}`; the login and probe endpoints omit `data`.

pub mod auth;
pub mod health;
pub mod memberships;
pub mod squads;
pub mod users;

use serde::{Deserialize, Serialize};

/// Uniform response envelope
#[derive(Debug, Serialize, Deserialize)]
pub struct Envelope<T> {
    /// Human-readable outcome description
    pub message: String,

    /// Endpoint payload; `null` or `[]` when there is nothing to return
    pub data: T,
}

impl<T> Envelope<T> {
    /// Builds an envelope
    pub fn new(message: impl Into<String>, data: T) -> Self {
        Self {
            message: message.into(),
            data,
        }
    }
}
