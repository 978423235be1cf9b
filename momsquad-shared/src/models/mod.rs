//! Data models for MomSquad.
//!
//! Each model owns its store operations, taking a [`StoreClient`] handle the
//! way the handlers pass it down. The store is the single source of truth;
//! nothing here caches rows.
//!
//! [`StoreClient`]: crate::store::StoreClient

pub mod membership;
pub mod squad;
pub mod user;

pub use membership::{Membership, NewMembership};
pub use squad::{NewSquad, Squad};
pub use user::{NewUser, User, UserProfile, UserSummary};
