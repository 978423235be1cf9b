/// Squad membership model and store operations
///
/// A membership links a user to a squad. The creator of a squad gets a row
/// with the `primary` flag set; everyone who joins later gets `primary =
/// false`. At most one membership may exist per (user_id, squad_id) pair,
/// enforced by [`Membership::find_pair`] before insert rather than by a
/// store-level constraint.
///
/// # Schema
///
/// ```text
/// user_squad_memberships (
///     id        uuid primary key,
///     user_id   uuid references users(id),
///     squad_id  uuid references squad(id),
///     primary   boolean,
///     joined_at timestamptz
/// )
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::store::{StoreClient, StoreError};

/// Store table holding membership rows
pub const TABLE: &str = "user_squad_memberships";

/// A membership row linking a user to a squad
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Membership {
    pub id: Uuid,

    /// The member
    pub user_id: Uuid,

    /// The squad joined
    pub squad_id: Uuid,

    /// Marks the squad's creator/admin
    #[serde(rename = "primary")]
    pub is_primary: bool,

    /// When the user joined, UTC
    pub joined_at: DateTime<Utc>,
}

/// Input for creating a membership
///
/// The id and join timestamp are generated by the service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewMembership {
    pub id: Uuid,
    pub user_id: Uuid,
    pub squad_id: Uuid,
    #[serde(rename = "primary")]
    pub is_primary: bool,
    pub joined_at: DateTime<Utc>,
}

impl NewMembership {
    /// Builds the insert payload with a fresh id and the current UTC time.
    pub fn new(user_id: Uuid, squad_id: Uuid, is_primary: bool) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            squad_id,
            is_primary,
            joined_at: Utc::now(),
        }
    }
}

impl Membership {
    /// Inserts a membership and returns the stored row.
    pub async fn create(store: &StoreClient, data: NewMembership) -> Result<Self, StoreError> {
        store.insert(TABLE, &data).await
    }

    /// Lists memberships, optionally filtered to one squad.
    ///
    /// An absent store result is folded into an empty list here; the
    /// membership list endpoint never 404s.
    pub async fn list(
        store: &StoreClient,
        squad_id: Option<Uuid>,
    ) -> Result<Vec<Self>, StoreError> {
        let rows: Option<Vec<Membership>> = match squad_id {
            Some(id) => {
                store
                    .select(TABLE, "*", &[("squad_id", &id.to_string())])
                    .await?
            }
            None => store.select(TABLE, "*", &[]).await?,
        };
        Ok(rows.unwrap_or_default())
    }

    /// Looks up the membership for a (user, squad) pair, if any.
    pub async fn find_pair(
        store: &StoreClient,
        user_id: Uuid,
        squad_id: Uuid,
    ) -> Result<Option<Self>, StoreError> {
        let rows: Option<Vec<Membership>> = store
            .select(
                TABLE,
                "*",
                &[
                    ("user_id", &user_id.to_string()),
                    ("squad_id", &squad_id.to_string()),
                ],
            )
            .await?;
        Ok(rows.unwrap_or_default().into_iter().next())
    }
}
