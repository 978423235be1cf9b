/// Squad model and store operations
///
/// # Schema
///
/// ```text
/// squad (
///     id      uuid primary key,
///     name    text,
///     nameMom text
/// )
/// ```
///
/// Squad ids are generated by the service at creation time, not by the store.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::store::{StoreClient, StoreError};

/// Store table holding squad rows
pub const TABLE: &str = "squad";

/// A squad row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Squad {
    pub id: Uuid,

    /// Squad display name
    pub name: String,

    /// Name of the squad's mom
    #[serde(rename = "nameMom")]
    pub name_mom: String,
}

/// Input for creating a squad, with a service-generated id
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewSquad {
    pub id: Uuid,
    pub name: String,
    #[serde(rename = "nameMom")]
    pub name_mom: String,
}

impl NewSquad {
    /// Builds the insert payload with a fresh id.
    pub fn new(name: String, name_mom: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            name_mom,
        }
    }
}

impl Squad {
    /// Inserts a new squad and returns the stored row.
    pub async fn create(store: &StoreClient, data: NewSquad) -> Result<Self, StoreError> {
        store.insert(TABLE, &data).await
    }

    /// Lists all squads (id, name, nameMom).
    ///
    /// `None` means the store reported an absent result; the list endpoint
    /// maps that to 404.
    pub async fn list(store: &StoreClient) -> Result<Option<Vec<Self>>, StoreError> {
        store.select(TABLE, "id,name,nameMom", &[]).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_squad_generates_distinct_ids() {
        let a = NewSquad::new("Strollers".to_string(), "Dana".to_string());
        let b = NewSquad::new("Strollers".to_string(), "Dana".to_string());
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_squad_serializes_name_mom_column() {
        let squad = Squad {
            id: Uuid::nil(),
            name: "Strollers".to_string(),
            name_mom: "Dana".to_string(),
        };
        let value = serde_json::to_value(&squad).unwrap();
        assert_eq!(value["nameMom"], "Dana");
    }
}
