/// User model and store operations
///
/// This module provides the User record and the lookups the API handlers
/// need. The store table uses camelCase column names for the name and phone
/// fields, mirrored here with serde renames.
///
/// # Schema
///
/// ```text
/// users (
///     id          uuid primary key,
///     username    text,
///     password    text,          -- stored as submitted, no hashing by design
///     nameFirst   text,
///     nameLast    text,
///     email       text,
///     phoneNumber text,
///     hours       bigint default 0,
///     sessions    bigint default 0
/// )
/// ```
///
/// Username and email uniqueness is enforced by lookup-before-insert in the
/// handlers, not by a store-level constraint.
///
/// # Example
///
/// ```no_run
/// use momsquad_shared::models::user::{NewUser, User};
/// use momsquad_shared::store::StoreClient;
///
/// # async fn example() -> Result<(), momsquad_shared::store::StoreError> {
/// let store = StoreClient::new("https://project.example.co", "service-key")?;
///
/// let user = User::create(
///     &store,
///     NewUser {
///         username: "mary".to_string(),
///         password: "hunter22".to_string(),
///         name_first: "Mary".to_string(),
///         name_last: "Major".to_string(),
///         email: "mary@example.com".to_string(),
///         phone_number: "555 123 4567".to_string(),
///     },
/// )
/// .await?;
/// println!("created user {}", user.id);
/// # Ok(())
/// # }
/// ```

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::store::{StoreClient, StoreError};

/// Store table holding user rows
pub const TABLE: &str = "users";

/// A full user row as stored
///
/// Includes the plaintext password column. Handlers that expose users to
/// clients should prefer [`UserProfile`] unless they deliberately return the
/// raw row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique user ID
    pub id: Uuid,

    /// Login name, unique across users
    pub username: String,

    /// Password as submitted at registration (plaintext by design)
    pub password: String,

    /// First name
    #[serde(rename = "nameFirst")]
    pub name_first: String,

    /// Last name
    #[serde(rename = "nameLast")]
    pub name_last: String,

    /// Email address, unique across users
    pub email: String,

    /// Phone number
    #[serde(rename = "phoneNumber")]
    pub phone_number: String,

    /// Accumulated hours counter (store default 0)
    pub hours: i64,

    /// Session counter (store default 0)
    pub sessions: i64,
}

/// Input for creating a user
///
/// The store assigns the id and the hours/sessions defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewUser {
    pub username: String,
    pub password: String,
    #[serde(rename = "nameFirst")]
    pub name_first: String,
    #[serde(rename = "nameLast")]
    pub name_last: String,
    pub email: String,
    #[serde(rename = "phoneNumber")]
    pub phone_number: String,
}

/// Password-free projection returned by the single-user endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: Uuid,
    #[serde(rename = "nameFirst")]
    pub name_first: String,
    #[serde(rename = "nameLast")]
    pub name_last: String,
    pub email: String,
    #[serde(rename = "phoneNumber")]
    pub phone_number: String,
    pub hours: i64,
    pub sessions: i64,
}

/// Minimal projection used by search and member listings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserSummary {
    pub id: Uuid,
    #[serde(rename = "nameFirst")]
    pub name_first: String,
    #[serde(rename = "nameLast")]
    pub name_last: String,
}

impl User {
    /// Inserts a new user and returns the stored row, including the
    /// store-assigned id and counter defaults.
    pub async fn create(store: &StoreClient, data: NewUser) -> Result<Self, StoreError> {
        store.insert(TABLE, &data).await
    }

    /// Finds a user by username. Returns `None` when no row matches.
    pub async fn find_by_username(
        store: &StoreClient,
        username: &str,
    ) -> Result<Option<Self>, StoreError> {
        let rows: Option<Vec<User>> = store.select(TABLE, "*", &[("username", username)]).await?;
        Ok(rows.unwrap_or_default().into_iter().next())
    }

    /// Finds a user by email address. Returns `None` when no row matches.
    pub async fn find_by_email(
        store: &StoreClient,
        email: &str,
    ) -> Result<Option<Self>, StoreError> {
        let rows: Option<Vec<User>> = store.select(TABLE, "*", &[("email", email)]).await?;
        Ok(rows.unwrap_or_default().into_iter().next())
    }

    /// Fetches the password-free profile projection for one user.
    pub async fn find_profile(
        store: &StoreClient,
        id: Uuid,
    ) -> Result<Option<UserProfile>, StoreError> {
        let rows: Option<Vec<UserProfile>> = store
            .select(
                TABLE,
                "id,nameFirst,nameLast,email,phoneNumber,hours,sessions",
                &[("id", &id.to_string())],
            )
            .await?;
        Ok(rows.unwrap_or_default().into_iter().next())
    }

    /// Lists all user rows exactly as stored.
    ///
    /// `None` means the store reported an absent result rather than an empty
    /// table; the list endpoint maps that to 404.
    pub async fn list(store: &StoreClient) -> Result<Option<Vec<Self>>, StoreError> {
        store.select(TABLE, "*", &[]).await
    }

    /// Lists the id/nameFirst/nameLast projection of every user.
    pub async fn list_summaries(
        store: &StoreClient,
    ) -> Result<Option<Vec<UserSummary>>, StoreError> {
        store.select(TABLE, "id,nameFirst,nameLast", &[]).await
    }

    /// Fetches the summary projection for a single user id.
    pub async fn find_summary(
        store: &StoreClient,
        id: Uuid,
    ) -> Result<Option<UserSummary>, StoreError> {
        let rows: Option<Vec<UserSummary>> = store
            .select(TABLE, "id,nameFirst,nameLast", &[("id", &id.to_string())])
            .await?;
        Ok(rows.unwrap_or_default().into_iter().next())
    }
}
