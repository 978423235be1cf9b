/// HTTP client for the hosted store's REST interface
///
/// This module wraps `reqwest` with the conventions the managed store expects:
/// - Tables live under `{base_url}/rest/v1/{table}`
/// - Reads are `GET` with a `select` projection and `column=eq.value` filters
/// - Writes are `POST` with `Prefer: return=representation` so the inserted
///   row comes back in the response body
/// - Every request carries the service key in `apikey` and `Authorization`
///
/// The client holds no state beyond the connection pool; it is constructed
/// once at startup and cloned into request handlers.
///
/// # Example
///
/// ```no_run
/// use momsquad_shared::store::StoreClient;
///
/// # async fn example() -> Result<(), momsquad_shared::store::StoreError> {
/// let store = StoreClient::new("https://project.example.co", "service-key")?;
///
/// let rows: Option<Vec<serde_json::Value>> = store
///     .select("users", "id,username", &[("username", "mary")])
///     .await?;
/// # Ok(())
/// # }
/// ```

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

/// Errors from the hosted store
#[derive(Error, Debug)]
pub enum StoreError {
    /// Client construction or configuration failure
    #[error("store configuration error: {0}")]
    Config(String),

    /// Network-level failure reaching the store
    #[error("store request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The store answered with a non-success status
    #[error("store error (status {status}): {message}")]
    Api { status: u16, message: String },

    /// An insert with `return=representation` came back empty
    #[error("store returned no representation for insert into {0}")]
    MissingRepresentation(String),
}

impl StoreError {
    /// Whether the store's error text points at a uniqueness violation.
    ///
    /// The uniqueness checks in the handlers run before the insert, so this
    /// only fires when a concurrent request won the race. Matching on the
    /// error text is the store's only signal for that case.
    pub fn is_duplicate(&self) -> bool {
        match self {
            StoreError::Api { message, .. } => {
                let lower = message.to_lowercase();
                lower.contains("duplicate") || lower.contains("unique")
            }
            _ => false,
        }
    }
}

/// Client handle for the hosted store
///
/// Cheap to clone; the underlying `reqwest::Client` shares its pool.
#[derive(Clone, Debug)]
pub struct StoreClient {
    http: reqwest::Client,
    base_url: String,
}

impl StoreClient {
    /// Creates a client for the store at `base_url` authenticated by
    /// `service_key`.
    pub fn new(base_url: &str, service_key: &str) -> Result<Self, StoreError> {
        let key_value = HeaderValue::from_str(service_key)
            .map_err(|e| StoreError::Config(format!("invalid service key: {}", e)))?;
        let bearer = HeaderValue::from_str(&format!("Bearer {}", service_key))
            .map_err(|e| StoreError::Config(format!("invalid service key: {}", e)))?;

        let mut headers = HeaderMap::new();
        headers.insert("apikey", key_value);
        headers.insert(AUTHORIZATION, bearer);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| StoreError::Config(format!("failed to build http client: {}", e)))?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    /// Selects rows from `table` with the given column projection and
    /// equality filters.
    ///
    /// Returns `None` when the store reports an absent result (a JSON `null`
    /// body), which the list endpoints treat differently from an empty list.
    pub async fn select<T: DeserializeOwned>(
        &self,
        table: &str,
        columns: &str,
        filters: &[(&str, &str)],
    ) -> Result<Option<Vec<T>>, StoreError> {
        let mut query: Vec<(String, String)> = vec![("select".to_string(), columns.to_string())];
        for (column, value) in filters {
            query.push((column.to_string(), format!("eq.{}", value)));
        }

        tracing::debug!(table, columns, filters = filters.len(), "store select");
        let response = self
            .http
            .get(self.table_url(table))
            .query(&query)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(StoreError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let rows: Option<Vec<T>> = response.json().await?;
        Ok(rows)
    }

    /// Inserts a single row into `table` and returns the stored
    /// representation, including server-side defaults.
    pub async fn insert<T: Serialize, R: DeserializeOwned>(
        &self,
        table: &str,
        row: &T,
    ) -> Result<R, StoreError> {
        tracing::debug!(table, "store insert");
        let response = self
            .http
            .post(self.table_url(table))
            .header("Prefer", "return=representation")
            .json(row)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(StoreError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let mut rows: Vec<R> = response.json().await?;
        if rows.is_empty() {
            return Err(StoreError::MissingRepresentation(table.to_string()));
        }
        Ok(rows.remove(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_url_strips_trailing_slash() {
        let store = StoreClient::new("https://db.example.com/", "key").unwrap();
        assert_eq!(
            store.table_url("users"),
            "https://db.example.com/rest/v1/users"
        );
    }

    #[test]
    fn test_is_duplicate_matches_store_error_text() {
        let err = StoreError::Api {
            status: 409,
            message: "duplicate key value violates unique constraint \"users_email_key\""
                .to_string(),
        };
        assert!(err.is_duplicate());

        let err = StoreError::Api {
            status: 409,
            message: "UNIQUE constraint failed".to_string(),
        };
        assert!(err.is_duplicate());

        let err = StoreError::Api {
            status: 500,
            message: "connection reset".to_string(),
        };
        assert!(!err.is_duplicate());
    }

    #[test]
    fn test_missing_representation_display() {
        let err = StoreError::MissingRepresentation("squad".to_string());
        assert_eq!(
            err.to_string(),
            "store returned no representation for insert into squad"
        );
    }
}
