/// Configuration management for the API server
///
/// Configuration is loaded once at startup from environment variables and
/// passed down explicitly; there is no ambient global state.
///
/// # Environment Variables
///
/// - `STORE_URL`: base URL of the hosted data store (required)
/// - `STORE_SERVICE_KEY`: service key for the store (required)
/// - `GOOGLE_CLIENT_ID`: OAuth client id (required)
/// - `GOOGLE_CLIENT_SECRET`: OAuth client secret (required)
/// - `FRONTEND_URL`: base URL the OAuth flow redirects back to (required)
/// - `BACKEND_URL`: public base URL of this server, used to build the OAuth
///   redirect URI (required)
/// - `API_HOST`: host to bind to (default: 0.0.0.0)
/// - `API_PORT`: port to bind to (default: 8000)
/// - `GOOGLE_TOKEN_URL`, `GOOGLE_JWKS_URL`: identity-provider endpoint
///   overrides, used by tests
///
/// # Example
///
/// ```no_run
/// use momsquad_api::config::Config;
///
/// # fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// println!("listening on {}", config.bind_address());
/// # Ok(())
/// # }
/// ```

use serde::{Deserialize, Serialize};
use std::env;

/// Default Google endpoint for exchanging an authorization code
pub const GOOGLE_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";

/// Default Google endpoint serving the signing keys for identity tokens
pub const GOOGLE_JWKS_URL: &str = "https://www.googleapis.com/oauth2/v3/certs";

/// Complete application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// API server configuration
    pub api: ApiConfig,

    /// Hosted store configuration
    pub store: StoreConfig,

    /// Google OAuth configuration
    pub google: GoogleConfig,

    /// Frontend/backend base URLs for the OAuth redirects
    pub urls: UrlConfig,
}

/// API server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Host to bind to
    pub host: String,

    /// Port to bind to
    pub port: u16,
}

/// Hosted store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Base URL of the store
    pub url: String,

    /// Service key sent with every store request
    pub service_key: String,
}

/// Google OAuth configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoogleConfig {
    /// OAuth client id; also the required audience of identity tokens
    pub client_id: String,

    /// OAuth client secret
    pub client_secret: String,

    /// Token-exchange endpoint
    pub token_url: String,

    /// Signing-key (JWKS) endpoint
    pub jwks_url: String,
}

/// Base URLs used when redirecting the user agent
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UrlConfig {
    /// Frontend base URL (redirect target after OAuth)
    pub frontend: String,

    /// Public base URL of this server
    pub backend: String,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a required variable is missing or `API_PORT` is
    /// not a valid port number.
    pub fn from_env() -> anyhow::Result<Self> {
        // Load .env file if present (for development)
        dotenvy::dotenv().ok();

        let host = env::var("API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = env::var("API_PORT")
            .unwrap_or_else(|_| "8000".to_string())
            .parse::<u16>()?;

        let store_url = env::var("STORE_URL")
            .map_err(|_| anyhow::anyhow!("STORE_URL environment variable is required"))?;
        let service_key = env::var("STORE_SERVICE_KEY")
            .map_err(|_| anyhow::anyhow!("STORE_SERVICE_KEY environment variable is required"))?;

        let client_id = env::var("GOOGLE_CLIENT_ID")
            .map_err(|_| anyhow::anyhow!("GOOGLE_CLIENT_ID environment variable is required"))?;
        let client_secret = env::var("GOOGLE_CLIENT_SECRET")
            .map_err(|_| anyhow::anyhow!("GOOGLE_CLIENT_SECRET environment variable is required"))?;
        let token_url = env::var("GOOGLE_TOKEN_URL").unwrap_or_else(|_| GOOGLE_TOKEN_URL.to_string());
        let jwks_url = env::var("GOOGLE_JWKS_URL").unwrap_or_else(|_| GOOGLE_JWKS_URL.to_string());

        let frontend = env::var("FRONTEND_URL")
            .map_err(|_| anyhow::anyhow!("FRONTEND_URL environment variable is required"))?;
        let backend = env::var("BACKEND_URL")
            .map_err(|_| anyhow::anyhow!("BACKEND_URL environment variable is required"))?;

        Ok(Self {
            api: ApiConfig { host, port },
            store: StoreConfig {
                url: store_url,
                service_key,
            },
            google: GoogleConfig {
                client_id,
                client_secret,
                token_url,
                jwks_url,
            },
            urls: UrlConfig { frontend, backend },
        })
    }

    /// Returns the server bind address
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.api.host, self.api.port)
    }

    /// Returns the OAuth redirect URI registered with the identity provider
    pub fn oauth_redirect_uri(&self) -> String {
        format!(
            "{}/auth/google/callback",
            self.urls.backend.trim_end_matches('/')
        )
    }

    /// Returns the frontend base URL without a trailing slash
    pub fn frontend_base(&self) -> &str {
        self.urls.frontend.trim_end_matches('/')
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> Config {
        Config {
            api: ApiConfig {
                host: "127.0.0.1".to_string(),
                port: 8000,
            },
            store: StoreConfig {
                url: "https://project.example.co".to_string(),
                service_key: "service-key".to_string(),
            },
            google: GoogleConfig {
                client_id: "client-id".to_string(),
                client_secret: "client-secret".to_string(),
                token_url: GOOGLE_TOKEN_URL.to_string(),
                jwks_url: GOOGLE_JWKS_URL.to_string(),
            },
            urls: UrlConfig {
                frontend: "https://app.example.com/".to_string(),
                backend: "http://localhost:8000/".to_string(),
            },
        }
    }

    #[test]
    fn test_bind_address() {
        assert_eq!(test_config().bind_address(), "127.0.0.1:8000");
    }

    #[test]
    fn test_oauth_redirect_uri_has_no_double_slash() {
        assert_eq!(
            test_config().oauth_redirect_uri(),
            "http://localhost:8000/auth/google/callback"
        );
    }

    #[test]
    fn test_frontend_base_trims_trailing_slash() {
        assert_eq!(test_config().frontend_base(), "https://app.example.com");
    }
}
