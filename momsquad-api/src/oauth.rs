/// Google OAuth: authorization-code exchange and identity-token verification
///
/// The login flow sends the user agent to Google; Google redirects back to
/// `/auth/google/callback` with an authorization code. This module exchanges
/// that code for tokens and verifies the returned identity token: RS256
/// signature against Google's published signing keys, audience equal to the
/// configured client id, issuer `accounts.google.com`.
///
/// Persisting the verified identity and issuing a real session are not part
/// of this flow; the callback handler fabricates a placeholder token and
/// redirects.

use jsonwebtoken::{decode, decode_header, Algorithm, DecodingKey, Validation};
use serde::Deserialize;
use thiserror::Error;

use crate::config::GoogleConfig;

/// OAuth flow errors
///
/// Every variant ends up as an `error` query parameter on the login redirect,
/// never as a JSON response.
#[derive(Error, Debug)]
pub enum OAuthError {
    /// The provider redirected back with an error instead of a code
    #[error("authorization denied: {0}")]
    Denied(String),

    /// The callback arrived without an authorization code
    #[error("missing authorization code")]
    MissingCode,

    /// Network failure talking to the provider
    #[error("network error: {0}")]
    Network(String),

    /// The token endpoint rejected the exchange
    #[error("token exchange failed: {0}")]
    TokenExchange(String),

    /// The identity token did not verify
    #[error("identity token verification failed: {0}")]
    Verification(String),
}

/// Claims extracted from a verified Google identity token
#[derive(Debug, Clone, Deserialize)]
pub struct GoogleClaims {
    /// Stable Google account id
    pub sub: String,

    /// Email address
    pub email: String,

    /// Display name, when the profile scope was granted
    pub name: Option<String>,

    /// Profile picture URL
    pub picture: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    id_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct JwkSet {
    keys: Vec<Jwk>,
}

#[derive(Debug, Deserialize)]
struct Jwk {
    kid: String,
    n: String,
    e: String,
}

/// Exchanges an authorization code for the identity token.
pub async fn exchange_code(
    http: &reqwest::Client,
    google: &GoogleConfig,
    redirect_uri: &str,
    code: &str,
) -> Result<String, OAuthError> {
    let params = [
        ("grant_type", "authorization_code"),
        ("code", code),
        ("client_id", google.client_id.as_str()),
        ("client_secret", google.client_secret.as_str()),
        ("redirect_uri", redirect_uri),
    ];

    let response = http
        .post(&google.token_url)
        .form(&params)
        .send()
        .await
        .map_err(|e| OAuthError::Network(e.to_string()))?;

    if !response.status().is_success() {
        let status = response.status();
        let text = response.text().await.unwrap_or_default();
        return Err(OAuthError::TokenExchange(format!(
            "status {}: {}",
            status, text
        )));
    }

    let tokens: TokenResponse = response
        .json()
        .await
        .map_err(|e| OAuthError::TokenExchange(format!("invalid response: {}", e)))?;

    tokens
        .id_token
        .ok_or_else(|| OAuthError::TokenExchange("response carried no id_token".to_string()))
}

/// Verifies an identity token and returns its claims.
///
/// Fetches the provider's current signing keys, picks the one named by the
/// token header, and checks signature, audience, and issuer.
pub async fn verify_id_token(
    http: &reqwest::Client,
    google: &GoogleConfig,
    id_token: &str,
) -> Result<GoogleClaims, OAuthError> {
    let header =
        decode_header(id_token).map_err(|e| OAuthError::Verification(e.to_string()))?;
    let kid = header
        .kid
        .ok_or_else(|| OAuthError::Verification("token header has no key id".to_string()))?;

    let jwks: JwkSet = http
        .get(&google.jwks_url)
        .send()
        .await
        .map_err(|e| OAuthError::Network(e.to_string()))?
        .json()
        .await
        .map_err(|e| OAuthError::Verification(format!("invalid key set: {}", e)))?;

    let jwk = jwks
        .keys
        .iter()
        .find(|k| k.kid == kid)
        .ok_or_else(|| OAuthError::Verification(format!("no signing key named {}", kid)))?;

    let key = DecodingKey::from_rsa_components(&jwk.n, &jwk.e)
        .map_err(|e| OAuthError::Verification(e.to_string()))?;

    let mut validation = Validation::new(Algorithm::RS256);
    validation.set_audience(&[google.client_id.as_str()]);
    validation.set_issuer(&["https://accounts.google.com", "accounts.google.com"]);

    let data = decode::<GoogleClaims>(id_token, &key, &validation)
        .map_err(|e| OAuthError::Verification(e.to_string()))?;

    Ok(data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_are_redirect_safe() {
        // These strings end up in a query parameter on the login redirect
        assert_eq!(OAuthError::MissingCode.to_string(), "missing authorization code");
        assert_eq!(
            OAuthError::Denied("access_denied".to_string()).to_string(),
            "authorization denied: access_denied"
        );
    }

    #[test]
    fn test_claims_deserialize_with_optional_profile_fields() {
        let claims: GoogleClaims = serde_json::from_value(serde_json::json!({
            "sub": "1234567890",
            "email": "mary@example.com",
            "aud": "client-id",
            "iss": "accounts.google.com",
        }))
        .unwrap();

        assert_eq!(claims.sub, "1234567890");
        assert!(claims.name.is_none());
        assert!(claims.picture.is_none());
    }
}
