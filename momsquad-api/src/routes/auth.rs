/// Authentication endpoints
///
/// - `POST /login` - username/password login
/// - `GET /auth/google/callback` - OAuth redirect target
///
/// Login compares the submitted password against the stored one directly;
/// there is no hashing anywhere in this service. A missing user and a wrong
/// password produce byte-identical 403 responses so the endpoint cannot be
/// used to enumerate usernames.
///
/// The OAuth callback verifies the Google identity and then stops: no row is
/// written and no real session is issued. It redirects the user agent to the
/// frontend with a placeholder token.

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    oauth::{self, OAuthError},
};
use axum::{
    extract::{Query, State},
    response::Redirect,
    Json,
};
use momsquad_shared::models::User;
use serde::{Deserialize, Serialize};
use urlencoding::encode;
use uuid::Uuid;
use validator::Validate;

/// Login request body
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Login response; carries no `data` key, only the id and username
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub message: String,
    pub id: Uuid,
    pub username: String,
}

/// `POST /login`
///
/// # Errors
///
/// - `400`: missing username or password
/// - `403`: unknown username or wrong password, same body either way
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    req.validate()?;

    let user = User::find_by_username(&state.store, &req.username).await?;

    let user = match user {
        Some(u) if u.password == req.password => u,
        _ => {
            return Err(ApiError::Forbidden(
                "Invalid username or password".to_string(),
            ));
        }
    };

    Ok(Json(LoginResponse {
        message: "Login successful".to_string(),
        id: user.id,
        username: user.username,
    }))
}

/// Query parameters Google sends to the callback
#[derive(Debug, Deserialize)]
pub struct GoogleCallbackQuery {
    pub code: Option<String>,
    pub error: Option<String>,
}

/// `GET /auth/google/callback`
///
/// Exchanges the code, verifies the identity token, and redirects to the
/// frontend dashboard with a placeholder session token and the email. Every
/// failure redirects to the frontend login page with the error text as a
/// query parameter; this endpoint never answers with JSON.
pub async fn google_callback(
    State(state): State<AppState>,
    Query(query): Query<GoogleCallbackQuery>,
) -> Redirect {
    match complete_google_login(&state, query).await {
        Ok(url) => Redirect::to(&url),
        Err(e) => {
            tracing::warn!("google oauth callback failed: {}", e);
            let url = format!(
                "{}/login?error={}",
                state.config.frontend_base(),
                encode(&e.to_string())
            );
            Redirect::to(&url)
        }
    }
}

async fn complete_google_login(
    state: &AppState,
    query: GoogleCallbackQuery,
) -> Result<String, OAuthError> {
    if let Some(error) = query.error {
        return Err(OAuthError::Denied(error));
    }
    let code = query.code.ok_or(OAuthError::MissingCode)?;

    let id_token = oauth::exchange_code(
        &state.http,
        &state.config.google,
        &state.config.oauth_redirect_uri(),
        &code,
    )
    .await?;

    let claims = oauth::verify_id_token(&state.http, &state.config.google, &id_token).await?;
    tracing::info!(
        sub = %claims.sub,
        email = %claims.email,
        name = claims.name.as_deref().unwrap_or(""),
        picture = claims.picture.as_deref().unwrap_or(""),
        "verified google identity"
    );

    // TODO: persist the verified identity and issue a real session token;
    // until then the frontend receives a placeholder.
    let session_token = format!("session-{}", claims.sub);

    Ok(format!(
        "{}/dashboard?token={}&email={}",
        state.config.frontend_base(),
        encode(&session_token),
        encode(&claims.email)
    ))
}
