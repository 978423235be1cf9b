/// User endpoints
///
/// - `POST /create-user` - register a new user
/// - `GET /users/:user_id` - password-free profile
/// - `GET /users` - all rows as stored
/// - `GET /users/search?q=` - first-name search
///
/// Field exposure is deliberately inconsistent between the list and the
/// single-user endpoints: `GET /users` returns rows as stored, password
/// included, while `GET /users/:user_id` uses the password-free projection.
/// This mirrors the documented behavior and stays until stakeholders sign
/// off on a fix.

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    routes::Envelope,
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use momsquad_shared::models::user::{NewUser, User, UserProfile, UserSummary};
use regex::Regex;
use serde::Deserialize;
use std::sync::LazyLock;
use uuid::Uuid;
use validator::{Validate, ValidationError};

/// Digits, spaces, dashes, parentheses, and plus; length is checked
/// separately by the field validator.
static PHONE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9 ()+\-]+$").unwrap());

fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    if PHONE_RE.is_match(phone) {
        return Ok(());
    }
    let mut err = ValidationError::new("phone_format");
    err.message = Some("Invalid phone number format".into());
    Err(err)
}

/// Create-user request body
#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserRequest {
    /// Login name
    #[validate(length(min = 3, max = 50, message = "Username must be 3-50 characters"))]
    pub username: String,

    /// Password, stored as submitted
    #[validate(length(min = 8, max = 100, message = "Password must be 8-100 characters"))]
    pub password: String,

    /// First name
    #[serde(rename = "nameFirst")]
    #[validate(length(min = 1, max = 100, message = "First name must be 1-100 characters"))]
    pub name_first: String,

    /// Last name
    #[serde(rename = "nameLast")]
    #[validate(length(min = 1, max = 100, message = "Last name must be 1-100 characters"))]
    pub name_last: String,

    /// Email address
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    /// Phone number
    #[serde(rename = "phoneNumber")]
    #[validate(
        length(min = 10, max = 20, message = "Phone number must be 10-20 characters"),
        custom(function = validate_phone)
    )]
    pub phone_number: String,
}

/// `POST /create-user`
///
/// Validation runs before any store query; phone format failures are 400s
/// with zero round trips. Then email uniqueness, then username uniqueness,
/// then the insert. The store can still report a duplicate if a concurrent
/// request slipped between check and insert; that case is rescued into a 409
/// by matching the store's error text.
///
/// # Errors
///
/// - `400`: validation failed
/// - `409`: email or username already registered
/// - `500`: store failure (raw error text in the message)
pub async fn create_user(
    State(state): State<AppState>,
    Json(req): Json<CreateUserRequest>,
) -> ApiResult<(StatusCode, Json<Envelope<User>>)> {
    req.validate()?;

    if User::find_by_email(&state.store, &req.email).await?.is_some() {
        return Err(ApiError::Conflict(
            "A user with this email already exists".to_string(),
        ));
    }

    if User::find_by_username(&state.store, &req.username)
        .await?
        .is_some()
    {
        return Err(ApiError::Conflict(
            "This username is already taken".to_string(),
        ));
    }

    let user = match User::create(
        &state.store,
        NewUser {
            username: req.username,
            password: req.password,
            name_first: req.name_first,
            name_last: req.name_last,
            email: req.email,
            phone_number: req.phone_number,
        },
    )
    .await
    {
        Ok(user) => user,
        Err(e) if e.is_duplicate() => {
            return Err(ApiError::Conflict(
                "A user with this email or username already exists".to_string(),
            ));
        }
        Err(e) => {
            return Err(ApiError::Internal(format!("Failed to create user: {}", e)));
        }
    };

    Ok((
        StatusCode::CREATED,
        Json(Envelope::new("User created successfully", user)),
    ))
}

/// `GET /users/:user_id`
///
/// Returns the password-free projection, or 404 with `data: null`.
pub async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> ApiResult<(StatusCode, Json<Envelope<Option<UserProfile>>>)> {
    match User::find_profile(&state.store, user_id).await? {
        Some(profile) => Ok((
            StatusCode::OK,
            Json(Envelope::new("User retrieved successfully", Some(profile))),
        )),
        None => Ok((
            StatusCode::NOT_FOUND,
            Json(Envelope::new("User not found", None)),
        )),
    }
}

/// `GET /users`
///
/// Rows as stored. 404 with an empty list only when the store reports an
/// absent result, not a merely empty table.
pub async fn list_users(
    State(state): State<AppState>,
) -> ApiResult<(StatusCode, Json<Envelope<Vec<User>>>)> {
    match User::list(&state.store).await? {
        Some(users) => Ok((
            StatusCode::OK,
            Json(Envelope::new("Users retrieved successfully", users)),
        )),
        None => Ok((
            StatusCode::NOT_FOUND,
            Json(Envelope::new("No users found", Vec::new())),
        )),
    }
}

/// Search query parameters
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    /// First-name search term
    #[serde(default)]
    pub q: String,
}

/// Case-insensitive first-name match.
///
/// Substring already covers the prefix case; both checks are kept to match
/// the established search behavior exactly.
fn matches_first_name(name_first: &str, needle_lower: &str) -> bool {
    let first = name_first.to_lowercase();
    first.contains(needle_lower) || first.starts_with(needle_lower)
}

/// `GET /users/search?q=`
///
/// An empty query is a policy result, not an error: 200 with an empty list
/// and a message distinct from "no users found", without fetching the user
/// list at all.
pub async fn search_users(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> ApiResult<(StatusCode, Json<Envelope<Vec<UserSummary>>>)> {
    if query.q.is_empty() {
        return Ok((
            StatusCode::OK,
            Json(Envelope::new("No search query provided", Vec::new())),
        ));
    }

    let users = User::list_summaries(&state.store).await?.unwrap_or_default();
    let needle = query.q.to_lowercase();
    let matches: Vec<UserSummary> = users
        .into_iter()
        .filter(|u| matches_first_name(&u.name_first, &needle))
        .collect();

    Ok((
        StatusCode::OK,
        Json(Envelope::new("Search results retrieved", matches)),
    ))
}
