/// Squad endpoints
///
/// - `POST /create-squad` - create a squad and its creator membership
/// - `GET /squads` - list squads
/// - `GET /squads/:squad_id/members` - memberships with user details

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    routes::Envelope,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use momsquad_shared::models::{
    membership::{Membership, NewMembership},
    squad::{NewSquad, Squad},
    user::{User, UserSummary},
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Create-squad request body
///
/// `user_id` names the creator; no existence check is performed on it.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateSquadRequest {
    #[validate(length(min = 1, max = 100, message = "Squad name must be 1-100 characters"))]
    pub name: String,

    #[serde(rename = "nameMom")]
    #[validate(length(min = 1, max = 100, message = "Mom name must be 1-100 characters"))]
    pub name_mom: String,

    pub user_id: Uuid,
}

/// `POST /create-squad`
///
/// Inserts the squad, then a membership for the creator with the primary
/// flag set. The two writes are independent: a membership failure is logged
/// and the squad response is returned unchanged. There is no rollback.
///
/// # Errors
///
/// - `400`: validation failed
/// - `500`: squad insert failed
pub async fn create_squad(
    State(state): State<AppState>,
    Json(req): Json<CreateSquadRequest>,
) -> ApiResult<(StatusCode, Json<Envelope<Squad>>)> {
    req.validate()?;

    let squad = Squad::create(&state.store, NewSquad::new(req.name, req.name_mom))
        .await
        .map_err(|e| ApiError::Internal(format!("Failed to create squad: {}", e)))?;

    if let Err(e) = Membership::create(
        &state.store,
        NewMembership::new(req.user_id, squad.id, true),
    )
    .await
    {
        tracing::warn!(
            squad_id = %squad.id,
            user_id = %req.user_id,
            "failed to create primary membership: {}",
            e
        );
    }

    Ok((
        StatusCode::CREATED,
        Json(Envelope::new("Squad created successfully", squad)),
    ))
}

/// `GET /squads`
///
/// 404 with an empty list only when the store reports an absent result.
pub async fn list_squads(
    State(state): State<AppState>,
) -> ApiResult<(StatusCode, Json<Envelope<Vec<Squad>>>)> {
    match Squad::list(&state.store).await? {
        Some(squads) => Ok((
            StatusCode::OK,
            Json(Envelope::new("Squads retrieved successfully", squads)),
        )),
        None => Ok((
            StatusCode::NOT_FOUND,
            Json(Envelope::new("No squads found", Vec::new())),
        )),
    }
}

/// A membership record with the owning user's summary attached
#[derive(Debug, Serialize)]
pub struct SquadMember {
    #[serde(flatten)]
    pub membership: Membership,

    /// Summary of the member, `null` if the user row is missing
    pub user: Option<UserSummary>,
}

/// `GET /squads/:squad_id/members`
///
/// Fetches the squad's memberships, then one user lookup per membership,
/// strictly in sequence. The output order is the membership fetch order.
/// Always 200; an unknown squad yields an empty list.
pub async fn list_squad_members(
    State(state): State<AppState>,
    Path(squad_id): Path<Uuid>,
) -> ApiResult<(StatusCode, Json<Envelope<Vec<SquadMember>>>)> {
    let memberships = Membership::list(&state.store, Some(squad_id)).await?;

    let mut members = Vec::with_capacity(memberships.len());
    for membership in memberships {
        let user = User::find_summary(&state.store, membership.user_id).await?;
        members.push(SquadMember { membership, user });
    }

    Ok((
        StatusCode::OK,
        Json(Envelope::new("Squad members retrieved successfully", members)),
    ))
}
