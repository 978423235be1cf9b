/// Squad membership endpoints
///
/// - `GET /squad-memberships?squad_id=` - list memberships
/// - `POST /create-squad-membership` - join a squad
///
/// Unlike the user and squad lists, the membership list always answers 200
/// with an empty list when there is nothing to return.

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    routes::Envelope,
};
use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use momsquad_shared::models::membership::{Membership, NewMembership};
use serde::Deserialize;
use uuid::Uuid;

/// Membership list filters
#[derive(Debug, Deserialize)]
pub struct MembershipQuery {
    /// Restrict to one squad; absent means all memberships
    pub squad_id: Option<Uuid>,
}

/// `GET /squad-memberships`
pub async fn list_memberships(
    State(state): State<AppState>,
    Query(query): Query<MembershipQuery>,
) -> ApiResult<(StatusCode, Json<Envelope<Vec<Membership>>>)> {
    let memberships = Membership::list(&state.store, query.squad_id).await?;

    Ok((
        StatusCode::OK,
        Json(Envelope::new(
            "Memberships retrieved successfully",
            memberships,
        )),
    ))
}

/// Create-membership request body
#[derive(Debug, Deserialize)]
pub struct CreateMembershipRequest {
    pub user_id: Uuid,
    pub squad_id: Uuid,
}

/// `POST /create-squad-membership`
///
/// Checks for an existing (user, squad) pair before inserting with the
/// primary flag unset. A concurrent duplicate that slips past the check is
/// not rescued here; only create-user inspects store error text.
///
/// # Errors
///
/// - `409`: the pair already has a membership
/// - `500`: store failure
pub async fn create_membership(
    State(state): State<AppState>,
    Json(req): Json<CreateMembershipRequest>,
) -> ApiResult<(StatusCode, Json<Envelope<Membership>>)> {
    if Membership::find_pair(&state.store, req.user_id, req.squad_id)
        .await?
        .is_some()
    {
        return Err(ApiError::Conflict(
            "User is already a member of this squad".to_string(),
        ));
    }

    let membership = Membership::create(
        &state.store,
        NewMembership::new(req.user_id, req.squad_id, false),
    )
    .await
    .map_err(|e| ApiError::Internal(format!("Failed to create membership: {}", e)))?;

    Ok((
        StatusCode::CREATED,
        Json(Envelope::new("Membership created successfully", membership)),
    ))
}
