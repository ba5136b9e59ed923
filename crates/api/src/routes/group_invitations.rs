//! Group invitation routes.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use domain::models::{
    CreateGroupInvitationRequest, Group, GroupInvitation, JoinGroupByInvitationRequest,
};
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::ActingUserId;
use crate::middleware::metrics::{
    record_invitation_created, record_invitation_failure, record_invitation_redeemed,
};

/// Invite an email address to a group.
///
/// POST /api/v1/groups/:group_id/invitations
///
/// Only the group owner may invite. The response carries the verification
/// code so the caller can hand it to the notifier.
pub async fn create_invitation(
    State(state): State<AppState>,
    acting_user: ActingUserId,
    Path(group_id): Path<Uuid>,
    Json(request): Json<CreateGroupInvitationRequest>,
) -> Result<(StatusCode, Json<GroupInvitation>), ApiError> {
    request.validate()?;
    let user = acting_user.load(&state.pool).await?;

    let invitation = state
        .invitations
        .create_invitation(&user, group_id, &request.email)
        .await
        .map_err(|e| {
            record_invitation_failure(&e);
            ApiError::from(e)
        })?
        .ok_or_else(|| ApiError::NotFound("Group not found".to_string()))?;

    record_invitation_created();
    info!(
        group_id = %group_id,
        invitation_id = %invitation.id,
        "Invitation issued via API"
    );

    Ok((StatusCode::CREATED, Json(invitation)))
}

/// Join a group with the code from an invitation.
///
/// POST /api/v1/groups/:group_id/join
///
/// The invitation is looked up by the acting user's email. The response is
/// the group with its owner and updated member count.
pub async fn join_group(
    State(state): State<AppState>,
    acting_user: ActingUserId,
    Path(group_id): Path<Uuid>,
    Json(request): Json<JoinGroupByInvitationRequest>,
) -> Result<Json<Group>, ApiError> {
    request.validate()?;
    let user = acting_user.load(&state.pool).await?;

    let group = state
        .invitations
        .join_by_invitation(&user, group_id, &request.code)
        .await
        .map_err(|e| {
            record_invitation_failure(&e);
            ApiError::from(e)
        })?
        .ok_or_else(|| ApiError::NotFound("No pending invitation for this group".to_string()))?;

    record_invitation_redeemed();

    Ok(Json(group))
}
