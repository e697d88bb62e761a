use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use welfare_services::grouping;

use crate::{error::ApiError, extractors::auth::AdminUser, state::AppState};

#[derive(Debug, Serialize)]
pub struct RosterEntry {
    pub name: String,
    /// 2-digit zero-padded derived rank, e.g. "01".
    pub rank: String,
    pub member_count: usize,
    pub members: Vec<RosterMember>,
    pub email: Option<String>,
    pub contact_number: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RosterMember {
    pub id: String,
    pub full_name: String,
    /// Recomputed display number, which may differ from the persisted one.
    pub display_number: String,
    pub member_number: Option<String>,
}

/// The collector roster: members grouped by collector name, ranked by
/// descending member count, with per-member display numbers computed on the
/// fly. Collector contact details are joined in by exact name match.
pub async fn roster(
    State(state): State<AppState>,
    _admin: AdminUser,
) -> Result<Json<Vec<RosterEntry>>, ApiError> {
    let (members, collectors) = tokio::try_join!(
        async { state.members.find_verified().await.map_err(ApiError::from) },
        async { state.collectors.list().await.map_err(ApiError::from) },
    )?;

    let groups = grouping::group_by_collector(members);

    let roster = groups
        .iter()
        .map(|group| {
            let record = collectors.iter().find(|c| c.name == group.name);
            RosterEntry {
                name: group.name.clone(),
                rank: group.rank_label(),
                member_count: group.members.len(),
                members: group
                    .members
                    .iter()
                    .enumerate()
                    .map(|(position, member)| RosterMember {
                        id: member.id.map(|id| id.to_hex()).unwrap_or_default(),
                        full_name: member.full_name.clone(),
                        display_number: group.display_number(position),
                        member_number: member.member_number.clone(),
                    })
                    .collect(),
                email: record.and_then(|c| c.email.clone()),
                contact_number: record.and_then(|c| c.contact_number.clone()),
            }
        })
        .collect();

    Ok(Json(roster))
}

#[derive(Debug, Deserialize)]
pub struct CreateCollectorRequest {
    pub name: String,
    pub email: Option<String>,
    pub contact_number: Option<String>,
    pub address: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CollectorResponse {
    pub id: String,
    pub name: String,
    pub email: Option<String>,
}

pub async fn create(
    State(state): State<AppState>,
    _admin: AdminUser,
    Json(body): Json<CreateCollectorRequest>,
) -> Result<(StatusCode, Json<CollectorResponse>), ApiError> {
    let name = grouping::sanitize_collector_name(&body.name);
    if name.is_empty() {
        return Err(ApiError::Validation("Collector name is required".to_string()));
    }

    let collector = state
        .collectors
        .create(name, body.email, body.contact_number, body.address)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(CollectorResponse {
            id: collector.id.map(|id| id.to_hex()).unwrap_or_default(),
            name: collector.name,
            email: collector.email,
        }),
    ))
}

#[derive(Debug, Deserialize)]
pub struct RenameCollectorRequest {
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct RenameResponse {
    pub old_name: String,
    pub new_name: String,
    pub members_retagged: u64,
}

/// Rename a collector and propagate the new name to every member tagged with
/// the old one. The collector update and the member re-tag are independent
/// writes with no transaction: a failure in between leaves members pointing
/// at a name that no longer exists, which the roster then shows as a
/// separate group.
pub async fn rename(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<String>,
    Json(body): Json<RenameCollectorRequest>,
) -> Result<Json<RenameResponse>, ApiError> {
    let collector_id = ObjectId::parse_str(&id)
        .map_err(|_| ApiError::BadRequest("Invalid collector id".to_string()))?;

    let new_name = grouping::sanitize_collector_name(&body.name);
    if new_name.is_empty() {
        return Err(ApiError::Validation("Collector name is required".to_string()));
    }

    let old_name = state.collectors.rename(collector_id, &new_name).await?;

    let members_retagged = match state.members.retag_collector(&old_name, &new_name).await {
        Ok(count) => count,
        Err(e) => {
            warn!(
                old_name = %old_name,
                new_name = %new_name,
                error = %e,
                "Collector renamed but member re-tag failed; roster split until retried"
            );
            return Err(e.into());
        }
    };

    info!(old_name = %old_name, new_name = %new_name, members_retagged, "Collector renamed");

    Ok(Json(RenameResponse {
        old_name,
        new_name,
        members_retagged,
    }))
}

pub async fn delete(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let collector_id = ObjectId::parse_str(&id)
        .map_err(|_| ApiError::BadRequest("Invalid collector id".to_string()))?;
    state.collectors.delete(collector_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
