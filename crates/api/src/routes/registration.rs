use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use bson::{DateTime, oid::ObjectId};
use serde::{Deserialize, Serialize};
use tracing::info;
use validator::Validate;
use welfare_db::models::{Dependant, Registration, RegistrationStatus, Spouse};
use welfare_services::{grouping, member_number};

use crate::{error::ApiError, extractors::auth::AdminUser, state::AppState};

/// Public intake form. Validation failures come back as per-field messages,
/// never as a bare 500.
#[derive(Debug, Deserialize, Validate)]
pub struct IntakeRequest {
    #[validate(length(min = 1, message = "Full name is required"))]
    pub full_name: String,
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    pub collector: Option<String>,
    pub address: Option<String>,
    pub post_code: Option<String>,
    pub town: Option<String>,
    pub date_of_birth: Option<String>,
    pub place_of_birth: Option<String>,
    pub gender: Option<String>,
    pub marital_status: Option<String>,
    pub mobile_no: Option<String>,
    pub next_of_kin_name: Option<String>,
    pub next_of_kin_address: Option<String>,
    pub next_of_kin_phone: Option<String>,
    #[serde(default)]
    pub dependants: Vec<Dependant>,
    #[serde(default)]
    pub spouses: Vec<Spouse>,
}

#[derive(Debug, Serialize)]
pub struct RegistrationResponse {
    pub id: String,
    pub full_name: String,
    pub email: String,
    pub status: String,
    pub collector: Option<String>,
    pub member_number: Option<String>,
    pub created_at: String,
}

fn registration_response(reg: &Registration) -> RegistrationResponse {
    RegistrationResponse {
        id: reg.id.map(|id| id.to_hex()).unwrap_or_default(),
        full_name: reg.full_name.clone(),
        email: reg.email.clone(),
        status: format!("{:?}", reg.status).to_lowercase(),
        collector: reg.collector.clone(),
        member_number: reg.member_number.clone(),
        created_at: reg.created_at.try_to_rfc3339_string().unwrap_or_default(),
    }
}

pub async fn intake(
    State(state): State<AppState>,
    Json(body): Json<IntakeRequest>,
) -> Result<(StatusCode, Json<RegistrationResponse>), ApiError> {
    body.validate()?;

    let registration = Registration {
        id: None,
        full_name: body.full_name,
        email: body.email,
        status: RegistrationStatus::Pending,
        collector: body.collector,
        address: body.address,
        post_code: body.post_code,
        town: body.town,
        date_of_birth: body.date_of_birth,
        place_of_birth: body.place_of_birth,
        gender: body.gender,
        marital_status: body.marital_status,
        mobile_no: body.mobile_no,
        next_of_kin_name: body.next_of_kin_name,
        next_of_kin_address: body.next_of_kin_address,
        next_of_kin_phone: body.next_of_kin_phone,
        dependants: body.dependants,
        spouses: body.spouses,
        member_number: None,
        revoked_at: None,
        revocation_reason: None,
        created_at: DateTime::now(),
    };

    let created = state.registrations.create(registration).await?;
    info!(id = %created.id.map(|i| i.to_hex()).unwrap_or_default(), "Registration received");

    Ok((StatusCode::CREATED, Json(registration_response(&created))))
}

pub async fn list(
    State(state): State<AppState>,
    _admin: AdminUser,
) -> Result<Json<Vec<RegistrationResponse>>, ApiError> {
    let registrations = state.registrations.list().await?;
    Ok(Json(registrations.iter().map(registration_response).collect()))
}

#[derive(Debug, Serialize)]
pub struct ApprovalResponse {
    pub member_id: String,
    pub member_number: String,
}

/// Promote a pending registration to a verified member.
///
/// Member number inputs: initials are the first two characters of the
/// approving admin's email, uppercased (historical convention); order is the
/// collector's current derived rank (0 when the collector has no group yet);
/// sequence is the collector's current verified-member count plus one. The
/// member insert and the status update are two independent writes.
pub async fn approve(
    State(state): State<AppState>,
    admin: AdminUser,
    Path(id): Path<String>,
) -> Result<Json<ApprovalResponse>, ApiError> {
    let reg_id = ObjectId::parse_str(&id)
        .map_err(|_| ApiError::BadRequest("Invalid registration id".to_string()))?;

    let registration = state.registrations.base.find_by_id(reg_id).await?;
    if registration.status != RegistrationStatus::Pending {
        return Err(ApiError::Conflict(format!(
            "Registration is already {:?}",
            registration.status
        )));
    }

    let collector = registration.collector.clone().unwrap_or_default();

    let initials = member_number::initials_from_name(&admin.user.email);
    let order = {
        let members = state.members.find_verified().await?;
        grouping::group_by_collector(members)
            .iter()
            .find(|g| g.name == collector)
            .map(|g| g.rank)
            .unwrap_or(0)
    };
    let sequence = state.members.count_by_collector(&collector).await? as u32 + 1;

    if member_number::exceeds_capacity(sequence) {
        info!(sequence, collector = %collector, "Sequence past 3-digit capacity; number widens");
    }
    let number = member_number::generate(&initials, order, sequence);

    let member = state
        .members
        .create_from_registration(&registration, number.clone())
        .await?;
    state.registrations.mark_approved(reg_id).await?;

    info!(member_number = %number, "Registration approved");

    Ok(Json(ApprovalResponse {
        member_id: member.id.map(|i| i.to_hex()).unwrap_or_default(),
        member_number: number,
    }))
}
