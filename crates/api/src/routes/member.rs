use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use bson::{doc, oid::ObjectId};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use welfare_db::models::Member;
use welfare_services::dao::base::PaginationParams;

use crate::{error::ApiError, extractors::auth::AdminUser, state::AppState};

#[derive(Debug, Serialize)]
pub struct MemberResponse {
    pub id: String,
    pub member_number: Option<String>,
    pub old_member_number: Option<String>,
    pub full_name: String,
    pub email: String,
    pub verified: bool,
    pub collector: String,
    pub town: Option<String>,
    pub mobile_no: Option<String>,
}

fn member_response(member: &Member) -> MemberResponse {
    MemberResponse {
        id: member.id.map(|id| id.to_hex()).unwrap_or_default(),
        member_number: member.member_number.clone(),
        old_member_number: member.old_member_number.clone(),
        full_name: member.full_name.clone(),
        email: member.email.clone(),
        verified: member.verified,
        collector: member.collector.clone(),
        town: member.town.clone(),
        mobile_no: member.mobile_no.clone(),
    }
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub search: Option<String>,
}

// `PaginationParams` is its own extractor; flattening it into `SearchQuery`
// would route its numbers through serde_urlencoded's string buffering and
// reject `?page=2`.
pub async fn list(
    State(state): State<AppState>,
    _admin: AdminUser,
    Query(query): Query<SearchQuery>,
    Query(pagination): Query<PaginationParams>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let mut filter = doc! { "verified": true };
    if let Some(ref term) = query.search {
        if !term.is_empty() {
            // Case-insensitive substring match on name or member number.
            let pattern = regex_escape(term);
            filter = doc! {
                "verified": true,
                "$or": [
                    { "full_name": { "$regex": &pattern, "$options": "i" } },
                    { "member_number": { "$regex": &pattern, "$options": "i" } },
                ],
            };
        }
    }

    let page = state
        .members
        .base
        .find_paginated(filter, Some(doc! { "full_name": 1 }), &pagination)
        .await?;

    let items: Vec<MemberResponse> = page.items.iter().map(member_response).collect();
    Ok(Json(serde_json::json!({
        "items": items,
        "total": page.total,
        "page": page.page,
        "per_page": page.per_page,
        "total_pages": page.total_pages,
    })))
}

pub async fn get(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<String>,
) -> Result<Json<MemberResponse>, ApiError> {
    let member = state.members.base.find_by_id(parse_id(&id)?).await?;
    Ok(Json(member_response(&member)))
}

#[derive(Debug, Deserialize, Default)]
pub struct UpdateMemberRequest {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub collector: Option<String>,
    pub address: Option<String>,
    pub post_code: Option<String>,
    pub town: Option<String>,
    pub mobile_no: Option<String>,
    pub membership_info: Option<String>,
}

pub async fn update(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<String>,
    Json(body): Json<UpdateMemberRequest>,
) -> Result<StatusCode, ApiError> {
    let mut fields = bson::Document::new();
    if let Some(v) = body.full_name {
        fields.insert("full_name", v);
    }
    if let Some(v) = body.email {
        fields.insert("email", v);
    }
    if let Some(v) = body.collector {
        fields.insert("collector", v);
    }
    if let Some(v) = body.address {
        fields.insert("address", v);
    }
    if let Some(v) = body.post_code {
        fields.insert("post_code", v);
    }
    if let Some(v) = body.town {
        fields.insert("town", v);
    }
    if let Some(v) = body.mobile_no {
        fields.insert("mobile_no", v);
    }
    if let Some(v) = body.membership_info {
        fields.insert("membership_info", v);
    }

    state.members.update_fields(parse_id(&id)?, fields).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.members.delete(parse_id(&id)?).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Deserialize, Default)]
pub struct RevokeRequest {
    pub reason: Option<String>,
}

/// Archive the member into the registrations collection, then delete it.
/// Two independent writes: if the delete fails after the archive insert the
/// member exists in both collections until an admin intervenes.
pub async fn revoke(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<String>,
    body: Option<Json<RevokeRequest>>,
) -> Result<StatusCode, ApiError> {
    let member_id = parse_id(&id)?;
    let member = state.members.base.find_by_id(member_id).await?;

    let reason = body.and_then(|Json(b)| b.reason);
    let archive_id = state.registrations.archive_revoked(&member, reason).await?;

    if let Err(e) = state.members.delete(member_id).await {
        warn!(
            member_id = %member_id.to_hex(),
            archive_id = %archive_id.to_hex(),
            error = %e,
            "Member archived but not deleted; duplicate state left behind"
        );
        return Err(e.into());
    }

    info!(member_id = %member_id.to_hex(), "Member revoked");
    Ok(StatusCode::NO_CONTENT)
}

pub async fn reinstate(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let member_id = parse_id(&id)?;
    if !state.members.reinstate(member_id).await? {
        return Err(ApiError::NotFound("Member not found".to_string()));
    }
    info!(member_id = %member_id.to_hex(), "Member reinstated");
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Deserialize)]
pub struct AddPaymentRequest {
    pub amount: f64,
    pub date: Option<String>,
}

pub async fn add_payment(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<String>,
    Json(body): Json<AddPaymentRequest>,
) -> Result<StatusCode, ApiError> {
    let member_id = parse_id(&id)?;
    let member = state.members.base.find_by_id(member_id).await?;

    let date = body
        .date
        .unwrap_or_else(|| chrono::Utc::now().to_rfc3339());
    state
        .payments
        .create(member_id, member.member_number.clone(), body.amount, date)
        .await?;

    Ok(StatusCode::CREATED)
}

#[derive(Debug, Deserialize)]
pub struct AddNoteRequest {
    pub content: String,
}

pub async fn add_note(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<String>,
    Json(body): Json<AddNoteRequest>,
) -> Result<StatusCode, ApiError> {
    let member_id = parse_id(&id)?;
    // Verify the member exists before attaching a note to its id.
    state.members.base.find_by_id(member_id).await?;
    state.notes.create(member_id, body.content).await?;
    Ok(StatusCode::CREATED)
}

fn parse_id(raw: &str) -> Result<ObjectId, ApiError> {
    ObjectId::parse_str(raw).map_err(|_| ApiError::BadRequest("Invalid member id".to_string()))
}

fn regex_escape(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if "\\.+*?()|[]{}^$".contains(c) {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
