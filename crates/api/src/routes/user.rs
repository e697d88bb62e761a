use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use tracing::info;
use welfare_db::models::{Role, User};

use crate::{error::ApiError, extractors::auth::AdminUser, state::AppState};

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: String,
    pub email: String,
    pub display_name: String,
    pub role: Role,
}

fn user_response(user: &User) -> UserResponse {
    UserResponse {
        id: user.id.map(|id| id.to_hex()).unwrap_or_default(),
        email: user.email.clone(),
        display_name: user.display_name.clone(),
        role: user.role,
    }
}

pub async fn list(
    State(state): State<AppState>,
    _admin: AdminUser,
) -> Result<Json<Vec<UserResponse>>, ApiError> {
    let users = state.users.list().await?;
    Ok(Json(users.iter().map(user_response).collect()))
}

#[derive(Debug, Deserialize)]
pub struct SetRoleRequest {
    pub role: Role,
}

/// Role changes take effect on the target's next request; tokens carry no
/// role claim, so nothing needs to be reissued or revoked.
pub async fn set_role(
    State(state): State<AppState>,
    admin: AdminUser,
    Path(id): Path<String>,
    Json(body): Json<SetRoleRequest>,
) -> Result<StatusCode, ApiError> {
    let user_id = ObjectId::parse_str(&id)
        .map_err(|_| ApiError::BadRequest("Invalid user id".to_string()))?;

    // An admin demoting themselves would lock the last admin out.
    if user_id == admin.user.user_id && body.role != Role::Admin {
        return Err(ApiError::Conflict(
            "Admins cannot change their own role".to_string(),
        ));
    }

    if !state.users.set_role(user_id, body.role).await? {
        return Err(ApiError::NotFound("User not found".to_string()));
    }

    info!(user_id = %user_id.to_hex(), role = ?body.role, "User role updated");
    Ok(StatusCode::NO_CONTENT)
}
