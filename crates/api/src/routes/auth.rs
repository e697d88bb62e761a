use axum::{
    Json,
    extract::State,
    http::{HeaderMap, StatusCode, header},
};
use serde::{Deserialize, Serialize};
use welfare_db::models::Role;

use crate::{error::ApiError, extractors::auth::AuthUser, state::AppState};

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub display_name: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_in: u64,
    pub user: UserResponse,
}

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: String,
    pub email: String,
    pub display_name: String,
    pub role: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

fn user_response(user: &welfare_db::models::User) -> UserResponse {
    UserResponse {
        id: user.id.map(|id| id.to_hex()).unwrap_or_default(),
        email: user.email.clone(),
        display_name: user.display_name.clone(),
        role: format!("{:?}", user.role).to_lowercase(),
    }
}

fn auth_cookie(token: &str, max_age: u64) -> String {
    format!("access_token={token}; HttpOnly; Path=/; SameSite=Lax; Max-Age={max_age}")
}

pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> Result<(StatusCode, HeaderMap, Json<AuthResponse>), ApiError> {
    let password_hash = state.auth.hash_password(&body.password)?;

    // New sign-ups start as plain members; an existing admin promotes them.
    let user = state
        .users
        .create(body.email.clone(), body.display_name.clone(), password_hash, Role::Member)
        .await?;

    let user_id = user
        .id
        .ok_or_else(|| ApiError::Internal("User missing id after insert".to_string()))?;
    let tokens = state.auth.generate_tokens(user_id, &user.email)?;

    let mut headers = HeaderMap::new();
    if let Ok(cookie) = auth_cookie(&tokens.access_token, tokens.expires_in).parse() {
        headers.insert(header::SET_COOKIE, cookie);
    }

    let response = AuthResponse {
        access_token: tokens.access_token,
        refresh_token: tokens.refresh_token,
        expires_in: tokens.expires_in,
        user: user_response(&user),
    };

    Ok((StatusCode::CREATED, headers, Json(response)))
}

pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<(HeaderMap, Json<AuthResponse>), ApiError> {
    let user = state
        .users
        .find_by_email(&body.email)
        .await
        .map_err(|_| ApiError::Unauthorized("Invalid credentials".to_string()))?;

    let password_hash = user
        .password_hash
        .as_ref()
        .ok_or_else(|| ApiError::Unauthorized("No password set".to_string()))?;

    let valid = state.auth.verify_password(&body.password, password_hash)?;
    if !valid {
        return Err(ApiError::Unauthorized("Invalid credentials".to_string()));
    }

    let user_id = user
        .id
        .ok_or_else(|| ApiError::Internal("User missing id".to_string()))?;
    let tokens = state.auth.generate_tokens(user_id, &user.email)?;

    let mut headers = HeaderMap::new();
    if let Ok(cookie) = auth_cookie(&tokens.access_token, tokens.expires_in).parse() {
        headers.insert(header::SET_COOKIE, cookie);
    }

    let response = AuthResponse {
        access_token: tokens.access_token,
        refresh_token: tokens.refresh_token,
        expires_in: tokens.expires_in,
        user: user_response(&user),
    };

    Ok((headers, Json(response)))
}

pub async fn me(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<UserResponse>, ApiError> {
    let user = state.users.base.find_by_id(auth.user_id).await?;
    Ok(Json(user_response(&user)))
}
