use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::auth::{tokens, users};
use crate::errors::AppError;
use crate::models::user::User;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    pub email: String,
    pub full_name: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub message: String,
}

impl AuthResponse {
    fn for_user(user: &User, token: String, message: &str) -> Self {
        Self {
            token: Some(token),
            username: Some(user.username.clone()),
            full_name: Some(user.full_name.clone()),
            email: Some(user.email.clone()),
            message: message.to_string(),
        }
    }

    fn message_only(message: &str) -> Self {
        Self {
            token: None,
            username: None,
            full_name: None,
            email: None,
            message: message.to_string(),
        }
    }
}

/// POST /api/auth/login
pub async fn handle_login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    require_non_blank(&request.username, "Username is required")?;
    require_non_blank(&request.password, "Password is required")?;

    // Same response for unknown user and wrong password: no username oracle.
    let user = users::find_by_username(&state.db, &request.username)
        .await?
        .filter(|u| users::verify_password(&request.password, &u.password_hash))
        .ok_or_else(|| AppError::Unauthorized("Invalid username or password".to_string()))?;

    let token = tokens::issue(&state.db, user.id).await?;
    Ok(Json(AuthResponse::for_user(
        &user,
        token,
        "Login successful",
    )))
}

/// POST /api/auth/register
pub async fn handle_register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), AppError> {
    require_non_blank(&request.username, "Username is required")?;
    require_non_blank(&request.password, "Password is required")?;
    require_non_blank(&request.email, "Email is required")?;
    require_non_blank(&request.full_name, "Full name is required")?;

    let user = users::register(
        &state.db,
        request.username.trim(),
        &request.password,
        request.email.trim(),
        request.full_name.trim(),
    )
    .await?;

    let token = tokens::issue(&state.db, user.id).await?;
    Ok((
        StatusCode::CREATED,
        Json(AuthResponse::for_user(
            &user,
            token,
            "User registered successfully",
        )),
    ))
}

/// POST /api/auth/logout
///
/// Best effort: succeeds whether or not a (valid) token was supplied.
pub async fn handle_logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<AuthResponse>, AppError> {
    if let Some(token) = bearer_token(&headers) {
        tokens::delete(&state.db, token).await?;
    }
    Ok(Json(AuthResponse::message_only("Logout successful")))
}

/// GET /api/auth/validate
pub async fn handle_validate(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<AuthResponse>, AppError> {
    let token = bearer_token(&headers)
        .ok_or_else(|| AppError::Unauthorized("Token not provided".to_string()))?;

    let user = tokens::lookup_user(&state.db, token)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Invalid or expired token".to_string()))?;

    Ok(Json(AuthResponse::for_user(
        &user,
        token.to_string(),
        "Token is valid",
    )))
}

/// Extracts the bearer token from an `Authorization: Bearer <token>` header.
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

fn require_non_blank(value: &str, message: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(message.to_string()));
    }
    Ok(())
}
