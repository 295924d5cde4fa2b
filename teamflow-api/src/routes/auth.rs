/// Authentication endpoints
///
/// This module provides user authentication endpoints:
/// - Registration
/// - Login
/// - Token refresh
/// - Profile
///
/// # Endpoints
///
/// - `POST /api/auth/register` - Register new user
/// - `POST /api/auth/login` - Login and get tokens
/// - `POST /api/auth/refresh` - Refresh access token
/// - `GET /api/auth/profile` - Current user's profile (authenticated)

use crate::{
    app::AppState,
    error::{validation_details, ApiError, ApiResult},
};
use axum::{extract::State, http::StatusCode, Extension, Json};
use serde::{Deserialize, Serialize};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use teamflow_shared::{
    auth::{jwt, middleware::AuthContext, password},
    error::DomainError,
    models::user::{CreateUser, UserProfile, UserRole},
};
use validator::Validate;

/// Tailwind-style background classes assigned to new accounts
const AVATAR_COLORS: [&str; 8] = [
    "bg-blue-500",
    "bg-green-500",
    "bg-purple-500",
    "bg-pink-500",
    "bg-yellow-500",
    "bg-red-500",
    "bg-indigo-500",
    "bg-teal-500",
];

/// Picks a stable avatar color for an email address
fn avatar_color_for(email: &str) -> String {
    let mut hasher = DefaultHasher::new();
    email.hash(&mut hasher);
    let index = (hasher.finish() % AVATAR_COLORS.len() as u64) as usize;
    AVATAR_COLORS[index].to_string()
}

/// Register request
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Display name
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,

    /// Email address
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    /// Password
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,

    /// Optional global role (defaults to member)
    #[serde(default)]
    pub role: UserRole,
}

/// Register / login response
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    /// Always true on the success path
    pub success: bool,

    /// Authenticated user's profile
    pub user: UserProfile,

    /// Access token (24h)
    pub access_token: String,

    /// Refresh token (30d)
    pub refresh_token: String,
}

/// Login request
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    /// Email address
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    /// Password
    pub password: String,
}

/// Refresh token request
#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    /// Refresh token
    pub refresh_token: String,
}

/// Refresh token response
#[derive(Debug, Serialize)]
pub struct RefreshResponse {
    /// Always true on the success path
    pub success: bool,

    /// New access token (24h)
    pub access_token: String,
}

/// Profile response
#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    /// Always true on the success path
    pub success: bool,

    /// Current user's profile
    pub user: UserProfile,
}

/// Issues an access + refresh token pair for a user
fn issue_tokens(user_id: uuid::Uuid, secret: &str) -> ApiResult<(String, String)> {
    let access_claims = jwt::Claims::new(user_id, jwt::TokenType::Access);
    let refresh_claims = jwt::Claims::new(user_id, jwt::TokenType::Refresh);

    let access_token = jwt::create_token(&access_claims, secret)?;
    let refresh_token = jwt::create_token(&refresh_claims, secret)?;

    Ok((access_token, refresh_token))
}

/// Register a new user
///
/// # Endpoint
///
/// ```text
/// POST /api/auth/register
/// Content-Type: application/json
///
/// {
///   "name": "Jane Doe",
///   "email": "jane@example.com",
///   "password": "SecureP@ss123"
/// }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: Validation failed
/// - `409 Conflict`: Email already exists
/// - `500 Internal Server Error`: Server error
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<AuthResponse>)> {
    req.validate().map_err(validation_details)?;

    let password_hash = password::hash_password(&req.password)?;
    let avatar_color = avatar_color_for(&req.email);

    let user = state
        .store
        .create_user(CreateUser {
            name: req.name,
            email: req.email,
            password_hash,
            role: req.role,
            avatar_color,
        })
        .await
        .map_err(DomainError::from)?;

    tracing::info!(user_id = %user.id, "user registered");

    let (access_token, refresh_token) = issue_tokens(user.id, state.jwt_secret())?;

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            success: true,
            user: user.profile(),
            access_token,
            refresh_token,
        }),
    ))
}

/// Login endpoint
///
/// Authenticates a user and returns JWT tokens.
///
/// # Errors
///
/// - `400 Bad Request`: Validation failed
/// - `401 Unauthorized`: Invalid credentials
/// - `500 Internal Server Error`: Server error
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Json<AuthResponse>> {
    req.validate().map_err(validation_details)?;

    let user = state
        .store
        .find_user_by_email(&req.email)
        .await
        .map_err(DomainError::from)?
        .ok_or_else(|| ApiError::Unauthorized("Invalid email or password".to_string()))?;

    let valid = password::verify_password(&req.password, &user.password_hash)?;
    if !valid {
        return Err(ApiError::Unauthorized(
            "Invalid email or password".to_string(),
        ));
    }

    state
        .store
        .touch_last_login(user.id)
        .await
        .map_err(DomainError::from)?;

    let (access_token, refresh_token) = issue_tokens(user.id, state.jwt_secret())?;

    Ok(Json(AuthResponse {
        success: true,
        user: user.profile(),
        access_token,
        refresh_token,
    }))
}

/// Token refresh endpoint
///
/// Exchanges a refresh token for a new access token. The account must
/// still exist.
///
/// # Errors
///
/// - `401 Unauthorized`: Invalid or expired refresh token, or account gone
/// - `500 Internal Server Error`: Server error
pub async fn refresh(
    State(state): State<AppState>,
    Json(req): Json<RefreshRequest>,
) -> ApiResult<Json<RefreshResponse>> {
    let claims = jwt::validate_refresh_token(&req.refresh_token, state.jwt_secret())?;

    state
        .store
        .find_user(claims.sub)
        .await
        .map_err(DomainError::from)?
        .ok_or_else(|| ApiError::Unauthorized("User not found".to_string()))?;

    let access_claims = jwt::Claims::new(claims.sub, jwt::TokenType::Access);
    let access_token = jwt::create_token(&access_claims, state.jwt_secret())?;

    Ok(Json(RefreshResponse {
        success: true,
        access_token,
    }))
}

/// Current user's profile
///
/// # Endpoint
///
/// ```text
/// GET /api/auth/profile
/// Authorization: Bearer <access_token>
/// ```
pub async fn profile(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> ApiResult<Json<ProfileResponse>> {
    let user = state
        .store
        .find_user(auth.user_id)
        .await
        .map_err(DomainError::from)?
        .ok_or_else(|| ApiError::Unauthorized("User not found".to_string()))?;

    Ok(Json(ProfileResponse {
        success: true,
        user: user.profile(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_avatar_color_is_stable_and_from_palette() {
        let first = avatar_color_for("jane@example.com");
        let second = avatar_color_for("jane@example.com");
        assert_eq!(first, second);
        assert!(AVATAR_COLORS.contains(&first.as_str()));
    }
}
