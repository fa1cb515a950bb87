use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use axum::{Extension, Json, extract::State, http::StatusCode};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use cinelog_core::{
    api_types::{ApiResponse, AuthToken},
    database::ports::{ProfilesRepository, UsersRepository},
    users::{AuthError, LoginRequest, RegisterRequest, User},
};
use cinelog_model::UserId;

use super::jwt::{ACCESS_TOKEN_TTL_SECS, REFRESH_TOKEN_TTL_DAYS, generate_refresh_token};
use crate::infra::{
    app_state::AppState,
    errors::{AppError, AppResult},
};

#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Shape of `GET /auth/me`.
#[derive(Debug, Serialize)]
pub struct CurrentUser {
    pub id: UserId,
    pub email: String,
    pub username: Option<String>,
}

pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> AppResult<Json<ApiResponse<AuthToken>>> {
    let validated = request.validate()?;

    // Check if the email is already registered
    if let Ok(Some(_)) = state
        .db
        .users()
        .get_user_by_email(validated.email.as_str())
        .await
    {
        return Err(AppError::conflict(AuthError::EmailTaken.to_string()));
    }

    // Hash password
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let password_hash = argon2
        .hash_password(validated.password.as_str().as_bytes(), &salt)
        .map_err(|_| AppError::internal("Failed to hash password"))?
        .to_string();

    let now = Utc::now();
    let user = User {
        id: UserId::new(),
        email: validated.email.into_string(),
        created_at: now,
        updated_at: now,
    };

    // User, credentials, and the paired profile row in one transaction.
    state
        .db
        .users()
        .create_account(&user, &password_hash, validated.username.as_str())
        .await?;

    // Registration doubles as sign-in.
    issue_tokens(&state, user.id).await
}

pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> AppResult<Json<ApiResponse<AuthToken>>> {
    let email = request.email.trim().to_lowercase();

    let user = state
        .db
        .users()
        .get_user_by_email(&email)
        .await
        .map_err(|_| AppError::internal(AuthError::InternalError.to_string()))?
        .ok_or_else(|| AppError::unauthorized(AuthError::InvalidCredentials.to_string()))?;

    let password_hash = state
        .db
        .users()
        .get_password_hash(user.id)
        .await
        .map_err(|_| AppError::internal("Failed to get password hash"))?
        .ok_or_else(|| AppError::unauthorized(AuthError::InvalidCredentials.to_string()))?;

    // Verify password
    let parsed_hash = PasswordHash::new(&password_hash)
        .map_err(|_| AppError::internal("Invalid password hash"))?;

    let argon2 = Argon2::default();
    argon2
        .verify_password(request.password.as_bytes(), &parsed_hash)
        .map_err(|_| AppError::unauthorized(AuthError::InvalidCredentials.to_string()))?;

    issue_tokens(&state, user.id).await
}

pub async fn refresh(
    State(state): State<AppState>,
    Json(request): Json<RefreshRequest>,
) -> AppResult<Json<ApiResponse<AuthToken>>> {
    let token_data = state
        .db
        .users()
        .get_refresh_token(&request.refresh_token)
        .await
        .map_err(|_| AppError::internal(AuthError::InternalError.to_string()))?;

    let (user_id, expires_at) = token_data
        .ok_or_else(|| AppError::unauthorized(AuthError::TokenInvalid.to_string()))?;

    if expires_at < Utc::now() {
        // Stale row; drop it while rejecting.
        let _ = state
            .db
            .users()
            .delete_refresh_token(&request.refresh_token)
            .await;
        return Err(AppError::unauthorized(AuthError::TokenExpired.to_string()));
    }

    // Rotate: invalidate the presented token before issuing a new one.
    state
        .db
        .users()
        .delete_refresh_token(&request.refresh_token)
        .await
        .map_err(|_| AppError::internal("Failed to invalidate old token"))?;

    issue_tokens(&state, user_id).await
}

pub async fn logout(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
) -> Result<StatusCode, AppError> {
    state
        .db
        .users()
        .delete_user_refresh_tokens(user.id)
        .await
        .map_err(|_| AppError::internal("Failed to sign out"))?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn get_current_user(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
) -> AppResult<Json<ApiResponse<CurrentUser>>> {
    let username = state
        .db
        .profiles()
        .get_by_user(user.id)
        .await?
        .map(|profile| profile.username);

    Ok(Json(ApiResponse::success(CurrentUser {
        id: user.id,
        email: user.email,
        username,
    })))
}

async fn issue_tokens(
    state: &AppState,
    user_id: UserId,
) -> AppResult<Json<ApiResponse<AuthToken>>> {
    let access_token = state
        .jwt
        .generate_access_token(user_id.to_uuid())
        .map_err(|_| AppError::internal("Failed to generate access token"))?;

    let refresh_token = generate_refresh_token();
    let expires_at = Utc::now() + chrono::Duration::days(REFRESH_TOKEN_TTL_DAYS);

    state
        .db
        .users()
        .store_refresh_token(&refresh_token, user_id, expires_at)
        .await
        .map_err(|_| AppError::internal("Failed to store refresh token"))?;

    Ok(Json(ApiResponse::success(AuthToken {
        access_token,
        refresh_token,
        expires_in: ACCESS_TOKEN_TTL_SECS,
    })))
}
