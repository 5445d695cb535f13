use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::auth::dtos::{
    LoginRequestDto, LoginResponseDto, LogoutRequestDto, RefreshTokenRequestDto,
    RefreshTokenResponseDto,
};
use crate::features::auth::model::AuthenticatedUser;
use crate::features::auth::services::AuthService;
use crate::shared::types::ApiResponse;
use axum::{extract::State, Json};
use std::sync::Arc;
use validator::Validate;

/// Obtain an access + refresh token pair with email and password
#[utoipa::path(
    post,
    path = "/api/auth/token",
    request_body = LoginRequestDto,
    responses(
        (status = 200, description = "Login successful", body = ApiResponse<LoginResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Invalid credentials")
    ),
    tag = "auth"
)]
pub async fn login(
    State(service): State<Arc<AuthService>>,
    AppJson(dto): AppJson<LoginRequestDto>,
) -> Result<Json<ApiResponse<LoginResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let tokens = service.login(dto).await?;
    Ok(Json(ApiResponse::success(Some(tokens), None, None)))
}

/// Exchange a refresh token for a new access token
#[utoipa::path(
    post,
    path = "/api/auth/token/refresh",
    request_body = RefreshTokenRequestDto,
    responses(
        (status = 200, description = "Token refreshed successfully", body = ApiResponse<RefreshTokenResponseDto>),
        (status = 401, description = "Invalid or expired refresh token")
    ),
    tag = "auth"
)]
pub async fn refresh_token(
    State(service): State<Arc<AuthService>>,
    AppJson(dto): AppJson<RefreshTokenRequestDto>,
) -> Result<Json<ApiResponse<RefreshTokenResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let response = service.refresh(dto).await?;
    Ok(Json(ApiResponse::success(Some(response), None, None)))
}

/// Revoke a refresh token, ending the session
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    request_body = LogoutRequestDto,
    responses(
        (status = 200, description = "Successful logout"),
        (status = 400, description = "Token is invalid or expired"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "auth",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn logout(
    _user: AuthenticatedUser,
    State(service): State<Arc<AuthService>>,
    AppJson(dto): AppJson<LogoutRequestDto>,
) -> Result<Json<ApiResponse<()>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    service.logout(dto).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Successful logout".to_string()),
        None,
    )))
}
