use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Request DTO for obtaining a token pair
#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct LoginRequestDto {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Response DTO for a successful login
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LoginResponseDto {
    /// Id of the authenticated user
    pub id: Uuid,
    /// Long-lived refresh token
    pub refresh: String,
    /// Short-lived access token
    pub access: String,
}

/// Request DTO for token refresh
#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct RefreshTokenRequestDto {
    #[validate(length(min = 1, message = "Refresh token is required"))]
    pub refresh: String,
}

/// Response DTO for token refresh
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RefreshTokenResponseDto {
    /// New access token bound to the same user
    pub access: String,
}

/// Request DTO for logout (refresh token revocation)
#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct LogoutRequestDto {
    #[validate(length(min = 1, message = "Refresh token is required"))]
    pub refresh: String,
}
