use std::sync::Arc;

use crate::core::error::{AppError, Result};
use crate::features::auth::dtos::{
    LoginRequestDto, LoginResponseDto, LogoutRequestDto, RefreshTokenRequestDto,
    RefreshTokenResponseDto,
};
use crate::features::auth::services::token_service::TokenService;
use crate::features::users::services::UserService;
use crate::shared::password::verify_password;

/// The same error is returned whether the email is unknown or the password is
/// wrong, so responses never reveal which emails are registered.
const INVALID_CREDENTIALS: &str = "No active account found with the provided credentials";

/// Service for the credential side of authentication (login, refresh, logout)
pub struct AuthService {
    users: Arc<UserService>,
    tokens: Arc<TokenService>,
}

impl AuthService {
    pub fn new(users: Arc<UserService>, tokens: Arc<TokenService>) -> Self {
        Self { users, tokens }
    }

    /// Verify credentials and mint an access + refresh token pair.
    /// No side effects beyond token creation.
    pub async fn login(&self, dto: LoginRequestDto) -> Result<LoginResponseDto> {
        let user = self
            .users
            .find_by_email(&dto.email)
            .await?
            .ok_or_else(|| AppError::Unauthorized(INVALID_CREDENTIALS.to_string()))?;

        if !verify_password(&dto.password, &user.password)? {
            return Err(AppError::Unauthorized(INVALID_CREDENTIALS.to_string()));
        }

        let pair = self.tokens.issue_pair(user.id, &user.email)?;

        tracing::info!("User logged in: id={}", user.id);

        Ok(LoginResponseDto {
            id: user.id,
            refresh: pair.refresh,
            access: pair.access,
        })
    }

    /// Exchange a valid refresh token for a new access token.
    pub async fn refresh(&self, dto: RefreshTokenRequestDto) -> Result<RefreshTokenResponseDto> {
        let access = self.tokens.refresh_access_token(&dto.refresh).await?;
        Ok(RefreshTokenResponseDto { access })
    }

    /// Revoke the refresh token, ending the session.
    pub async fn logout(&self, dto: LogoutRequestDto) -> Result<()> {
        self.tokens.revoke_refresh_token(&dto.refresh).await
    }
}
