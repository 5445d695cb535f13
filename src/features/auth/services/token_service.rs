use chrono::{DateTime, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::core::config::AuthConfig;
use crate::core::error::{AppError, Result};
use crate::features::auth::model::AuthenticatedUser;

/// Discriminates the two token roles carried in the `token_type` claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Access,
    Refresh,
}

impl TokenKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenKind::Access => "access",
            TokenKind::Refresh => "refresh",
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user id)
    pub sub: Uuid,
    /// Email of the token owner
    pub email: String,
    /// Unique token id, the blacklist key for refresh tokens
    pub jti: Uuid,
    /// "access" or "refresh"
    pub token_type: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

#[derive(Debug)]
pub struct TokenPair {
    pub access: String,
    pub refresh: String,
}

/// Mints, validates and revokes HS256 access/refresh tokens.
///
/// Tokens themselves are stateless; a refresh token stays usable until it
/// expires or its `jti` lands in the blacklist. Blacklist inserts are single
/// auto-committed statements, so a revocation is durable before `revoke`
/// returns and a concurrent refresh is guaranteed to observe it.
pub struct TokenService {
    config: AuthConfig,
    pool: PgPool,
}

impl TokenService {
    pub fn new(config: AuthConfig, pool: PgPool) -> Self {
        Self { config, pool }
    }

    /// Mint an access + refresh token pair for a user. No side effects.
    pub fn issue_pair(&self, user_id: Uuid, email: &str) -> Result<TokenPair> {
        Ok(TokenPair {
            access: self.mint(user_id, email, TokenKind::Access)?,
            refresh: self.mint(user_id, email, TokenKind::Refresh)?,
        })
    }

    fn mint(&self, user_id: Uuid, email: &str, kind: TokenKind) -> Result<String> {
        let ttl = match kind {
            TokenKind::Access => self.config.access_token_ttl,
            TokenKind::Refresh => self.config.refresh_token_ttl,
        };

        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: user_id,
            email: email.to_string(),
            jti: Uuid::new_v4(),
            token_type: kind.as_str().to_string(),
            iat: now,
            exp: now + ttl.as_secs() as i64,
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.config.jwt_secret.as_bytes()),
        )
        .map_err(|e| AppError::Internal(format!("Failed to generate {} token: {}", kind.as_str(), e)))
    }

    /// Decode and verify signature, expiry and token kind.
    fn decode_token(&self, token: &str, expected: TokenKind) -> Result<Claims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = self.config.jwt_leeway.as_secs();

        let data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.config.jwt_secret.as_bytes()),
            &validation,
        )
        .map_err(|e| AppError::Auth(e.to_string()))?;

        if data.claims.token_type != expected.as_str() {
            return Err(AppError::Auth(format!(
                "Token is not an {} token",
                expected.as_str()
            )));
        }

        Ok(data.claims)
    }

    /// Validate an access token and extract the caller identity.
    /// Access tokens are short-lived and never blacklist-checked.
    pub fn validate_access_token(&self, token: &str) -> Result<AuthenticatedUser> {
        let claims = self.decode_token(token, TokenKind::Access)?;
        Ok(AuthenticatedUser {
            id: claims.sub,
            email: claims.email,
        })
    }

    /// Mint a new access token from a valid, un-blacklisted refresh token.
    pub async fn refresh_access_token(&self, refresh_token: &str) -> Result<String> {
        let claims = self
            .decode_token(refresh_token, TokenKind::Refresh)
            .map_err(|_| AppError::Unauthorized("Token is invalid or expired".to_string()))?;

        if self.is_blacklisted(claims.jti).await? {
            return Err(AppError::Unauthorized(
                "Token is invalid or expired".to_string(),
            ));
        }

        self.mint(claims.sub, &claims.email, TokenKind::Access)
    }

    /// Permanently invalidate a refresh token by adding its jti to the
    /// blacklist. Malformed, expired and already-blacklisted tokens all fail
    /// with the same fixed error.
    pub async fn revoke_refresh_token(&self, refresh_token: &str) -> Result<()> {
        let claims = self
            .decode_token(refresh_token, TokenKind::Refresh)
            .map_err(|_| AppError::InvalidToken)?;

        if self.is_blacklisted(claims.jti).await? {
            return Err(AppError::InvalidToken);
        }

        let expires_at = DateTime::<Utc>::from_timestamp(claims.exp, 0).unwrap_or_else(Utc::now);

        // ON CONFLICT absorbs the race where two revocations both passed the
        // membership check; the row is identical either way.
        sqlx::query(
            r#"
            INSERT INTO token_blacklist (jti, user_id, expires_at)
            VALUES ($1, $2, $3)
            ON CONFLICT (jti) DO NOTHING
            "#,
        )
        .bind(claims.jti)
        .bind(claims.sub)
        .bind(expires_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to blacklist token: {:?}", e);
            AppError::Database(e)
        })?;

        tracing::info!("Refresh token revoked: jti={}, user={}", claims.jti, claims.sub);

        Ok(())
    }

    async fn is_blacklisted(&self, jti: Uuid) -> Result<bool> {
        let count = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM token_blacklist
            WHERE jti = $1
            "#,
        )
        .bind(jti)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to check token blacklist: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(count > 0)
    }

    /// Delete blacklist rows whose token has expired anyway (maintenance).
    pub async fn purge_expired(&self) -> Result<u64> {
        let result = sqlx::query(
            r#"
            DELETE FROM token_blacklist
            WHERE expires_at < NOW()
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(AppError::Database)?;

        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn service_with_secret(secret: &str) -> TokenService {
        let config = AuthConfig {
            jwt_secret: secret.to_string(),
            access_token_ttl: Duration::from_secs(3600),
            refresh_token_ttl: Duration::from_secs(86400),
            jwt_leeway: Duration::from_secs(0),
        };
        // connect_lazy performs no I/O; these tests never touch the pool
        let pool = PgPool::connect_lazy("postgres://localhost/unused").unwrap();
        TokenService::new(config, pool)
    }

    fn service() -> TokenService {
        service_with_secret("test-secret")
    }

    #[tokio::test]
    async fn issue_pair_produces_two_distinct_jwts() {
        let pair = service().issue_pair(Uuid::new_v4(), "a@b.c").unwrap();
        assert_eq!(pair.access.matches('.').count(), 2);
        assert_eq!(pair.refresh.matches('.').count(), 2);
        assert_ne!(pair.access, pair.refresh);
    }

    #[tokio::test]
    async fn access_token_round_trips_identity() {
        let svc = service();
        let user_id = Uuid::new_v4();
        let pair = svc.issue_pair(user_id, "alice@example.com").unwrap();

        let user = svc.validate_access_token(&pair.access).unwrap();
        assert_eq!(user.id, user_id);
        assert_eq!(user.email, "alice@example.com");
    }

    #[tokio::test]
    async fn refresh_token_carries_refresh_kind_and_longer_expiry() {
        let svc = service();
        let pair = svc.issue_pair(Uuid::new_v4(), "a@b.c").unwrap();

        let access = svc.decode_token(&pair.access, TokenKind::Access).unwrap();
        let refresh = svc.decode_token(&pair.refresh, TokenKind::Refresh).unwrap();

        assert_eq!(access.token_type, "access");
        assert_eq!(refresh.token_type, "refresh");
        assert_eq!(access.sub, refresh.sub);
        assert_ne!(access.jti, refresh.jti);
        assert!(refresh.exp > access.exp);
    }

    #[tokio::test]
    async fn refresh_token_is_rejected_as_access_token() {
        let svc = service();
        let pair = svc.issue_pair(Uuid::new_v4(), "a@b.c").unwrap();
        assert!(svc.validate_access_token(&pair.refresh).is_err());
    }

    #[tokio::test]
    async fn tampered_token_is_rejected() {
        let svc = service();
        let pair = svc.issue_pair(Uuid::new_v4(), "a@b.c").unwrap();

        let mut parts: Vec<&str> = pair.access.split('.').collect();
        parts[2] = "AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA";
        let forged = parts.join(".");

        assert!(svc.validate_access_token(&forged).is_err());
    }

    #[tokio::test]
    async fn token_signed_with_other_secret_is_rejected() {
        let svc = service();
        let other = service_with_secret("other-secret");

        let pair = other.issue_pair(Uuid::new_v4(), "a@b.c").unwrap();
        assert!(svc.validate_access_token(&pair.access).is_err());
    }

    #[tokio::test]
    async fn expired_token_is_rejected() {
        let svc = service();
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: Uuid::new_v4(),
            email: "a@b.c".to_string(),
            jti: Uuid::new_v4(),
            token_type: "access".to_string(),
            iat: now - 7200,
            exp: now - 3600,
        };
        let expired = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"test-secret"),
        )
        .unwrap();

        assert!(svc.validate_access_token(&expired).is_err());
    }
}
