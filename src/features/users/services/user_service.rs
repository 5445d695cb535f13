use sqlx::PgPool;

use crate::core::error::{AppError, Result};
use crate::features::users::dtos::{CreateUserDto, UpdateUserDto, UserResponseDto};
use crate::features::users::models::User;
use crate::shared::password::Password;
use crate::shared::types::PaginationQuery;
use uuid::Uuid;

const USER_COLUMNS: &str =
    "id, username, name, lastname, email, password, state, is_staff, is_superuser, \
     created_at, updated_at";

/// Convert database errors on the users table into client-facing errors
fn handle_db_error(e: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(db_err) = &e {
        // Unique constraint violation (PostgreSQL error code 23505)
        if db_err.code() == Some(std::borrow::Cow::Borrowed("23505")) {
            let field = match db_err.constraint() {
                Some(c) if c.contains("username") => "username",
                _ => "email",
            };
            return AppError::Validation(format!("A user with this {} already exists", field));
        }
    }

    AppError::Database(e)
}

/// Service for user account management. Password values are classified into
/// plain/hashed at this boundary and always persisted as hashes.
pub struct UserService {
    pool: PgPool,
}

impl UserService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List users in insertion order; pagination is applied only when requested
    pub async fn list(&self, page: &PaginationQuery) -> Result<(Vec<UserResponseDto>, i64)> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)?;

        let sql = format!(
            "SELECT {USER_COLUMNS} FROM users ORDER BY created_at ASC LIMIT $1 OFFSET $2"
        );
        let users: Vec<User> = sqlx::query_as(&sql)
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list users: {:?}", e);
                AppError::Database(e)
            })?;

        Ok((users.into_iter().map(Into::into).collect(), total))
    }

    /// Get a user by id
    pub async fn get(&self, id: Uuid) -> Result<UserResponseDto> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");
        let user: Option<User> = sqlx::query_as(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to fetch user {}: {:?}", id, e);
                AppError::Database(e)
            })?;

        user.map(Into::into)
            .ok_or_else(|| AppError::NotFound(format!("User with id {} not found", id)))
    }

    /// Look up a user by email, hash included. Used by the login path.
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE email = $1");
        sqlx::query_as(&sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to fetch user by email: {:?}", e);
                AppError::Database(e)
            })
    }

    /// Create a user. The password is hashed here unless the value is already
    /// a stored hash being round-tripped.
    pub async fn create(&self, dto: CreateUserDto) -> Result<UserResponseDto> {
        let stored_password = Password::from_input(dto.password).into_stored()?;

        let sql = format!(
            "INSERT INTO users (username, name, lastname, email, password) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {USER_COLUMNS}"
        );
        let user: User = sqlx::query_as(&sql)
            .bind(dto.username)
            .bind(dto.name)
            .bind(dto.lastname)
            .bind(dto.email)
            .bind(stored_password)
            .fetch_one(&self.pool)
            .await
            .map_err(handle_db_error)?;

        tracing::info!("User created: id={}", user.id);

        Ok(user.into())
    }

    /// Partial update; absent fields keep their current values
    pub async fn update(&self, id: Uuid, dto: UpdateUserDto) -> Result<UserResponseDto> {
        let stored_password = dto
            .password
            .map(|p| Password::from_input(p).into_stored())
            .transpose()?;

        let sql = format!(
            "UPDATE users \
             SET username = COALESCE($1, username), \
                 name = COALESCE($2, name), \
                 lastname = COALESCE($3, lastname), \
                 email = COALESCE($4, email), \
                 password = COALESCE($5, password), \
                 state = COALESCE($6, state), \
                 updated_at = NOW() \
             WHERE id = $7 \
             RETURNING {USER_COLUMNS}"
        );
        let user: Option<User> = sqlx::query_as(&sql)
            .bind(dto.username)
            .bind(dto.name)
            .bind(dto.lastname)
            .bind(dto.email)
            .bind(stored_password)
            .bind(dto.state)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(handle_db_error)?;

        user.map(Into::into)
            .ok_or_else(|| AppError::NotFound(format!("User with id {} not found", id)))
    }

    /// Delete a user by id
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("User with id {} not found", id)));
        }

        tracing::info!("User deleted: id={}", id);

        Ok(())
    }
}
