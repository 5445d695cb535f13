use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::features::users::models::User;
use crate::shared::validation::USERNAME_REGEX;

/// Request DTO for creating a user
#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateUserDto {
    #[validate(
        length(min = 1, max = 255),
        regex(path = *USERNAME_REGEX, message = "Username must start with a letter or underscore and contain only alphanumeric characters and underscores")
    )]
    pub username: Option<String>,

    #[validate(length(min = 1, max = 255, message = "Name is required"))]
    pub name: String,

    #[validate(length(max = 255))]
    pub lastname: Option<String>,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
}

/// Request DTO for updating a user; absent fields are left unchanged
#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateUserDto {
    #[validate(
        length(min = 1, max = 255),
        regex(path = *USERNAME_REGEX, message = "Username must start with a letter or underscore and contain only alphanumeric characters and underscores")
    )]
    pub username: Option<String>,

    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,

    #[validate(length(max = 255))]
    pub lastname: Option<String>,

    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,

    /// Plaintext to be hashed, or an already-hashed value round-tripped from a
    /// previous read (stored verbatim, never re-hashed)
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: Option<String>,

    pub state: Option<bool>,
}

/// Response DTO for a user; the password hash is never serialized
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserResponseDto {
    pub id: Uuid,
    pub username: Option<String>,
    pub name: String,
    pub lastname: Option<String>,
    pub email: String,
    pub state: bool,
    pub is_staff: bool,
    pub is_superuser: bool,
}

impl From<User> for UserResponseDto {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            username: u.username,
            name: u.name,
            lastname: u.lastname,
            email: u.email,
            state: u.state,
            is_staff: u.is_staff,
            is_superuser: u.is_superuser,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn response_dto_never_carries_the_password() {
        let user = User {
            id: Uuid::new_v4(),
            username: Some("jdoe".to_string()),
            name: "John".to_string(),
            lastname: Some("Doe".to_string()),
            email: "jdoe@example.com".to_string(),
            password: "$argon2id$v=19$m=19456,t=2,p=1$c2FsdHNhbHQ$hash".to_string(),
            state: true,
            is_staff: true,
            is_superuser: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let json = serde_json::to_value(UserResponseDto::from(user)).unwrap();
        assert!(json.get("password").is_none());
        assert_eq!(json["email"], "jdoe@example.com");
    }
}
