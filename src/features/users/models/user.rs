use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for a user account. The password column always holds an
/// Argon2id PHC hash; plaintext never reaches the store.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: Uuid,
    pub username: Option<String>,
    pub name: String,
    pub lastname: Option<String>,
    pub email: String,
    pub password: String,
    pub state: bool,
    pub is_staff: bool,
    pub is_superuser: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
