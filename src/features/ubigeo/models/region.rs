use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

/// Region model, the root of the geographic hierarchy
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Region {
    pub id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
