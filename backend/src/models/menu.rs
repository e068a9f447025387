use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Menu label attached to a beneficiary. Not part of the delivery manifest.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Menu {
    pub id: i64,
    pub name: String,
    pub created_at: DateTime<Utc>,
}
