//! Review database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for reviews table
#[derive(Debug, Clone, FromRow)]
pub struct ReviewModel {
    pub id: Uuid,
    pub booking_id: Uuid,
    pub rating: i32,
    pub comment: String,
    pub created_at: DateTime<Utc>,
}
