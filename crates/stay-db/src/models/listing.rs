//! Listing database model

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for listings table
#[derive(Debug, Clone, FromRow)]
pub struct ListingModel {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub location: String,
    pub property_type: String,
    pub price_per_night: Decimal,
    pub max_guests: i32,
    pub bedrooms: i32,
    pub bathrooms: i32,
    pub amenities: String,
    pub available: bool,
    pub host_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
