//! Response DTOs for API endpoints

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

/// Listing response
#[derive(Debug, Clone, Serialize)]
pub struct ListingResponse {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub location: String,
    pub property_type: String,
    pub price_per_night: Decimal,
    pub max_guests: i32,
    pub bedrooms: i32,
    pub bathrooms: i32,
    pub amenities: Vec<String>,
    pub available: bool,
    pub host_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Aggregated review figures for a listing
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct ListingStats {
    pub review_count: usize,
    /// Mean rating over all reviews, absent when there are none
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_rating: Option<Decimal>,
}

/// Listing detail response: the listing plus review aggregates
#[derive(Debug, Clone, Serialize)]
pub struct ListingDetailResponse {
    #[serde(flatten)]
    pub listing: ListingResponse,
    #[serde(flatten)]
    pub stats: ListingStats,
}

/// Booking response
#[derive(Debug, Clone, Serialize)]
pub struct BookingResponse {
    pub id: Uuid,
    pub listing_id: Uuid,
    pub guest_id: Uuid,
    pub check_in_date: NaiveDate,
    pub check_out_date: NaiveDate,
    pub nights: i64,
    pub number_of_guests: i32,
    pub total_price: Decimal,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub special_requests: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Review response
#[derive(Debug, Clone, Serialize)]
pub struct ReviewResponse {
    pub id: Uuid,
    pub booking_id: Uuid,
    pub rating: i32,
    pub comment: String,
    pub created_at: DateTime<Utc>,
}
