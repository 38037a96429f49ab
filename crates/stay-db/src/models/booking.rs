//! Booking database model

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for bookings table
#[derive(Debug, Clone, FromRow)]
pub struct BookingModel {
    pub id: Uuid,
    pub listing_id: Uuid,
    pub guest_id: Uuid,
    pub check_in_date: NaiveDate,
    pub check_out_date: NaiveDate,
    pub number_of_guests: i32,
    pub total_price: Decimal,
    pub status: String,
    pub special_requests: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Projection of just the stay dates of a booking
#[derive(Debug, Clone, Copy, FromRow)]
pub struct StayWindowRow {
    pub check_in_date: NaiveDate,
    pub check_out_date: NaiveDate,
}
