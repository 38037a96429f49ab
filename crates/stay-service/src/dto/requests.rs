//! Request DTOs for API endpoints
//!
//! All request DTOs implement `Deserialize` and `Validate` for input
//! validation. Booking admission rules (capacity, overlap, self-booking)
//! are not duplicated here; they live in the domain policy and report
//! every violated rule at once.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

// ============================================================================
// Listing Requests
// ============================================================================

/// Create listing request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateListingRequest {
    #[validate(length(min = 1, max = 255, message = "Title must be 1-255 characters"))]
    pub title: String,

    #[validate(length(max = 2000, message = "Description must be at most 2000 characters"))]
    #[serde(default)]
    pub description: String,

    #[validate(length(min = 1, max = 255, message = "Location must be 1-255 characters"))]
    pub location: String,

    /// Property type label; defaults to "apartment"
    pub property_type: Option<String>,

    pub price_per_night: Decimal,

    #[validate(range(min = 1, message = "Listing must accommodate at least one guest"))]
    pub max_guests: i32,

    #[validate(range(min = 0))]
    pub bedrooms: Option<i32>,

    #[validate(range(min = 0))]
    pub bathrooms: Option<i32>,

    /// Comma-separated amenity names
    pub amenities: Option<String>,
}

/// Update listing request; absent fields stay unchanged
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateListingRequest {
    #[validate(length(min = 1, max = 255, message = "Title must be 1-255 characters"))]
    pub title: Option<String>,

    #[validate(length(max = 2000, message = "Description must be at most 2000 characters"))]
    pub description: Option<String>,

    #[validate(length(min = 1, max = 255, message = "Location must be 1-255 characters"))]
    pub location: Option<String>,

    pub property_type: Option<String>,

    pub price_per_night: Option<Decimal>,

    #[validate(range(min = 1, message = "Listing must accommodate at least one guest"))]
    pub max_guests: Option<i32>,

    #[validate(range(min = 0))]
    pub bedrooms: Option<i32>,

    #[validate(range(min = 0))]
    pub bathrooms: Option<i32>,

    pub amenities: Option<String>,

    pub available: Option<bool>,
}

// ============================================================================
// Booking Requests
// ============================================================================

/// Create booking request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateBookingRequest {
    pub listing_id: Uuid,

    pub check_in_date: NaiveDate,

    pub check_out_date: NaiveDate,

    pub number_of_guests: i32,

    #[validate(length(max = 1000, message = "Special requests must be at most 1000 characters"))]
    pub special_requests: Option<String>,
}

/// Update booking request; absent fields stay unchanged
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateBookingRequest {
    pub check_in_date: Option<NaiveDate>,

    pub check_out_date: Option<NaiveDate>,

    pub number_of_guests: Option<i32>,

    #[validate(length(max = 1000, message = "Special requests must be at most 1000 characters"))]
    pub special_requests: Option<String>,
}

// ============================================================================
// Review Requests
// ============================================================================

/// Create review request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateReviewRequest {
    pub booking_id: Uuid,

    #[validate(range(min = 1, max = 5, message = "Rating must be between 1 and 5"))]
    pub rating: i32,

    #[validate(length(max = 2000, message = "Comment must be at most 2000 characters"))]
    #[serde(default)]
    pub comment: String,
}
