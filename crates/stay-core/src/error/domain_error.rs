//! Domain errors - error types for the domain layer

use thiserror::Error;
use uuid::Uuid;

use crate::entities::BookingStatus;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("Listing not found: {0}")]
    ListingNotFound(Uuid),

    #[error("Booking not found: {0}")]
    BookingNotFound(Uuid),

    #[error("Review not found: {0}")]
    ReviewNotFound(Uuid),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Check-out date must be after check-in date")]
    InvalidStayWindow,

    #[error("Only completed bookings can be reviewed")]
    BookingNotCompleted,

    // =========================================================================
    // Authorization Errors
    // =========================================================================
    #[error("Not the listing host")]
    NotListingHost,

    #[error("Not the booking guest")]
    NotBookingGuest,

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("These dates are not available. Please choose different dates.")]
    DatesUnavailable,

    #[error("Only pending bookings can be confirmed (current status: {0})")]
    BookingNotPending(BookingStatus),

    #[error("Only active bookings can be modified (current status: {0})")]
    BookingNotEditable(BookingStatus),

    #[error("Booking is already cancelled")]
    BookingAlreadyCancelled,

    #[error("Cannot cancel a completed booking")]
    CannotCancelCompleted,

    #[error("Booking already has a review")]
    ReviewAlreadyExists,

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            // Not Found
            Self::ListingNotFound(_) => "UNKNOWN_LISTING",
            Self::BookingNotFound(_) => "UNKNOWN_BOOKING",
            Self::ReviewNotFound(_) => "UNKNOWN_REVIEW",

            // Validation
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::InvalidStayWindow => "INVALID_STAY_WINDOW",
            Self::BookingNotCompleted => "BOOKING_NOT_COMPLETED",

            // Authorization
            Self::NotListingHost => "NOT_LISTING_HOST",
            Self::NotBookingGuest => "NOT_BOOKING_GUEST",

            // Conflict
            Self::DatesUnavailable => "DATES_UNAVAILABLE",
            Self::BookingNotPending(_) => "BOOKING_NOT_PENDING",
            Self::BookingNotEditable(_) => "BOOKING_NOT_EDITABLE",
            Self::BookingAlreadyCancelled => "BOOKING_ALREADY_CANCELLED",
            Self::CannotCancelCompleted => "CANNOT_CANCEL_COMPLETED",
            Self::ReviewAlreadyExists => "REVIEW_ALREADY_EXISTS",

            // Infrastructure
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::ListingNotFound(_) | Self::BookingNotFound(_) | Self::ReviewNotFound(_)
        )
    }

    /// Check if this is a validation error ("fix your input")
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::ValidationError(_) | Self::InvalidStayWindow | Self::BookingNotCompleted
        )
    }

    /// Check if this is an authorization error ("you may not do this")
    pub fn is_authorization(&self) -> bool {
        matches!(self, Self::NotListingHost | Self::NotBookingGuest)
    }

    /// Check if this is a conflict error (date clash or invalid state
    /// transition)
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            Self::DatesUnavailable
                | Self::BookingNotPending(_)
                | Self::BookingNotEditable(_)
                | Self::BookingAlreadyCancelled
                | Self::CannotCancelCompleted
                | Self::ReviewAlreadyExists
        )
    }
}
