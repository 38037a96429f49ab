//! Error handling utilities for repositories

use sqlx::Error as SqlxError;
use uuid::Uuid;

use stay_core::error::DomainError;

/// SQLSTATE for exclusion constraint violations
const EXCLUSION_VIOLATION: &str = "23P01";

/// Convert SQLx error to DomainError
pub fn map_db_error(e: SqlxError) -> DomainError {
    DomainError::DatabaseError(e.to_string())
}

/// Convert SQLx error to DomainError, mapping exclusion violations from
/// the bookings date-range guard to the date-conflict error
pub fn map_conflict_error(e: SqlxError) -> DomainError {
    if let Some(db_err) = e.as_database_error() {
        if db_err.code().as_deref() == Some(EXCLUSION_VIOLATION) {
            return DomainError::DatesUnavailable;
        }
    }
    DomainError::DatabaseError(e.to_string())
}

/// Check for unique violation and return appropriate error or fallback
pub fn map_unique_violation<F>(e: SqlxError, on_unique: F) -> DomainError
where
    F: FnOnce() -> DomainError,
{
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            return on_unique();
        }
    }
    DomainError::DatabaseError(e.to_string())
}

/// Create a "listing not found" error
pub fn listing_not_found(id: Uuid) -> DomainError {
    DomainError::ListingNotFound(id)
}

/// Create a "booking not found" error
pub fn booking_not_found(id: Uuid) -> DomainError {
    DomainError::BookingNotFound(id)
}
