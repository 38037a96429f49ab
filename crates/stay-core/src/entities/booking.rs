//! Booking entity - a guest's reservation of a listing
//!
//! Status transitions form a small state machine: `Pending` may become
//! `Confirmed` or `Cancelled`; `Confirmed` may still be cancelled;
//! `Cancelled` and `Completed` are terminal. Reaching `Completed` is
//! driven by an external process and never by this code.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::error::DomainError;
use crate::value_objects::StayWindow;

/// Booking lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Cancelled,
    Completed,
}

impl BookingStatus {
    /// Stable lowercase label used in storage and API payloads
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Cancelled => "cancelled",
            Self::Completed => "completed",
        }
    }

    /// Active bookings (pending or confirmed) block overlapping dates
    #[inline]
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Pending | Self::Confirmed)
    }

    /// Terminal states accept no further transitions
    #[inline]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Cancelled | Self::Completed)
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BookingStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "confirmed" => Ok(Self::Confirmed),
            "cancelled" => Ok(Self::Cancelled),
            "completed" => Ok(Self::Completed),
            other => Err(format!("unknown booking status: {other}")),
        }
    }
}

/// Booking entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Booking {
    pub id: Uuid,
    pub listing_id: Uuid,
    pub guest_id: Uuid,
    pub check_in_date: chrono::NaiveDate,
    pub check_out_date: chrono::NaiveDate,
    pub number_of_guests: i32,
    /// Derived: nights x listing nightly price
    pub total_price: Decimal,
    pub status: BookingStatus,
    pub special_requests: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Booking {
    /// Create a new pending Booking
    #[allow(clippy::too_many_arguments)]
    pub fn new_pending(
        id: Uuid,
        listing_id: Uuid,
        guest_id: Uuid,
        window: StayWindow,
        number_of_guests: i32,
        total_price: Decimal,
        special_requests: String,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            listing_id,
            guest_id,
            check_in_date: window.check_in,
            check_out_date: window.check_out,
            number_of_guests,
            total_price,
            status: BookingStatus::Pending,
            special_requests,
            created_at: now,
            updated_at: now,
        }
    }

    /// The booking's half-open stay window
    #[inline]
    pub fn window(&self) -> StayWindow {
        StayWindow::new(self.check_in_date, self.check_out_date)
    }

    /// Whole-day length of the stay
    #[inline]
    pub fn nights(&self) -> i64 {
        self.window().nights()
    }

    /// Check if a user is the guest who made this booking
    #[inline]
    pub fn is_booked_by(&self, user_id: Uuid) -> bool {
        self.guest_id == user_id
    }

    /// Confirm a pending booking. Rejected for any other current state.
    pub fn confirm(&mut self) -> Result<(), DomainError> {
        match self.status {
            BookingStatus::Pending => {
                self.status = BookingStatus::Confirmed;
                self.updated_at = Utc::now();
                Ok(())
            }
            current => Err(DomainError::BookingNotPending(current)),
        }
    }

    /// Cancel an active booking. Already-cancelled and completed bookings
    /// are rejected with distinct errors so the caller can report which.
    pub fn cancel(&mut self) -> Result<(), DomainError> {
        match self.status {
            BookingStatus::Pending | BookingStatus::Confirmed => {
                self.status = BookingStatus::Cancelled;
                self.updated_at = Utc::now();
                Ok(())
            }
            BookingStatus::Cancelled => Err(DomainError::BookingAlreadyCancelled),
            BookingStatus::Completed => Err(DomainError::CannotCancelCompleted),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn booking() -> Booking {
        Booking::new_pending(
            Uuid::new_v4(),
            Uuid::new_v4(),
            Uuid::new_v4(),
            StayWindow::new(
                "2024-06-01".parse().unwrap(),
                "2024-06-05".parse().unwrap(),
            ),
            2,
            dec!(400.00),
            String::new(),
        )
    }

    #[test]
    fn test_new_booking_is_pending() {
        let b = booking();
        assert_eq!(b.status, BookingStatus::Pending);
        assert!(b.status.is_active());
        assert_eq!(b.nights(), 4);
    }

    #[test]
    fn test_confirm_pending() {
        let mut b = booking();
        b.confirm().unwrap();
        assert_eq!(b.status, BookingStatus::Confirmed);
        assert!(b.status.is_active());
    }

    #[test]
    fn test_confirm_rejects_non_pending() {
        let mut b = booking();
        b.confirm().unwrap();
        let err = b.confirm().unwrap_err();
        assert!(matches!(
            err,
            DomainError::BookingNotPending(BookingStatus::Confirmed)
        ));

        let mut cancelled = booking();
        cancelled.cancel().unwrap();
        assert!(cancelled.confirm().is_err());
    }

    #[test]
    fn test_cancel_pending_and_confirmed() {
        let mut pending = booking();
        pending.cancel().unwrap();
        assert_eq!(pending.status, BookingStatus::Cancelled);

        let mut confirmed = booking();
        confirmed.confirm().unwrap();
        confirmed.cancel().unwrap();
        assert_eq!(confirmed.status, BookingStatus::Cancelled);
    }

    #[test]
    fn test_cancel_is_not_repeatable() {
        let mut b = booking();
        b.cancel().unwrap();
        let err = b.cancel().unwrap_err();
        assert!(matches!(err, DomainError::BookingAlreadyCancelled));
    }

    #[test]
    fn test_cancel_completed_rejected() {
        let mut b = booking();
        b.status = BookingStatus::Completed;
        let err = b.cancel().unwrap_err();
        assert!(matches!(err, DomainError::CannotCancelCompleted));
        assert_eq!(b.status, BookingStatus::Completed);
    }

    #[test]
    fn test_status_round_trip() {
        for status in [
            BookingStatus::Pending,
            BookingStatus::Confirmed,
            BookingStatus::Cancelled,
            BookingStatus::Completed,
        ] {
            assert_eq!(status.as_str().parse::<BookingStatus>().unwrap(), status);
        }
        assert!("paused".parse::<BookingStatus>().is_err());
    }
}
