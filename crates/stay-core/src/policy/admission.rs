//! Booking admission - decides whether a candidate reservation is
//! admissible against a listing and its existing active bookings
//!
//! The policy is a pure function over a snapshot: the candidate, the
//! listing, and the stay windows of the listing's active bookings
//! (pending or confirmed). The caller is responsible for excluding the
//! candidate's own prior window when revalidating an update, and for
//! re-checking conflicts atomically at commit time.

use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

use crate::entities::Listing;
use crate::value_objects::StayWindow;

/// Immutable snapshot of a booking request under validation
#[derive(Debug, Clone, Copy)]
pub struct BookingCandidate {
    pub guest_id: Uuid,
    pub window: StayWindow,
    pub number_of_guests: i32,
}

/// A single reason a booking candidate was rejected
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum BookingViolation {
    #[error("Check-out date must be after check-in date.")]
    DatesOutOfOrder,

    #[error("Minimum stay is {min_nights} night(s).")]
    BelowMinimumStay { min_nights: i64 },

    #[error("Number of guests must be greater than zero.")]
    NoGuests,

    #[error("Number of guests ({requested}) exceeds listing capacity ({allowed}).")]
    CapacityExceeded { requested: i32, allowed: i32 },

    #[error("You cannot book your own listing.")]
    OwnListing,

    #[error("These dates are not available. Please choose different dates.")]
    DatesUnavailable,
}

/// Booking admission rules
#[derive(Debug, Clone, Copy)]
pub struct AdmissionPolicy {
    /// Minimum number of nights a stay must span
    pub min_stay_nights: i64,
}

impl Default for AdmissionPolicy {
    fn default() -> Self {
        Self { min_stay_nights: 1 }
    }
}

impl AdmissionPolicy {
    pub fn new(min_stay_nights: i64) -> Self {
        Self { min_stay_nights }
    }

    /// Evaluate every rule against the snapshot and return the ordered
    /// list of violations, or `Ok(())` when the candidate is admissible.
    ///
    /// `active_windows` are the stay windows of the listing's bookings in
    /// an active status, with the candidate's own prior booking already
    /// excluded when this is an update.
    pub fn validate(
        &self,
        candidate: &BookingCandidate,
        listing: &Listing,
        active_windows: &[StayWindow],
    ) -> Result<(), Vec<BookingViolation>> {
        let mut violations = Vec::new();

        // Rule 1 and 2: date ordering, then minimum stay. An unordered
        // window already fails rule 1; repeating it as a short stay would
        // just be noise.
        if !candidate.window.is_ordered() {
            violations.push(BookingViolation::DatesOutOfOrder);
        } else if candidate.window.nights() < self.min_stay_nights {
            violations.push(BookingViolation::BelowMinimumStay {
                min_nights: self.min_stay_nights,
            });
        }

        // Rule 3 and 4: guest count floor and listing capacity.
        if candidate.number_of_guests < 1 {
            violations.push(BookingViolation::NoGuests);
        } else if candidate.number_of_guests > listing.max_guests {
            violations.push(BookingViolation::CapacityExceeded {
                requested: candidate.number_of_guests,
                allowed: listing.max_guests,
            });
        }

        // Rule 5: a host cannot book their own listing.
        if listing.is_hosted_by(candidate.guest_id) {
            violations.push(BookingViolation::OwnListing);
        }

        // Rule 6: no active booking may overlap the candidate window.
        // A degenerate window never overlaps, so this check is safe even
        // when rule 1 already failed.
        if active_windows.iter().any(|w| candidate.window.overlaps(w)) {
            violations.push(BookingViolation::DatesUnavailable);
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn d(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn listing() -> Listing {
        Listing::new(
            Uuid::new_v4(),
            "Cabin in the woods".to_string(),
            "Vermont".to_string(),
            dec!(100.00),
            4,
            Uuid::new_v4(),
        )
    }

    fn candidate(check_in: &str, check_out: &str, guests: i32) -> BookingCandidate {
        BookingCandidate {
            guest_id: Uuid::new_v4(),
            window: StayWindow::new(d(check_in), d(check_out)),
            number_of_guests: guests,
        }
    }

    #[test]
    fn test_admissible_booking() {
        let l = listing();
        let c = candidate("2024-06-01", "2024-06-05", 4);
        assert!(AdmissionPolicy::default().validate(&c, &l, &[]).is_ok());
    }

    #[test]
    fn test_equal_dates_rejected() {
        let l = listing();
        let c = candidate("2024-06-01", "2024-06-01", 2);
        let violations = AdmissionPolicy::default().validate(&c, &l, &[]).unwrap_err();
        assert_eq!(violations, vec![BookingViolation::DatesOutOfOrder]);
    }

    #[test]
    fn test_inverted_dates_rejected() {
        let l = listing();
        let c = candidate("2024-06-05", "2024-06-01", 2);
        let violations = AdmissionPolicy::default().validate(&c, &l, &[]).unwrap_err();
        assert!(violations.contains(&BookingViolation::DatesOutOfOrder));
    }

    #[test]
    fn test_minimum_stay() {
        let l = listing();
        let c = candidate("2024-06-01", "2024-06-02", 2);
        // One night passes the default policy but fails a two-night floor
        assert!(AdmissionPolicy::default().validate(&c, &l, &[]).is_ok());
        let violations = AdmissionPolicy::new(2).validate(&c, &l, &[]).unwrap_err();
        assert_eq!(
            violations,
            vec![BookingViolation::BelowMinimumStay { min_nights: 2 }]
        );
    }

    #[test]
    fn test_capacity_violation_carries_both_counts() {
        let l = listing();
        let c = candidate("2024-06-01", "2024-06-05", 6);
        let violations = AdmissionPolicy::default().validate(&c, &l, &[]).unwrap_err();
        assert_eq!(
            violations,
            vec![BookingViolation::CapacityExceeded {
                requested: 6,
                allowed: 4
            }]
        );
        assert_eq!(
            violations[0].to_string(),
            "Number of guests (6) exceeds listing capacity (4)."
        );
    }

    #[test]
    fn test_zero_guests_rejected() {
        let l = listing();
        let c = candidate("2024-06-01", "2024-06-05", 0);
        let violations = AdmissionPolicy::default().validate(&c, &l, &[]).unwrap_err();
        assert_eq!(violations, vec![BookingViolation::NoGuests]);
    }

    #[test]
    fn test_host_cannot_book_own_listing() {
        let l = listing();
        let mut c = candidate("2024-06-01", "2024-06-05", 2);
        c.guest_id = l.host_id;
        let violations = AdmissionPolicy::default().validate(&c, &l, &[]).unwrap_err();
        assert_eq!(violations, vec![BookingViolation::OwnListing]);
    }

    #[test]
    fn test_overlapping_active_booking_rejected() {
        let l = listing();
        let existing = StayWindow::new(d("2024-06-01"), d("2024-06-05"));
        let c = candidate("2024-06-04", "2024-06-07", 2);
        let violations = AdmissionPolicy::default()
            .validate(&c, &l, &[existing])
            .unwrap_err();
        assert_eq!(violations, vec![BookingViolation::DatesUnavailable]);
    }

    #[test]
    fn test_back_to_back_booking_admitted() {
        let l = listing();
        let existing = StayWindow::new(d("2024-06-01"), d("2024-06-05"));
        let c = candidate("2024-06-05", "2024-06-08", 2);
        assert!(AdmissionPolicy::default()
            .validate(&c, &l, &[existing])
            .is_ok());
    }

    #[test]
    fn test_violations_accumulate_in_rule_order() {
        let l = listing();
        let mut c = candidate("2024-06-05", "2024-06-01", 9);
        c.guest_id = l.host_id;
        let violations = AdmissionPolicy::default().validate(&c, &l, &[]).unwrap_err();
        assert_eq!(
            violations,
            vec![
                BookingViolation::DatesOutOfOrder,
                BookingViolation::CapacityExceeded {
                    requested: 9,
                    allowed: 4
                },
                BookingViolation::OwnListing,
            ]
        );
    }
}
