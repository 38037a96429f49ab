//! Booking policy - pure admission rules and pricing
//!
//! Everything here operates on immutable snapshots and returns results;
//! persistence is the repository layer's concern.

mod admission;
mod pricing;

pub use admission::{AdmissionPolicy, BookingCandidate, BookingViolation};
pub use pricing::Quote;
