//! # stay-core
//!
//! Domain layer containing entities, value objects, the booking admission
//! policy, and repository traits. This crate has zero dependencies on
//! infrastructure (database, web framework, etc.).

pub mod entities;
pub mod error;
pub mod policy;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{Booking, BookingStatus, Listing, PropertyType, Review};
pub use error::DomainError;
pub use policy::{AdmissionPolicy, BookingCandidate, BookingViolation, Quote};
pub use traits::{BookingRepository, ListingRepository, RepoResult, ReviewRepository};
pub use value_objects::StayWindow;
