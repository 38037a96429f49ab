//! Database models - SQLx-compatible structs for PostgreSQL tables

mod booking;
mod listing;
mod review;

pub use booking::{BookingModel, StayWindowRow};
pub use listing::ListingModel;
pub use review::ReviewModel;
