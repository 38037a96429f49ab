//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in
//! stay-core. Each repository handles database operations for a specific
//! domain entity.

mod booking;
mod error;
mod listing;
mod review;

pub use booking::PgBookingRepository;
pub use listing::PgListingRepository;
pub use review::PgReviewRepository;
