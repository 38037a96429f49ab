//! Entity to model mappers
//!
//! Conversions between domain entities (stay-core) and database models.
//! - `TryFrom<Model> for Entity`: convert database rows to domain objects,
//!   rejecting rows whose stored labels no longer parse
//! - `*Insert` structs: prepare entity data for database writes

mod booking;
mod listing;
mod review;

pub use booking::BookingInsert;
pub use listing::ListingInsert;
pub use review::ReviewInsert;
