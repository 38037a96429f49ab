//! Domain entities - core business objects

mod booking;
mod listing;
mod review;

pub use booking::{Booking, BookingStatus};
pub use listing::{Listing, PropertyType};
pub use review::Review;
