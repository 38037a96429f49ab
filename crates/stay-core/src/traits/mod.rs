//! Repository traits (ports)

mod repositories;

pub use repositories::{BookingRepository, ListingRepository, RepoResult, ReviewRepository};
