//! Use-case services
//!
//! Each service borrows the shared `ServiceContext` and implements one
//! slice of application behavior on top of the repository ports.

mod booking;
mod context;
mod error;
mod listing;
mod review;

pub use booking::BookingService;
pub use context::ServiceContext;
pub use error::{ServiceError, ServiceResult};
pub use listing::ListingService;
pub use review::ReviewService;
