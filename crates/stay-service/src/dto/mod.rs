//! Data transfer objects
//!
//! Request DTOs validate input at the boundary; response DTOs shape
//! entities for API payloads.

mod mappers;
mod requests;
mod responses;

pub use requests::{
    CreateBookingRequest, CreateListingRequest, CreateReviewRequest, UpdateBookingRequest,
    UpdateListingRequest,
};
pub use responses::{
    BookingResponse, ListingDetailResponse, ListingResponse, ListingStats, ReviewResponse,
};
