//! # stay-service
//!
//! Application layer - orchestrates domain logic behind use-case services.
//! It handles:
//!
//! - Booking admission, pricing, and lifecycle transitions
//! - Listing management and availability queries
//! - Reviews of completed stays
//! - Request validation and DTO mapping

pub mod dto;
pub mod services;

// Re-export commonly used types
pub use services::{
    BookingService, ListingService, ReviewService, ServiceContext, ServiceError, ServiceResult,
};
