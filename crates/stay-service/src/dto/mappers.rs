//! Entity to DTO mappers
//!
//! Implements `From` conversions from domain entities to response DTOs.

use rust_decimal::Decimal;

use stay_core::entities::{Booking, Listing, Review};

use super::responses::{
    BookingResponse, ListingDetailResponse, ListingResponse, ListingStats, ReviewResponse,
};

impl From<&Listing> for ListingResponse {
    fn from(listing: &Listing) -> Self {
        Self {
            id: listing.id,
            title: listing.title.clone(),
            description: listing.description.clone(),
            location: listing.location.clone(),
            property_type: listing.property_type.to_string(),
            price_per_night: listing.price_per_night,
            max_guests: listing.max_guests,
            bedrooms: listing.bedrooms,
            bathrooms: listing.bathrooms,
            amenities: listing
                .amenities_list()
                .into_iter()
                .map(str::to_string)
                .collect(),
            available: listing.available,
            host_id: listing.host_id,
            created_at: listing.created_at,
        }
    }
}

impl From<Listing> for ListingResponse {
    fn from(listing: Listing) -> Self {
        Self::from(&listing)
    }
}

impl ListingStats {
    /// Aggregate review figures; the mean is kept at two fractional digits
    pub fn from_reviews(reviews: &[Review]) -> Self {
        if reviews.is_empty() {
            return Self::default();
        }
        let sum: i64 = reviews.iter().map(|r| i64::from(r.rating)).sum();
        let mut average = Decimal::from(sum) / Decimal::from(reviews.len() as u64);
        average.rescale(2);
        Self {
            review_count: reviews.len(),
            average_rating: Some(average),
        }
    }
}

impl ListingDetailResponse {
    pub fn new(listing: &Listing, reviews: &[Review]) -> Self {
        Self {
            listing: ListingResponse::from(listing),
            stats: ListingStats::from_reviews(reviews),
        }
    }
}

impl From<&Booking> for BookingResponse {
    fn from(booking: &Booking) -> Self {
        Self {
            id: booking.id,
            listing_id: booking.listing_id,
            guest_id: booking.guest_id,
            check_in_date: booking.check_in_date,
            check_out_date: booking.check_out_date,
            nights: booking.nights(),
            number_of_guests: booking.number_of_guests,
            total_price: booking.total_price,
            status: booking.status.to_string(),
            special_requests: if booking.special_requests.is_empty() {
                None
            } else {
                Some(booking.special_requests.clone())
            },
            created_at: booking.created_at,
        }
    }
}

impl From<Booking> for BookingResponse {
    fn from(booking: Booking) -> Self {
        Self::from(&booking)
    }
}

impl From<&Review> for ReviewResponse {
    fn from(review: &Review) -> Self {
        Self {
            id: review.id,
            booking_id: review.booking_id,
            rating: review.rating,
            comment: review.comment.clone(),
            created_at: review.created_at,
        }
    }
}

impl From<Review> for ReviewResponse {
    fn from(review: Review) -> Self {
        Self::from(&review)
    }
}
