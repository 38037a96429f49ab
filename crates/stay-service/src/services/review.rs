//! Review service
//!
//! A guest may review a booking once, and only after the stay completed.

use tracing::{info, instrument};
use uuid::Uuid;
use validator::Validate;

use stay_core::entities::{BookingStatus, Review};
use stay_core::error::DomainError;

use crate::dto::{CreateReviewRequest, ReviewResponse};

use super::booking::BookingService;
use super::context::ServiceContext;
use super::error::ServiceResult;

/// Review service
pub struct ReviewService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ReviewService<'a> {
    /// Create a new ReviewService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Review a completed booking
    #[instrument(skip(self, request))]
    pub async fn create_review(
        &self,
        user_id: Uuid,
        request: CreateReviewRequest,
    ) -> ServiceResult<ReviewResponse> {
        request.validate()?;

        let booking = BookingService::new(self.ctx)
            .get_booking_entity(request.booking_id)
            .await?;
        if !booking.is_booked_by(user_id) {
            return Err(DomainError::NotBookingGuest.into());
        }
        if booking.status != BookingStatus::Completed {
            return Err(DomainError::BookingNotCompleted.into());
        }
        if self
            .ctx
            .review_repo()
            .find_by_booking(booking.id)
            .await?
            .is_some()
        {
            return Err(DomainError::ReviewAlreadyExists.into());
        }

        let review = Review::new(Uuid::new_v4(), booking.id, request.rating, request.comment);
        self.ctx.review_repo().create(&review).await?;

        info!(review_id = %review.id, booking_id = %booking.id, "Review created");

        Ok(ReviewResponse::from(&review))
    }

    /// List a listing's reviews, newest first
    #[instrument(skip(self))]
    pub async fn reviews_for_listing(&self, listing_id: Uuid) -> ServiceResult<Vec<ReviewResponse>> {
        let reviews = self.ctx.review_repo().find_by_listing(listing_id).await?;
        Ok(reviews.iter().map(ReviewResponse::from).collect())
    }
}
