//! Review entity <-> model mapper

use uuid::Uuid;

use stay_core::entities::Review;

use crate::models::ReviewModel;

/// Convert ReviewModel to Review entity
impl From<ReviewModel> for Review {
    fn from(model: ReviewModel) -> Self {
        Review {
            id: model.id,
            booking_id: model.booking_id,
            rating: model.rating,
            comment: model.comment,
            created_at: model.created_at,
        }
    }
}

/// Review entity reference prepared for database insertion
pub struct ReviewInsert<'a> {
    pub id: Uuid,
    pub booking_id: Uuid,
    pub rating: i32,
    pub comment: &'a str,
}

impl<'a> ReviewInsert<'a> {
    pub fn new(review: &'a Review) -> Self {
        Self {
            id: review.id,
            booking_id: review.booking_id,
            rating: review.rating,
            comment: &review.comment,
        }
    }
}
