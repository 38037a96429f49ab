//! Review entity - a guest's rating of a completed stay

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Review entity, 1:1 with a completed booking
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Review {
    pub id: Uuid,
    pub booking_id: Uuid,
    /// 1 to 5 stars
    pub rating: i32,
    pub comment: String,
    pub created_at: DateTime<Utc>,
}

impl Review {
    pub const MIN_RATING: i32 = 1;
    pub const MAX_RATING: i32 = 5;

    /// Create a new Review
    pub fn new(id: Uuid, booking_id: Uuid, rating: i32, comment: String) -> Self {
        Self {
            id,
            booking_id,
            rating,
            comment,
            created_at: Utc::now(),
        }
    }

    /// Check that the rating falls within the allowed 1..=5 range
    #[inline]
    pub fn rating_in_range(rating: i32) -> bool {
        (Self::MIN_RATING..=Self::MAX_RATING).contains(&rating)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rating_range() {
        assert!(Review::rating_in_range(1));
        assert!(Review::rating_in_range(5));
        assert!(!Review::rating_in_range(0));
        assert!(!Review::rating_in_range(6));
    }
}
