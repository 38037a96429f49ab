//! PostgreSQL implementation of ReviewRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use stay_core::entities::Review;
use stay_core::error::DomainError;
use stay_core::traits::{RepoResult, ReviewRepository};

use crate::mappers::ReviewInsert;
use crate::models::ReviewModel;

use super::error::{map_db_error, map_unique_violation};

/// PostgreSQL implementation of ReviewRepository
#[derive(Clone)]
pub struct PgReviewRepository {
    pool: PgPool,
}

impl PgReviewRepository {
    /// Create a new PgReviewRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReviewRepository for PgReviewRepository {
    #[instrument(skip(self))]
    async fn find_by_booking(&self, booking_id: Uuid) -> RepoResult<Option<Review>> {
        let result = sqlx::query_as::<_, ReviewModel>(
            r"
            SELECT id, booking_id, rating, comment, created_at
            FROM reviews
            WHERE booking_id = $1
            ",
        )
        .bind(booking_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Review::from))
    }

    #[instrument(skip(self))]
    async fn find_by_listing(&self, listing_id: Uuid) -> RepoResult<Vec<Review>> {
        let rows = sqlx::query_as::<_, ReviewModel>(
            r"
            SELECT r.id, r.booking_id, r.rating, r.comment, r.created_at
            FROM reviews r
            JOIN bookings b ON b.id = r.booking_id
            WHERE b.listing_id = $1
            ORDER BY r.created_at DESC
            ",
        )
        .bind(listing_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(rows.into_iter().map(Review::from).collect())
    }

    #[instrument(skip(self, review))]
    async fn create(&self, review: &Review) -> RepoResult<()> {
        let insert = ReviewInsert::new(review);
        sqlx::query(
            r"
            INSERT INTO reviews (id, booking_id, rating, comment, created_at)
            VALUES ($1, $2, $3, $4, $5)
            ",
        )
        .bind(insert.id)
        .bind(insert.booking_id)
        .bind(insert.rating)
        .bind(insert.comment)
        .bind(review.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::ReviewAlreadyExists))?;

        Ok(())
    }
}
