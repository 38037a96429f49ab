//! PostgreSQL implementation of BookingRepository
//!
//! Writes that introduce or move a stay window run inside a transaction
//! that locks the listing row, so two concurrent admissions for the same
//! listing serialize and the second one sees the first one's rows when it
//! re-checks the overlap. The bookings table additionally carries a
//! range-exclusion constraint; a violation of it surfaces as the
//! date-conflict error rather than a generic database failure.

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction};
use tracing::instrument;
use uuid::Uuid;

use stay_core::entities::{Booking, BookingStatus};
use stay_core::error::DomainError;
use stay_core::traits::{BookingRepository, RepoResult};
use stay_core::value_objects::StayWindow;

use crate::mappers::BookingInsert;
use crate::models::{BookingModel, StayWindowRow};

use super::error::{booking_not_found, listing_not_found, map_conflict_error, map_db_error};

const BOOKING_COLUMNS: &str = "id, listing_id, guest_id, check_in_date, check_out_date, \
     number_of_guests, total_price, status, special_requests, created_at, updated_at";

/// PostgreSQL implementation of BookingRepository
#[derive(Clone)]
pub struct PgBookingRepository {
    pool: PgPool,
}

impl PgBookingRepository {
    /// Create a new PgBookingRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Lock the listing row so concurrent admissions for it serialize
    async fn lock_listing(
        tx: &mut Transaction<'_, Postgres>,
        listing_id: Uuid,
    ) -> RepoResult<()> {
        let locked = sqlx::query_scalar::<_, Uuid>("SELECT id FROM listings WHERE id = $1 FOR UPDATE")
            .bind(listing_id)
            .fetch_optional(&mut **tx)
            .await
            .map_err(map_db_error)?;

        if locked.is_none() {
            return Err(listing_not_found(listing_id));
        }
        Ok(())
    }

    /// Re-check the overlap condition inside the transaction
    async fn conflict_exists(
        tx: &mut Transaction<'_, Postgres>,
        listing_id: Uuid,
        window: StayWindow,
        exclude: Option<Uuid>,
    ) -> RepoResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            r"
            SELECT EXISTS(
                SELECT 1 FROM bookings
                WHERE listing_id = $1
                  AND status IN ('pending', 'confirmed')
                  AND check_in_date < $3
                  AND check_out_date > $2
                  AND ($4::uuid IS NULL OR id <> $4)
            )
            ",
        )
        .bind(listing_id)
        .bind(window.check_in)
        .bind(window.check_out)
        .bind(exclude)
        .fetch_one(&mut **tx)
        .await
        .map_err(map_db_error)?;

        Ok(exists)
    }
}

fn collect(rows: Vec<BookingModel>) -> RepoResult<Vec<Booking>> {
    rows.into_iter().map(Booking::try_from).collect()
}

#[async_trait]
impl BookingRepository for PgBookingRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Booking>> {
        let result = sqlx::query_as::<_, BookingModel>(&format!(
            "SELECT {BOOKING_COLUMNS} FROM bookings WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(Booking::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn find_by_guest(&self, guest_id: Uuid) -> RepoResult<Vec<Booking>> {
        let rows = sqlx::query_as::<_, BookingModel>(&format!(
            "SELECT {BOOKING_COLUMNS} FROM bookings \
             WHERE guest_id = $1 ORDER BY created_at DESC"
        ))
        .bind(guest_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        collect(rows)
    }

    #[instrument(skip(self))]
    async fn find_by_listing(&self, listing_id: Uuid) -> RepoResult<Vec<Booking>> {
        let rows = sqlx::query_as::<_, BookingModel>(&format!(
            "SELECT {BOOKING_COLUMNS} FROM bookings \
             WHERE listing_id = $1 ORDER BY check_in_date"
        ))
        .bind(listing_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        collect(rows)
    }

    #[instrument(skip(self))]
    async fn active_windows(
        &self,
        listing_id: Uuid,
        exclude: Option<Uuid>,
    ) -> RepoResult<Vec<StayWindow>> {
        let rows = sqlx::query_as::<_, StayWindowRow>(
            r"
            SELECT check_in_date, check_out_date FROM bookings
            WHERE listing_id = $1
              AND status IN ('pending', 'confirmed')
              AND ($2::uuid IS NULL OR id <> $2)
            ORDER BY check_in_date
            ",
        )
        .bind(listing_id)
        .bind(exclude)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(rows.into_iter().map(StayWindow::from).collect())
    }

    #[instrument(skip(self))]
    async fn has_active_overlap(
        &self,
        listing_id: Uuid,
        window: StayWindow,
        exclude: Option<Uuid>,
    ) -> RepoResult<bool> {
        // Empty window, nothing can overlap it.
        if !window.is_ordered() {
            return Ok(false);
        }

        let exists = sqlx::query_scalar::<_, bool>(
            r"
            SELECT EXISTS(
                SELECT 1 FROM bookings
                WHERE listing_id = $1
                  AND status IN ('pending', 'confirmed')
                  AND check_in_date < $3
                  AND check_out_date > $2
                  AND ($4::uuid IS NULL OR id <> $4)
            )
            ",
        )
        .bind(listing_id)
        .bind(window.check_in)
        .bind(window.check_out)
        .bind(exclude)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(exists)
    }

    #[instrument(skip(self, booking))]
    async fn create(&self, booking: &Booking) -> RepoResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        Self::lock_listing(&mut tx, booking.listing_id).await?;
        if Self::conflict_exists(&mut tx, booking.listing_id, booking.window(), None).await? {
            return Err(DomainError::DatesUnavailable);
        }

        let insert = BookingInsert::new(booking);
        sqlx::query(
            r"
            INSERT INTO bookings (id, listing_id, guest_id, check_in_date, check_out_date,
                                  number_of_guests, total_price, status, special_requests,
                                  created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            ",
        )
        .bind(insert.id)
        .bind(insert.listing_id)
        .bind(insert.guest_id)
        .bind(insert.check_in_date)
        .bind(insert.check_out_date)
        .bind(insert.number_of_guests)
        .bind(insert.total_price)
        .bind(insert.status)
        .bind(insert.special_requests)
        .bind(booking.created_at)
        .bind(booking.updated_at)
        .execute(&mut *tx)
        .await
        .map_err(map_conflict_error)?;

        tx.commit().await.map_err(map_conflict_error)?;
        Ok(())
    }

    #[instrument(skip(self, booking))]
    async fn update(&self, booking: &Booking) -> RepoResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        Self::lock_listing(&mut tx, booking.listing_id).await?;
        if booking.status.is_active()
            && Self::conflict_exists(
                &mut tx,
                booking.listing_id,
                booking.window(),
                Some(booking.id),
            )
            .await?
        {
            return Err(DomainError::DatesUnavailable);
        }

        let insert = BookingInsert::new(booking);
        let result = sqlx::query(
            r"
            UPDATE bookings
            SET check_in_date = $2, check_out_date = $3, number_of_guests = $4,
                total_price = $5, status = $6, special_requests = $7, updated_at = $8
            WHERE id = $1
            ",
        )
        .bind(insert.id)
        .bind(insert.check_in_date)
        .bind(insert.check_out_date)
        .bind(insert.number_of_guests)
        .bind(insert.total_price)
        .bind(insert.status)
        .bind(insert.special_requests)
        .bind(booking.updated_at)
        .execute(&mut *tx)
        .await
        .map_err(map_conflict_error)?;

        if result.rows_affected() == 0 {
            return Err(booking_not_found(booking.id));
        }

        tx.commit().await.map_err(map_conflict_error)?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn update_status(&self, id: Uuid, status: BookingStatus) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE bookings SET status = $2, updated_at = NOW() WHERE id = $1
            ",
        )
        .bind(id)
        .bind(status.as_str())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(booking_not_found(id));
        }
        Ok(())
    }
}
