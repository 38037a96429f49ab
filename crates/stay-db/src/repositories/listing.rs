//! PostgreSQL implementation of ListingRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use stay_core::entities::Listing;
use stay_core::traits::{ListingRepository, RepoResult};
use stay_core::value_objects::StayWindow;

use crate::mappers::ListingInsert;
use crate::models::ListingModel;

use super::error::{listing_not_found, map_db_error};

const LISTING_COLUMNS: &str = "id, title, description, location, property_type, price_per_night, \
     max_guests, bedrooms, bathrooms, amenities, available, host_id, created_at, updated_at";

/// PostgreSQL implementation of ListingRepository
#[derive(Clone)]
pub struct PgListingRepository {
    pool: PgPool,
}

impl PgListingRepository {
    /// Create a new PgListingRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn collect(rows: Vec<ListingModel>) -> RepoResult<Vec<Listing>> {
    rows.into_iter().map(Listing::try_from).collect()
}

#[async_trait]
impl ListingRepository for PgListingRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Listing>> {
        let result = sqlx::query_as::<_, ListingModel>(&format!(
            "SELECT {LISTING_COLUMNS} FROM listings WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(Listing::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn find_by_host(&self, host_id: Uuid) -> RepoResult<Vec<Listing>> {
        let rows = sqlx::query_as::<_, ListingModel>(&format!(
            "SELECT {LISTING_COLUMNS} FROM listings WHERE host_id = $1 ORDER BY created_at DESC"
        ))
        .bind(host_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        collect(rows)
    }

    #[instrument(skip(self))]
    async fn find_by_location(&self, location: &str) -> RepoResult<Vec<Listing>> {
        let rows = sqlx::query_as::<_, ListingModel>(&format!(
            "SELECT {LISTING_COLUMNS} FROM listings \
             WHERE location ILIKE '%' || $1 || '%' \
             ORDER BY created_at DESC"
        ))
        .bind(location)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        collect(rows)
    }

    #[instrument(skip(self))]
    async fn find_available(&self, window: StayWindow) -> RepoResult<Vec<Listing>> {
        // A degenerate window is empty and conflicts with nothing, so
        // every available listing qualifies.
        if !window.is_ordered() {
            let rows = sqlx::query_as::<_, ListingModel>(&format!(
                "SELECT {LISTING_COLUMNS} FROM listings \
                 WHERE available ORDER BY created_at DESC"
            ))
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;
            return collect(rows);
        }

        let rows = sqlx::query_as::<_, ListingModel>(&format!(
            "SELECT {LISTING_COLUMNS} FROM listings l \
             WHERE l.available \
               AND NOT EXISTS ( \
                   SELECT 1 FROM bookings b \
                   WHERE b.listing_id = l.id \
                     AND b.status IN ('pending', 'confirmed') \
                     AND b.check_in_date < $2 \
                     AND b.check_out_date > $1 \
               ) \
             ORDER BY l.created_at DESC"
        ))
        .bind(window.check_in)
        .bind(window.check_out)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        collect(rows)
    }

    #[instrument(skip(self, listing))]
    async fn create(&self, listing: &Listing) -> RepoResult<()> {
        let insert = ListingInsert::new(listing);
        sqlx::query(
            r"
            INSERT INTO listings (id, title, description, location, property_type,
                                  price_per_night, max_guests, bedrooms, bathrooms,
                                  amenities, available, host_id, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            ",
        )
        .bind(insert.id)
        .bind(insert.title)
        .bind(insert.description)
        .bind(insert.location)
        .bind(insert.property_type)
        .bind(insert.price_per_night)
        .bind(insert.max_guests)
        .bind(insert.bedrooms)
        .bind(insert.bathrooms)
        .bind(insert.amenities)
        .bind(insert.available)
        .bind(insert.host_id)
        .bind(listing.created_at)
        .bind(listing.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self, listing))]
    async fn update(&self, listing: &Listing) -> RepoResult<()> {
        let insert = ListingInsert::new(listing);
        let result = sqlx::query(
            r"
            UPDATE listings
            SET title = $2, description = $3, location = $4, property_type = $5,
                price_per_night = $6, max_guests = $7, bedrooms = $8, bathrooms = $9,
                amenities = $10, available = $11, updated_at = $12
            WHERE id = $1
            ",
        )
        .bind(insert.id)
        .bind(insert.title)
        .bind(insert.description)
        .bind(insert.location)
        .bind(insert.property_type)
        .bind(insert.price_per_night)
        .bind(insert.max_guests)
        .bind(insert.bedrooms)
        .bind(insert.bathrooms)
        .bind(insert.amenities)
        .bind(insert.available)
        .bind(listing.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(listing_not_found(listing.id));
        }
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> RepoResult<()> {
        let result = sqlx::query("DELETE FROM listings WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(listing_not_found(id));
        }
        Ok(())
    }
}
