//! Service context - dependency container for services
//!
//! Holds the repository ports and the admission policy shared by all
//! services. Constructed either from concrete PostgreSQL repositories or
//! from any other implementations of the ports (tests substitute
//! in-memory ones).

use std::sync::Arc;

use stay_common::BookingPolicyConfig;
use stay_core::policy::AdmissionPolicy;
use stay_core::traits::{BookingRepository, ListingRepository, ReviewRepository};
use stay_db::{PgBookingRepository, PgListingRepository, PgPool, PgReviewRepository};

/// Service context containing all dependencies
#[derive(Clone)]
pub struct ServiceContext {
    listing_repo: Arc<dyn ListingRepository>,
    booking_repo: Arc<dyn BookingRepository>,
    review_repo: Arc<dyn ReviewRepository>,
    admission_policy: AdmissionPolicy,
}

impl ServiceContext {
    /// Create a new service context from repository implementations
    pub fn new(
        listing_repo: Arc<dyn ListingRepository>,
        booking_repo: Arc<dyn BookingRepository>,
        review_repo: Arc<dyn ReviewRepository>,
        admission_policy: AdmissionPolicy,
    ) -> Self {
        Self {
            listing_repo,
            booking_repo,
            review_repo,
            admission_policy,
        }
    }

    /// Create a context backed by PostgreSQL repositories
    pub fn from_pool(pool: PgPool, booking_config: &BookingPolicyConfig) -> Self {
        Self::new(
            Arc::new(PgListingRepository::new(pool.clone())),
            Arc::new(PgBookingRepository::new(pool.clone())),
            Arc::new(PgReviewRepository::new(pool)),
            AdmissionPolicy::new(booking_config.min_stay_nights),
        )
    }

    /// Get the listing repository
    pub fn listing_repo(&self) -> &dyn ListingRepository {
        self.listing_repo.as_ref()
    }

    /// Get the booking repository
    pub fn booking_repo(&self) -> &dyn BookingRepository {
        self.booking_repo.as_ref()
    }

    /// Get the review repository
    pub fn review_repo(&self) -> &dyn ReviewRepository {
        self.review_repo.as_ref()
    }

    /// Get the booking admission policy
    pub fn admission_policy(&self) -> AdmissionPolicy {
        self.admission_policy
    }
}
