//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs; the infrastructure layer
//! provides the implementation.

use async_trait::async_trait;
use uuid::Uuid;

use crate::entities::{Booking, BookingStatus, Listing, Review};
use crate::error::DomainError;
use crate::value_objects::StayWindow;

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// Listing Repository
// ============================================================================

#[async_trait]
pub trait ListingRepository: Send + Sync {
    /// Find listing by ID
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Listing>>;

    /// List all listings owned by a host
    async fn find_by_host(&self, host_id: Uuid) -> RepoResult<Vec<Listing>>;

    /// List listings whose location contains the given fragment
    /// (case-insensitive)
    async fn find_by_location(&self, location: &str) -> RepoResult<Vec<Listing>>;

    /// List available listings with no active booking overlapping the
    /// window
    async fn find_available(&self, window: StayWindow) -> RepoResult<Vec<Listing>>;

    /// Create a new listing
    async fn create(&self, listing: &Listing) -> RepoResult<()>;

    /// Update an existing listing
    async fn update(&self, listing: &Listing) -> RepoResult<()>;

    /// Delete a listing; dependent bookings are removed with it
    async fn delete(&self, id: Uuid) -> RepoResult<()>;
}

// ============================================================================
// Booking Repository
// ============================================================================

#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Find booking by ID
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Booking>>;

    /// List all bookings made by a guest
    async fn find_by_guest(&self, guest_id: Uuid) -> RepoResult<Vec<Booking>>;

    /// List all bookings for a listing
    async fn find_by_listing(&self, listing_id: Uuid) -> RepoResult<Vec<Booking>>;

    /// Stay windows of the listing's active (pending or confirmed)
    /// bookings, optionally excluding one booking (used when revalidating
    /// an update)
    async fn active_windows(
        &self,
        listing_id: Uuid,
        exclude: Option<Uuid>,
    ) -> RepoResult<Vec<StayWindow>>;

    /// True when any active booking for the listing overlaps the window.
    /// Pure read; a degenerate window reports no overlap.
    async fn has_active_overlap(
        &self,
        listing_id: Uuid,
        window: StayWindow,
        exclude: Option<Uuid>,
    ) -> RepoResult<bool>;

    /// Persist a new booking. Implementations MUST re-check the overlap
    /// condition atomically with the insert and fail with
    /// `DomainError::DatesUnavailable` if a conflicting active booking
    /// exists by commit time.
    async fn create(&self, booking: &Booking) -> RepoResult<()>;

    /// Persist changed dates, guest count, price, or special requests.
    /// Same atomic conflict guarantee as `create` when dates change.
    async fn update(&self, booking: &Booking) -> RepoResult<()>;

    /// Persist a status change only
    async fn update_status(&self, id: Uuid, status: BookingStatus) -> RepoResult<()>;
}

// ============================================================================
// Review Repository
// ============================================================================

#[async_trait]
pub trait ReviewRepository: Send + Sync {
    /// Find the review for a booking, if any
    async fn find_by_booking(&self, booking_id: Uuid) -> RepoResult<Option<Review>>;

    /// List reviews for a listing (via its bookings)
    async fn find_by_listing(&self, listing_id: Uuid) -> RepoResult<Vec<Review>>;

    /// Create a new review
    async fn create(&self, review: &Review) -> RepoResult<()>;
}
