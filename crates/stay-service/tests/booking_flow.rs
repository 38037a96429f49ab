//! Booking flow tests
//!
//! Exercise the services end to end against in-memory repository
//! implementations, so no database is needed. The in-memory booking
//! repository mirrors the production guarantee: `create` and `update`
//! re-check the overlap condition under the same lock as the write.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use rust_decimal_macros::dec;
use uuid::Uuid;

use stay_core::entities::{Booking, BookingStatus, Listing, Review};
use stay_core::error::DomainError;
use stay_core::policy::{AdmissionPolicy, BookingViolation};
use stay_core::traits::{BookingRepository, ListingRepository, RepoResult, ReviewRepository};
use stay_core::value_objects::StayWindow;
use stay_service::dto::{
    CreateBookingRequest, CreateListingRequest, CreateReviewRequest, UpdateBookingRequest,
};
use stay_service::{BookingService, ListingService, ReviewService, ServiceContext, ServiceError};

// ============================================================================
// In-memory repositories
// ============================================================================

#[derive(Default)]
struct Store {
    listings: Mutex<HashMap<Uuid, Listing>>,
    bookings: Mutex<HashMap<Uuid, Booking>>,
    reviews: Mutex<HashMap<Uuid, Review>>,
}

impl Store {
    fn active_windows_locked(
        bookings: &HashMap<Uuid, Booking>,
        listing_id: Uuid,
        exclude: Option<Uuid>,
    ) -> Vec<StayWindow> {
        bookings
            .values()
            .filter(|b| {
                b.listing_id == listing_id && b.status.is_active() && Some(b.id) != exclude
            })
            .map(Booking::window)
            .collect()
    }
}

struct MemListings(Arc<Store>);
struct MemBookings(Arc<Store>);
struct MemReviews(Arc<Store>);

#[async_trait]
impl ListingRepository for MemListings {
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Listing>> {
        Ok(self.0.listings.lock().unwrap().get(&id).cloned())
    }

    async fn find_by_host(&self, host_id: Uuid) -> RepoResult<Vec<Listing>> {
        Ok(self
            .0
            .listings
            .lock()
            .unwrap()
            .values()
            .filter(|l| l.host_id == host_id)
            .cloned()
            .collect())
    }

    async fn find_by_location(&self, location: &str) -> RepoResult<Vec<Listing>> {
        let needle = location.to_lowercase();
        Ok(self
            .0
            .listings
            .lock()
            .unwrap()
            .values()
            .filter(|l| l.location.to_lowercase().contains(&needle))
            .cloned()
            .collect())
    }

    async fn find_available(&self, window: StayWindow) -> RepoResult<Vec<Listing>> {
        let bookings = self.0.bookings.lock().unwrap();
        Ok(self
            .0
            .listings
            .lock()
            .unwrap()
            .values()
            .filter(|l| {
                l.available
                    && !Store::active_windows_locked(&bookings, l.id, None)
                        .iter()
                        .any(|w| window.overlaps(w))
            })
            .cloned()
            .collect())
    }

    async fn create(&self, listing: &Listing) -> RepoResult<()> {
        self.0
            .listings
            .lock()
            .unwrap()
            .insert(listing.id, listing.clone());
        Ok(())
    }

    async fn update(&self, listing: &Listing) -> RepoResult<()> {
        let mut listings = self.0.listings.lock().unwrap();
        if !listings.contains_key(&listing.id) {
            return Err(DomainError::ListingNotFound(listing.id));
        }
        listings.insert(listing.id, listing.clone());
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> RepoResult<()> {
        if self.0.listings.lock().unwrap().remove(&id).is_none() {
            return Err(DomainError::ListingNotFound(id));
        }
        self.0
            .bookings
            .lock()
            .unwrap()
            .retain(|_, b| b.listing_id != id);
        Ok(())
    }
}

#[async_trait]
impl BookingRepository for MemBookings {
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Booking>> {
        Ok(self.0.bookings.lock().unwrap().get(&id).cloned())
    }

    async fn find_by_guest(&self, guest_id: Uuid) -> RepoResult<Vec<Booking>> {
        Ok(self
            .0
            .bookings
            .lock()
            .unwrap()
            .values()
            .filter(|b| b.guest_id == guest_id)
            .cloned()
            .collect())
    }

    async fn find_by_listing(&self, listing_id: Uuid) -> RepoResult<Vec<Booking>> {
        Ok(self
            .0
            .bookings
            .lock()
            .unwrap()
            .values()
            .filter(|b| b.listing_id == listing_id)
            .cloned()
            .collect())
    }

    async fn active_windows(
        &self,
        listing_id: Uuid,
        exclude: Option<Uuid>,
    ) -> RepoResult<Vec<StayWindow>> {
        let bookings = self.0.bookings.lock().unwrap();
        Ok(Store::active_windows_locked(&bookings, listing_id, exclude))
    }

    async fn has_active_overlap(
        &self,
        listing_id: Uuid,
        window: StayWindow,
        exclude: Option<Uuid>,
    ) -> RepoResult<bool> {
        let bookings = self.0.bookings.lock().unwrap();
        Ok(Store::active_windows_locked(&bookings, listing_id, exclude)
            .iter()
            .any(|w| window.overlaps(w)))
    }

    async fn create(&self, booking: &Booking) -> RepoResult<()> {
        let mut bookings = self.0.bookings.lock().unwrap();
        let conflict = Store::active_windows_locked(&bookings, booking.listing_id, None)
            .iter()
            .any(|w| booking.window().overlaps(w));
        if conflict {
            return Err(DomainError::DatesUnavailable);
        }
        bookings.insert(booking.id, booking.clone());
        Ok(())
    }

    async fn update(&self, booking: &Booking) -> RepoResult<()> {
        let mut bookings = self.0.bookings.lock().unwrap();
        if !bookings.contains_key(&booking.id) {
            return Err(DomainError::BookingNotFound(booking.id));
        }
        if booking.status.is_active() {
            let conflict =
                Store::active_windows_locked(&bookings, booking.listing_id, Some(booking.id))
                    .iter()
                    .any(|w| booking.window().overlaps(w));
            if conflict {
                return Err(DomainError::DatesUnavailable);
            }
        }
        bookings.insert(booking.id, booking.clone());
        Ok(())
    }

    async fn update_status(&self, id: Uuid, status: BookingStatus) -> RepoResult<()> {
        let mut bookings = self.0.bookings.lock().unwrap();
        let booking = bookings
            .get_mut(&id)
            .ok_or(DomainError::BookingNotFound(id))?;
        booking.status = status;
        Ok(())
    }
}

#[async_trait]
impl ReviewRepository for MemReviews {
    async fn find_by_booking(&self, booking_id: Uuid) -> RepoResult<Option<Review>> {
        Ok(self
            .0
            .reviews
            .lock()
            .unwrap()
            .values()
            .find(|r| r.booking_id == booking_id)
            .cloned())
    }

    async fn find_by_listing(&self, listing_id: Uuid) -> RepoResult<Vec<Review>> {
        let bookings = self.0.bookings.lock().unwrap();
        Ok(self
            .0
            .reviews
            .lock()
            .unwrap()
            .values()
            .filter(|r| {
                bookings
                    .get(&r.booking_id)
                    .is_some_and(|b| b.listing_id == listing_id)
            })
            .cloned()
            .collect())
    }

    async fn create(&self, review: &Review) -> RepoResult<()> {
        let mut reviews = self.0.reviews.lock().unwrap();
        if reviews.values().any(|r| r.booking_id == review.booking_id) {
            return Err(DomainError::ReviewAlreadyExists);
        }
        reviews.insert(review.id, review.clone());
        Ok(())
    }
}

/// Booking repository whose commit-time conflict re-check always fires,
/// as if a concurrent admission won the race after the snapshot was taken
struct RacingBookings;

#[async_trait]
impl BookingRepository for RacingBookings {
    async fn find_by_id(&self, _id: Uuid) -> RepoResult<Option<Booking>> {
        Ok(None)
    }

    async fn find_by_guest(&self, _guest_id: Uuid) -> RepoResult<Vec<Booking>> {
        Ok(Vec::new())
    }

    async fn find_by_listing(&self, _listing_id: Uuid) -> RepoResult<Vec<Booking>> {
        Ok(Vec::new())
    }

    async fn active_windows(
        &self,
        _listing_id: Uuid,
        _exclude: Option<Uuid>,
    ) -> RepoResult<Vec<StayWindow>> {
        Ok(Vec::new())
    }

    async fn has_active_overlap(
        &self,
        _listing_id: Uuid,
        _window: StayWindow,
        _exclude: Option<Uuid>,
    ) -> RepoResult<bool> {
        Ok(false)
    }

    async fn create(&self, _booking: &Booking) -> RepoResult<()> {
        Err(DomainError::DatesUnavailable)
    }

    async fn update(&self, _booking: &Booking) -> RepoResult<()> {
        Err(DomainError::DatesUnavailable)
    }

    async fn update_status(&self, _id: Uuid, _status: BookingStatus) -> RepoResult<()> {
        Ok(())
    }
}

// ============================================================================
// Fixtures
// ============================================================================

fn context() -> (ServiceContext, Arc<Store>) {
    let store = Arc::new(Store::default());
    let ctx = ServiceContext::new(
        Arc::new(MemListings(store.clone())),
        Arc::new(MemBookings(store.clone())),
        Arc::new(MemReviews(store.clone())),
        AdmissionPolicy::default(),
    );
    (ctx, store)
}

async fn seeded_listing(ctx: &ServiceContext, host_id: Uuid) -> Uuid {
    let response = ListingService::new(ctx)
        .create_listing(
            host_id,
            CreateListingRequest {
                title: "Harbour loft".to_string(),
                description: String::new(),
                location: "Porto".to_string(),
                property_type: Some("loft".to_string()),
                price_per_night: dec!(100.00),
                max_guests: 4,
                bedrooms: None,
                bathrooms: None,
                amenities: Some("wifi, kitchen".to_string()),
            },
        )
        .await
        .unwrap();
    response.id
}

fn booking_request(
    listing_id: Uuid,
    check_in: &str,
    check_out: &str,
    guests: i32,
) -> CreateBookingRequest {
    CreateBookingRequest {
        listing_id,
        check_in_date: check_in.parse().unwrap(),
        check_out_date: check_out.parse().unwrap(),
        number_of_guests: guests,
        special_requests: None,
    }
}

// ============================================================================
// Booking admission and pricing
// ============================================================================

#[tokio::test]
async fn test_create_booking_prices_and_starts_pending() {
    let (ctx, _) = context();
    let host = Uuid::new_v4();
    let guest = Uuid::new_v4();
    let listing_id = seeded_listing(&ctx, host).await;

    let booking = BookingService::new(&ctx)
        .create_booking(guest, booking_request(listing_id, "2024-06-01", "2024-06-05", 2))
        .await
        .unwrap();

    assert_eq!(booking.nights, 4);
    assert_eq!(booking.total_price, dec!(400.00));
    assert_eq!(booking.status, "pending");
}

#[tokio::test]
async fn test_overlapping_booking_rejected() {
    let (ctx, _) = context();
    let host = Uuid::new_v4();
    let listing_id = seeded_listing(&ctx, host).await;
    let service = BookingService::new(&ctx);

    service
        .create_booking(
            Uuid::new_v4(),
            booking_request(listing_id, "2024-06-01", "2024-06-05", 2),
        )
        .await
        .unwrap();

    let err = service
        .create_booking(
            Uuid::new_v4(),
            booking_request(listing_id, "2024-06-04", "2024-06-07", 2),
        )
        .await
        .unwrap_err();

    assert_eq!(
        err.violations().unwrap(),
        &[BookingViolation::DatesUnavailable]
    );
    assert_eq!(err.status_code(), 400);
}

#[tokio::test]
async fn test_back_to_back_booking_accepted() {
    let (ctx, _) = context();
    let host = Uuid::new_v4();
    let listing_id = seeded_listing(&ctx, host).await;
    let service = BookingService::new(&ctx);

    service
        .create_booking(
            Uuid::new_v4(),
            booking_request(listing_id, "2024-06-01", "2024-06-05", 2),
        )
        .await
        .unwrap();

    let adjacent = service
        .create_booking(
            Uuid::new_v4(),
            booking_request(listing_id, "2024-06-05", "2024-06-08", 2),
        )
        .await
        .unwrap();

    assert_eq!(adjacent.total_price, dec!(300.00));
}

#[tokio::test]
async fn test_host_cannot_book_own_listing() {
    let (ctx, _) = context();
    let host = Uuid::new_v4();
    let listing_id = seeded_listing(&ctx, host).await;

    let err = BookingService::new(&ctx)
        .create_booking(host, booking_request(listing_id, "2024-06-01", "2024-06-05", 2))
        .await
        .unwrap_err();

    assert_eq!(err.violations().unwrap(), &[BookingViolation::OwnListing]);
}

#[tokio::test]
async fn test_violations_are_reported_together() {
    let (ctx, _) = context();
    let host = Uuid::new_v4();
    let listing_id = seeded_listing(&ctx, host).await;

    let err = BookingService::new(&ctx)
        .create_booking(
            Uuid::new_v4(),
            booking_request(listing_id, "2024-06-05", "2024-06-01", 9),
        )
        .await
        .unwrap_err();

    assert_eq!(
        err.violations().unwrap(),
        &[
            BookingViolation::DatesOutOfOrder,
            BookingViolation::CapacityExceeded {
                requested: 9,
                allowed: 4
            },
        ]
    );
}

#[tokio::test]
async fn test_losing_the_commit_race_looks_like_a_rejection() {
    let store = Arc::new(Store::default());
    let ctx = ServiceContext::new(
        Arc::new(MemListings(store.clone())),
        Arc::new(RacingBookings),
        Arc::new(MemReviews(store)),
        AdmissionPolicy::default(),
    );
    let host = Uuid::new_v4();
    let listing_id = seeded_listing(&ctx, host).await;

    // The snapshot is clean, but the repository's atomic re-check fires;
    // the caller sees the same rejection shape as a visible conflict
    let err = BookingService::new(&ctx)
        .create_booking(
            Uuid::new_v4(),
            booking_request(listing_id, "2024-06-01", "2024-06-05", 2),
        )
        .await
        .unwrap_err();

    assert_eq!(
        err.violations().unwrap(),
        &[BookingViolation::DatesUnavailable]
    );
    assert_eq!(err.status_code(), 400);
}

#[tokio::test]
async fn test_unavailable_listing_rejected() {
    let (ctx, store) = context();
    let host = Uuid::new_v4();
    let listing_id = seeded_listing(&ctx, host).await;
    store
        .listings
        .lock()
        .unwrap()
        .get_mut(&listing_id)
        .unwrap()
        .available = false;

    let err = BookingService::new(&ctx)
        .create_booking(
            Uuid::new_v4(),
            booking_request(listing_id, "2024-06-01", "2024-06-05", 2),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, ServiceError::Validation(ref msg) if msg == "Invalid listing selected."));
}

// ============================================================================
// Lifecycle transitions
// ============================================================================

#[tokio::test]
async fn test_host_confirms_pending_booking() {
    let (ctx, _) = context();
    let host = Uuid::new_v4();
    let guest = Uuid::new_v4();
    let listing_id = seeded_listing(&ctx, host).await;
    let service = BookingService::new(&ctx);

    let booking = service
        .create_booking(guest, booking_request(listing_id, "2024-06-01", "2024-06-05", 2))
        .await
        .unwrap();

    let confirmed = service.confirm_booking(booking.id, host).await.unwrap();
    assert_eq!(confirmed.status, "confirmed");

    let err = service.confirm_booking(booking.id, host).await.unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Domain(DomainError::BookingNotPending(BookingStatus::Confirmed))
    ));
    assert_eq!(err.status_code(), 409);
}

#[tokio::test]
async fn test_only_host_may_confirm() {
    let (ctx, _) = context();
    let host = Uuid::new_v4();
    let guest = Uuid::new_v4();
    let listing_id = seeded_listing(&ctx, host).await;
    let service = BookingService::new(&ctx);

    let booking = service
        .create_booking(guest, booking_request(listing_id, "2024-06-01", "2024-06-05", 2))
        .await
        .unwrap();

    let err = service.confirm_booking(booking.id, guest).await.unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Domain(DomainError::NotListingHost)
    ));
    assert_eq!(err.status_code(), 403);
}

#[tokio::test]
async fn test_cancel_frees_the_dates() {
    let (ctx, _) = context();
    let host = Uuid::new_v4();
    let guest = Uuid::new_v4();
    let listing_id = seeded_listing(&ctx, host).await;
    let service = BookingService::new(&ctx);

    let booking = service
        .create_booking(guest, booking_request(listing_id, "2024-06-01", "2024-06-05", 2))
        .await
        .unwrap();
    service.cancel_booking(booking.id, guest).await.unwrap();

    // Same dates are admissible again once the first booking is cancelled
    service
        .create_booking(
            Uuid::new_v4(),
            booking_request(listing_id, "2024-06-01", "2024-06-05", 2),
        )
        .await
        .unwrap();
}

#[tokio::test]
async fn test_cancel_twice_rejected() {
    let (ctx, _) = context();
    let host = Uuid::new_v4();
    let guest = Uuid::new_v4();
    let listing_id = seeded_listing(&ctx, host).await;
    let service = BookingService::new(&ctx);

    let booking = service
        .create_booking(guest, booking_request(listing_id, "2024-06-01", "2024-06-05", 2))
        .await
        .unwrap();
    service.cancel_booking(booking.id, guest).await.unwrap();

    let err = service.cancel_booking(booking.id, guest).await.unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Domain(DomainError::BookingAlreadyCancelled)
    ));
    assert_eq!(err.status_code(), 409);
}

#[tokio::test]
async fn test_update_reprices_and_revalidates() {
    let (ctx, _) = context();
    let host = Uuid::new_v4();
    let guest = Uuid::new_v4();
    let listing_id = seeded_listing(&ctx, host).await;
    let service = BookingService::new(&ctx);

    let booking = service
        .create_booking(guest, booking_request(listing_id, "2024-06-01", "2024-06-05", 2))
        .await
        .unwrap();

    // Shrinking the stay over its own old window is fine
    let updated = service
        .update_booking(
            booking.id,
            guest,
            UpdateBookingRequest {
                check_out_date: Some("2024-06-03".parse().unwrap()),
                ..UpdateBookingRequest::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.nights, 2);
    assert_eq!(updated.total_price, dec!(200.00));

    // But not over somebody else's booking
    service
        .create_booking(
            Uuid::new_v4(),
            booking_request(listing_id, "2024-06-10", "2024-06-12", 2),
        )
        .await
        .unwrap();
    let err = service
        .update_booking(
            booking.id,
            guest,
            UpdateBookingRequest {
                check_in_date: Some("2024-06-09".parse().unwrap()),
                check_out_date: Some("2024-06-11".parse().unwrap()),
                ..UpdateBookingRequest::default()
            },
        )
        .await
        .unwrap_err();
    assert_eq!(
        err.violations().unwrap(),
        &[BookingViolation::DatesUnavailable]
    );
}

#[tokio::test]
async fn test_update_without_date_change_keeps_total() {
    let (ctx, store) = context();
    let host = Uuid::new_v4();
    let guest = Uuid::new_v4();
    let listing_id = seeded_listing(&ctx, host).await;
    let service = BookingService::new(&ctx);

    let booking = service
        .create_booking(guest, booking_request(listing_id, "2024-06-01", "2024-06-05", 2))
        .await
        .unwrap();
    assert_eq!(booking.total_price, dec!(400.00));

    // The host raises the rate after admission
    store
        .listings
        .lock()
        .unwrap()
        .get_mut(&listing_id)
        .unwrap()
        .price_per_night = dec!(250.00);

    // An update that leaves the dates alone keeps the admitted total
    let updated = service
        .update_booking(
            booking.id,
            guest,
            UpdateBookingRequest {
                special_requests: Some("Late check-in".to_string()),
                ..UpdateBookingRequest::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.total_price, dec!(400.00));
    assert_eq!(updated.special_requests.as_deref(), Some("Late check-in"));

    // Changing the dates reprices at the current rate
    let repriced = service
        .update_booking(
            booking.id,
            guest,
            UpdateBookingRequest {
                check_out_date: Some("2024-06-03".parse().unwrap()),
                ..UpdateBookingRequest::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(repriced.nights, 2);
    assert_eq!(repriced.total_price, dec!(500.00));
}

#[tokio::test]
async fn test_confirmed_booking_stays_editable() {
    let (ctx, _) = context();
    let host = Uuid::new_v4();
    let guest = Uuid::new_v4();
    let listing_id = seeded_listing(&ctx, host).await;
    let service = BookingService::new(&ctx);

    let booking = service
        .create_booking(guest, booking_request(listing_id, "2024-06-01", "2024-06-05", 2))
        .await
        .unwrap();
    service.confirm_booking(booking.id, host).await.unwrap();

    // A confirmed stay may still be changed; the change is re-admitted
    let updated = service
        .update_booking(
            booking.id,
            guest,
            UpdateBookingRequest {
                check_out_date: Some("2024-06-07".parse().unwrap()),
                number_of_guests: Some(3),
                ..UpdateBookingRequest::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.status, "confirmed");
    assert_eq!(updated.nights, 6);
    assert_eq!(updated.total_price, dec!(600.00));
}

#[tokio::test]
async fn test_update_frozen_after_cancellation() {
    let (ctx, _) = context();
    let host = Uuid::new_v4();
    let guest = Uuid::new_v4();
    let listing_id = seeded_listing(&ctx, host).await;
    let service = BookingService::new(&ctx);

    let booking = service
        .create_booking(guest, booking_request(listing_id, "2024-06-01", "2024-06-05", 2))
        .await
        .unwrap();
    service.cancel_booking(booking.id, guest).await.unwrap();

    let err = service
        .update_booking(
            booking.id,
            guest,
            UpdateBookingRequest {
                number_of_guests: Some(3),
                ..UpdateBookingRequest::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Domain(DomainError::BookingNotEditable(BookingStatus::Cancelled))
    ));
    assert_eq!(err.status_code(), 409);
}

// ============================================================================
// Availability queries
// ============================================================================

#[tokio::test]
async fn test_available_listings_exclude_booked_dates() {
    let (ctx, _) = context();
    let host = Uuid::new_v4();
    let listing_id = seeded_listing(&ctx, host).await;
    let listings = ListingService::new(&ctx);

    BookingService::new(&ctx)
        .create_booking(
            Uuid::new_v4(),
            booking_request(listing_id, "2024-06-01", "2024-06-05", 2),
        )
        .await
        .unwrap();

    let over_booked = listings
        .available_listings("2024-06-03".parse().unwrap(), "2024-06-06".parse().unwrap())
        .await
        .unwrap();
    assert!(over_booked.is_empty());

    let clear = listings
        .available_listings("2024-06-05".parse().unwrap(), "2024-06-08".parse().unwrap())
        .await
        .unwrap();
    assert_eq!(clear.len(), 1);

    assert!(!listings
        .is_available(
            listing_id,
            "2024-06-04".parse().unwrap(),
            "2024-06-06".parse().unwrap()
        )
        .await
        .unwrap());
    assert!(listings
        .is_available(
            listing_id,
            "2024-06-05".parse().unwrap(),
            "2024-06-08".parse().unwrap()
        )
        .await
        .unwrap());
}

#[tokio::test]
async fn test_availability_query_rejects_unordered_dates() {
    let (ctx, _) = context();
    let err = ListingService::new(&ctx)
        .available_listings("2024-06-05".parse().unwrap(), "2024-06-01".parse().unwrap())
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Domain(DomainError::InvalidStayWindow)
    ));
}

// ============================================================================
// Reviews
// ============================================================================

#[tokio::test]
async fn test_review_requires_completed_stay() {
    let (ctx, store) = context();
    let host = Uuid::new_v4();
    let guest = Uuid::new_v4();
    let listing_id = seeded_listing(&ctx, host).await;

    let booking = BookingService::new(&ctx)
        .create_booking(guest, booking_request(listing_id, "2024-06-01", "2024-06-05", 2))
        .await
        .unwrap();
    let reviews = ReviewService::new(&ctx);

    let request = CreateReviewRequest {
        booking_id: booking.id,
        rating: 5,
        comment: "Great stay".to_string(),
    };

    let err = reviews.create_review(guest, request.clone()).await.unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Domain(DomainError::BookingNotCompleted)
    ));

    // Completion is driven outside the booking lifecycle
    store
        .bookings
        .lock()
        .unwrap()
        .get_mut(&booking.id)
        .unwrap()
        .status = BookingStatus::Completed;

    let review = reviews.create_review(guest, request.clone()).await.unwrap();
    assert_eq!(review.rating, 5);

    let err = reviews.create_review(guest, request).await.unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Domain(DomainError::ReviewAlreadyExists)
    ));

    let listed = reviews.reviews_for_listing(listing_id).await.unwrap();
    assert_eq!(listed.len(), 1);
}

#[tokio::test]
async fn test_only_the_guest_may_review() {
    let (ctx, store) = context();
    let host = Uuid::new_v4();
    let guest = Uuid::new_v4();
    let listing_id = seeded_listing(&ctx, host).await;

    let booking = BookingService::new(&ctx)
        .create_booking(guest, booking_request(listing_id, "2024-06-01", "2024-06-05", 2))
        .await
        .unwrap();
    store
        .bookings
        .lock()
        .unwrap()
        .get_mut(&booking.id)
        .unwrap()
        .status = BookingStatus::Completed;

    let err = ReviewService::new(&ctx)
        .create_review(
            Uuid::new_v4(),
            CreateReviewRequest {
                booking_id: booking.id,
                rating: 4,
                comment: String::new(),
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Domain(DomainError::NotBookingGuest)
    ));
}
