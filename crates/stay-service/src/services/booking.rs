//! Booking service
//!
//! Orchestrates booking admission, pricing, and lifecycle transitions.
//! Admission is evaluated against a snapshot of the listing's active
//! bookings; the repository re-checks the overlap atomically at commit
//! time, so a concurrent admission that slips past the snapshot still
//! fails with the date-conflict error.

use tracing::{info, instrument};
use uuid::Uuid;
use validator::Validate;

use stay_core::entities::Booking;
use stay_core::error::DomainError;
use stay_core::policy::{BookingCandidate, BookingViolation, Quote};
use stay_core::value_objects::StayWindow;

use crate::dto::{BookingResponse, CreateBookingRequest, UpdateBookingRequest};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::listing::ListingService;

/// Booking service
pub struct BookingService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> BookingService<'a> {
    /// Create a new BookingService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Admit and persist a new booking for a guest
    #[instrument(skip(self, request))]
    pub async fn create_booking(
        &self,
        guest_id: Uuid,
        request: CreateBookingRequest,
    ) -> ServiceResult<BookingResponse> {
        request.validate()?;

        let listing = self
            .ctx
            .listing_repo()
            .find_by_id(request.listing_id)
            .await?
            .filter(|l| l.available)
            .ok_or_else(|| ServiceError::validation("Invalid listing selected."))?;

        let window = StayWindow::new(request.check_in_date, request.check_out_date);
        let candidate = BookingCandidate {
            guest_id,
            window,
            number_of_guests: request.number_of_guests,
        };

        let active = self
            .ctx
            .booking_repo()
            .active_windows(listing.id, None)
            .await?;
        self.ctx
            .admission_policy()
            .validate(&candidate, &listing, &active)?;

        let quote = Quote::for_stay(listing.price_per_night, &window);
        let booking = Booking::new_pending(
            Uuid::new_v4(),
            listing.id,
            guest_id,
            window,
            request.number_of_guests,
            quote.total,
            request.special_requests.unwrap_or_default(),
        );

        self.ctx
            .booking_repo()
            .create(&booking)
            .await
            .map_err(admission_conflict)?;

        info!(
            booking_id = %booking.id,
            listing_id = %listing.id,
            nights = quote.nights,
            "Booking created"
        );

        Ok(BookingResponse::from(&booking))
    }

    /// Change the dates, guest count, or special requests of an active
    /// (pending or confirmed) booking; the changed stay is re-admitted in
    /// full. Cancelled and completed bookings are frozen.
    #[instrument(skip(self, request))]
    pub async fn update_booking(
        &self,
        booking_id: Uuid,
        user_id: Uuid,
        request: UpdateBookingRequest,
    ) -> ServiceResult<BookingResponse> {
        request.validate()?;

        let mut booking = self.get_booking_entity(booking_id).await?;
        if !booking.is_booked_by(user_id) {
            return Err(DomainError::NotBookingGuest.into());
        }
        if !booking.status.is_active() {
            return Err(DomainError::BookingNotEditable(booking.status).into());
        }

        let listing = ListingService::new(self.ctx)
            .get_listing_entity(booking.listing_id)
            .await?;
        let original_window = booking.window();

        if let Some(check_in) = request.check_in_date {
            booking.check_in_date = check_in;
        }
        if let Some(check_out) = request.check_out_date {
            booking.check_out_date = check_out;
        }
        if let Some(guests) = request.number_of_guests {
            booking.number_of_guests = guests;
        }
        if let Some(special_requests) = request.special_requests {
            booking.special_requests = special_requests;
        }

        // Re-admit the changed stay, ignoring the booking's own window
        let candidate = BookingCandidate {
            guest_id: booking.guest_id,
            window: booking.window(),
            number_of_guests: booking.number_of_guests,
        };
        let active = self
            .ctx
            .booking_repo()
            .active_windows(listing.id, Some(booking.id))
            .await?;
        self.ctx
            .admission_policy()
            .validate(&candidate, &listing, &active)?;

        // The stored total is a snapshot of the rate at admission time;
        // only a date change reprices the stay.
        if booking.window() != original_window {
            let quote = Quote::for_stay(listing.price_per_night, &booking.window());
            booking.total_price = quote.total;
        }
        booking.updated_at = chrono::Utc::now();

        self.ctx
            .booking_repo()
            .update(&booking)
            .await
            .map_err(admission_conflict)?;

        info!(booking_id = %booking.id, "Booking updated");

        Ok(BookingResponse::from(&booking))
    }

    /// Confirm a pending booking; only the listing's host may do so
    #[instrument(skip(self))]
    pub async fn confirm_booking(
        &self,
        booking_id: Uuid,
        user_id: Uuid,
    ) -> ServiceResult<BookingResponse> {
        let mut booking = self.get_booking_entity(booking_id).await?;
        let listing = ListingService::new(self.ctx)
            .get_listing_entity(booking.listing_id)
            .await?;
        if !listing.is_hosted_by(user_id) {
            return Err(DomainError::NotListingHost.into());
        }

        booking.confirm()?;
        self.ctx
            .booking_repo()
            .update_status(booking.id, booking.status)
            .await?;

        info!(booking_id = %booking.id, "Booking confirmed");

        Ok(BookingResponse::from(&booking))
    }

    /// Cancel an active booking; the guest or the listing's host may do so
    #[instrument(skip(self))]
    pub async fn cancel_booking(
        &self,
        booking_id: Uuid,
        user_id: Uuid,
    ) -> ServiceResult<BookingResponse> {
        let mut booking = self.get_booking_entity(booking_id).await?;
        if !booking.is_booked_by(user_id) {
            let listing = ListingService::new(self.ctx)
                .get_listing_entity(booking.listing_id)
                .await?;
            if !listing.is_hosted_by(user_id) {
                return Err(DomainError::NotBookingGuest.into());
            }
        }

        booking.cancel()?;
        self.ctx
            .booking_repo()
            .update_status(booking.id, booking.status)
            .await?;

        info!(booking_id = %booking.id, "Booking cancelled");

        Ok(BookingResponse::from(&booking))
    }

    /// Get a booking visible to its guest or the listing's host
    #[instrument(skip(self))]
    pub async fn get_booking(
        &self,
        booking_id: Uuid,
        user_id: Uuid,
    ) -> ServiceResult<BookingResponse> {
        let booking = self.get_booking_entity(booking_id).await?;
        if !booking.is_booked_by(user_id) {
            let listing = ListingService::new(self.ctx)
                .get_listing_entity(booking.listing_id)
                .await?;
            if !listing.is_hosted_by(user_id) {
                return Err(DomainError::NotBookingGuest.into());
            }
        }

        Ok(BookingResponse::from(&booking))
    }

    /// List a guest's bookings, newest first
    #[instrument(skip(self))]
    pub async fn bookings_for_guest(&self, guest_id: Uuid) -> ServiceResult<Vec<BookingResponse>> {
        let bookings = self.ctx.booking_repo().find_by_guest(guest_id).await?;
        Ok(bookings.iter().map(BookingResponse::from).collect())
    }

    /// List a listing's bookings; only its host may see them
    #[instrument(skip(self))]
    pub async fn bookings_for_listing(
        &self,
        listing_id: Uuid,
        user_id: Uuid,
    ) -> ServiceResult<Vec<BookingResponse>> {
        let listing = ListingService::new(self.ctx)
            .get_listing_entity(listing_id)
            .await?;
        if !listing.is_hosted_by(user_id) {
            return Err(DomainError::NotListingHost.into());
        }

        let bookings = self.ctx.booking_repo().find_by_listing(listing_id).await?;
        Ok(bookings.iter().map(BookingResponse::from).collect())
    }

    /// Get booking entity by ID
    pub(super) async fn get_booking_entity(&self, booking_id: Uuid) -> ServiceResult<Booking> {
        self.ctx
            .booking_repo()
            .find_by_id(booking_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Booking", booking_id.to_string()))
    }
}

/// A date conflict surfaced by the repository's atomic re-check is the
/// same admission failure as one seen in the snapshot, so a caller who
/// loses the race gets the same rejection shape as one whose conflict was
/// visible up front.
fn admission_conflict(err: DomainError) -> ServiceError {
    match err {
        DomainError::DatesUnavailable => {
            ServiceError::Rejected(vec![BookingViolation::DatesUnavailable])
        }
        other => other.into(),
    }
}
