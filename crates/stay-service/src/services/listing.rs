//! Listing service
//!
//! Handles listing creation, management, and availability queries.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::{info, instrument};
use uuid::Uuid;
use validator::Validate;

use stay_core::entities::{Listing, PropertyType};
use stay_core::error::DomainError;
use stay_core::value_objects::StayWindow;

use crate::dto::{
    CreateListingRequest, ListingDetailResponse, ListingResponse, UpdateListingRequest,
};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Listing service
pub struct ListingService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ListingService<'a> {
    /// Create a new ListingService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Publish a new listing for a host
    #[instrument(skip(self, request))]
    pub async fn create_listing(
        &self,
        host_id: Uuid,
        request: CreateListingRequest,
    ) -> ServiceResult<ListingResponse> {
        request.validate()?;

        if request.price_per_night <= Decimal::ZERO {
            return Err(ServiceError::validation(
                "Price per night must be greater than zero.",
            ));
        }
        let property_type = parse_property_type(request.property_type.as_deref())?;

        let mut listing = Listing::new(
            Uuid::new_v4(),
            request.title,
            request.location,
            request.price_per_night,
            request.max_guests,
            host_id,
        );
        listing.description = request.description;
        listing.property_type = property_type;
        if let Some(bedrooms) = request.bedrooms {
            listing.bedrooms = bedrooms;
        }
        if let Some(bathrooms) = request.bathrooms {
            listing.bathrooms = bathrooms;
        }
        if let Some(amenities) = request.amenities {
            listing.amenities = amenities;
        }

        self.ctx.listing_repo().create(&listing).await?;

        info!(listing_id = %listing.id, host_id = %host_id, "Listing created");

        Ok(ListingResponse::from(&listing))
    }

    /// Get a listing with its review aggregates
    #[instrument(skip(self))]
    pub async fn get_listing(&self, listing_id: Uuid) -> ServiceResult<ListingDetailResponse> {
        let listing = self.get_listing_entity(listing_id).await?;
        let reviews = self.ctx.review_repo().find_by_listing(listing_id).await?;

        Ok(ListingDetailResponse::new(&listing, &reviews))
    }

    /// Update a listing's details; only its host may do so
    #[instrument(skip(self, request))]
    pub async fn update_listing(
        &self,
        listing_id: Uuid,
        user_id: Uuid,
        request: UpdateListingRequest,
    ) -> ServiceResult<ListingResponse> {
        request.validate()?;

        let mut listing = self.get_listing_entity(listing_id).await?;
        if !listing.is_hosted_by(user_id) {
            return Err(DomainError::NotListingHost.into());
        }

        if let Some(price) = request.price_per_night {
            if price <= Decimal::ZERO {
                return Err(ServiceError::validation(
                    "Price per night must be greater than zero.",
                ));
            }
            listing.price_per_night = price;
        }
        if let Some(label) = request.property_type.as_deref() {
            listing.property_type = parse_property_type(Some(label))?;
        }
        if let Some(title) = request.title {
            listing.title = title;
        }
        if let Some(description) = request.description {
            listing.description = description;
        }
        if let Some(location) = request.location {
            listing.location = location;
        }
        if let Some(max_guests) = request.max_guests {
            listing.max_guests = max_guests;
        }
        if let Some(bedrooms) = request.bedrooms {
            listing.bedrooms = bedrooms;
        }
        if let Some(bathrooms) = request.bathrooms {
            listing.bathrooms = bathrooms;
        }
        if let Some(amenities) = request.amenities {
            listing.amenities = amenities;
        }
        if let Some(available) = request.available {
            listing.available = available;
        }
        listing.touch();

        self.ctx.listing_repo().update(&listing).await?;

        info!(listing_id = %listing.id, "Listing updated");

        Ok(ListingResponse::from(&listing))
    }

    /// Delete a listing and its dependent bookings; only its host may do so
    #[instrument(skip(self))]
    pub async fn delete_listing(&self, listing_id: Uuid, user_id: Uuid) -> ServiceResult<()> {
        let listing = self.get_listing_entity(listing_id).await?;
        if !listing.is_hosted_by(user_id) {
            return Err(DomainError::NotListingHost.into());
        }

        self.ctx.listing_repo().delete(listing_id).await?;

        info!(listing_id = %listing_id, "Listing deleted");

        Ok(())
    }

    /// List all listings owned by a host
    #[instrument(skip(self))]
    pub async fn listings_by_host(&self, host_id: Uuid) -> ServiceResult<Vec<ListingResponse>> {
        let listings = self.ctx.listing_repo().find_by_host(host_id).await?;
        Ok(listings.iter().map(ListingResponse::from).collect())
    }

    /// Search listings by location fragment (case-insensitive)
    #[instrument(skip(self))]
    pub async fn search_by_location(&self, location: &str) -> ServiceResult<Vec<ListingResponse>> {
        let fragment = location.trim();
        if fragment.is_empty() {
            return Err(ServiceError::validation("Location must not be empty."));
        }

        let listings = self.ctx.listing_repo().find_by_location(fragment).await?;
        Ok(listings.iter().map(ListingResponse::from).collect())
    }

    /// List available listings with no active booking overlapping the
    /// given dates
    #[instrument(skip(self))]
    pub async fn available_listings(
        &self,
        check_in: NaiveDate,
        check_out: NaiveDate,
    ) -> ServiceResult<Vec<ListingResponse>> {
        let window = StayWindow::new(check_in, check_out);
        if !window.is_ordered() {
            return Err(DomainError::InvalidStayWindow.into());
        }

        let listings = self.ctx.listing_repo().find_available(window).await?;
        Ok(listings.iter().map(ListingResponse::from).collect())
    }

    /// Whether one listing is free over the given dates
    #[instrument(skip(self))]
    pub async fn is_available(
        &self,
        listing_id: Uuid,
        check_in: NaiveDate,
        check_out: NaiveDate,
    ) -> ServiceResult<bool> {
        let window = StayWindow::new(check_in, check_out);
        if !window.is_ordered() {
            return Err(DomainError::InvalidStayWindow.into());
        }

        let listing = self.get_listing_entity(listing_id).await?;
        if !listing.available {
            return Ok(false);
        }

        let conflict = self
            .ctx
            .booking_repo()
            .has_active_overlap(listing_id, window, None)
            .await?;
        Ok(!conflict)
    }

    /// Get listing entity by ID
    pub(super) async fn get_listing_entity(&self, listing_id: Uuid) -> ServiceResult<Listing> {
        self.ctx
            .listing_repo()
            .find_by_id(listing_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Listing", listing_id.to_string()))
    }
}

fn parse_property_type(label: Option<&str>) -> ServiceResult<PropertyType> {
    match label {
        None => Ok(PropertyType::default()),
        Some(s) => s.parse().map_err(ServiceError::Validation),
    }
}
