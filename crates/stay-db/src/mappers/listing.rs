//! Listing entity <-> model mapper

use rust_decimal::Decimal;
use uuid::Uuid;

use stay_core::entities::{Listing, PropertyType};
use stay_core::error::DomainError;

use crate::models::ListingModel;

/// Convert ListingModel to Listing entity
impl TryFrom<ListingModel> for Listing {
    type Error = DomainError;

    fn try_from(model: ListingModel) -> Result<Self, Self::Error> {
        let property_type: PropertyType = model
            .property_type
            .parse()
            .map_err(DomainError::DatabaseError)?;

        Ok(Listing {
            id: model.id,
            title: model.title,
            description: model.description,
            location: model.location,
            property_type,
            price_per_night: model.price_per_night,
            max_guests: model.max_guests,
            bedrooms: model.bedrooms,
            bathrooms: model.bathrooms,
            amenities: model.amenities,
            available: model.available,
            host_id: model.host_id,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}

/// Listing entity reference prepared for database insertion/update
pub struct ListingInsert<'a> {
    pub id: Uuid,
    pub title: &'a str,
    pub description: &'a str,
    pub location: &'a str,
    pub property_type: &'static str,
    pub price_per_night: Decimal,
    pub max_guests: i32,
    pub bedrooms: i32,
    pub bathrooms: i32,
    pub amenities: &'a str,
    pub available: bool,
    pub host_id: Uuid,
}

impl<'a> ListingInsert<'a> {
    pub fn new(listing: &'a Listing) -> Self {
        Self {
            id: listing.id,
            title: &listing.title,
            description: &listing.description,
            location: &listing.location,
            property_type: listing.property_type.as_str(),
            price_per_night: listing.price_per_night,
            max_guests: listing.max_guests,
            bedrooms: listing.bedrooms,
            bathrooms: listing.bathrooms,
            amenities: &listing.amenities,
            available: listing.available,
            host_id: listing.host_id,
        }
    }
}
