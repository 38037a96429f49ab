//! Listing entity - a rentable property published by a host

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Kind of property a listing offers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PropertyType {
    #[default]
    Apartment,
    House,
    Condo,
    Villa,
    Cabin,
    Loft,
    Townhouse,
    Other,
}

impl PropertyType {
    /// Stable lowercase label used in storage and API payloads
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Apartment => "apartment",
            Self::House => "house",
            Self::Condo => "condo",
            Self::Villa => "villa",
            Self::Cabin => "cabin",
            Self::Loft => "loft",
            Self::Townhouse => "townhouse",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PropertyType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "apartment" => Ok(Self::Apartment),
            "house" => Ok(Self::House),
            "condo" => Ok(Self::Condo),
            "villa" => Ok(Self::Villa),
            "cabin" => Ok(Self::Cabin),
            "loft" => Ok(Self::Loft),
            "townhouse" => Ok(Self::Townhouse),
            "other" => Ok(Self::Other),
            other => Err(format!("unknown property type: {other}")),
        }
    }
}

/// Listing entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Listing {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub location: String,
    pub property_type: PropertyType,
    /// Nightly price, two fractional digits, strictly positive
    pub price_per_night: Decimal,
    /// Maximum number of guests, at least 1
    pub max_guests: i32,
    pub bedrooms: i32,
    pub bathrooms: i32,
    /// Comma-separated amenity names; may be empty
    pub amenities: String,
    /// Whether the listing accepts new bookings
    pub available: bool,
    pub host_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Listing {
    /// Create a new Listing with required fields
    pub fn new(
        id: Uuid,
        title: String,
        location: String,
        price_per_night: Decimal,
        max_guests: i32,
        host_id: Uuid,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            title,
            description: String::new(),
            location,
            property_type: PropertyType::default(),
            price_per_night,
            max_guests,
            bedrooms: 1,
            bathrooms: 1,
            amenities: String::new(),
            available: true,
            host_id,
            created_at: now,
            updated_at: now,
        }
    }

    /// Check if a user is the host of this listing
    #[inline]
    pub fn is_hosted_by(&self, user_id: Uuid) -> bool {
        self.host_id == user_id
    }

    /// Amenities split into a trimmed list
    pub fn amenities_list(&self) -> Vec<&str> {
        self.amenities
            .split(',')
            .map(str::trim)
            .filter(|a| !a.is_empty())
            .collect()
    }

    /// Mark the listing as touched after a mutation
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
