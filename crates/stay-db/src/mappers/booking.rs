//! Booking entity <-> model mapper

use chrono::NaiveDate;
use rust_decimal::Decimal;
use uuid::Uuid;

use stay_core::entities::{Booking, BookingStatus};
use stay_core::error::DomainError;
use stay_core::value_objects::StayWindow;

use crate::models::{BookingModel, StayWindowRow};

/// Convert BookingModel to Booking entity
impl TryFrom<BookingModel> for Booking {
    type Error = DomainError;

    fn try_from(model: BookingModel) -> Result<Self, Self::Error> {
        let status: BookingStatus = model.status.parse().map_err(DomainError::DatabaseError)?;

        Ok(Booking {
            id: model.id,
            listing_id: model.listing_id,
            guest_id: model.guest_id,
            check_in_date: model.check_in_date,
            check_out_date: model.check_out_date,
            number_of_guests: model.number_of_guests,
            total_price: model.total_price,
            status,
            special_requests: model.special_requests.unwrap_or_default(),
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}

impl From<StayWindowRow> for StayWindow {
    fn from(row: StayWindowRow) -> Self {
        StayWindow::new(row.check_in_date, row.check_out_date)
    }
}

/// Booking entity reference prepared for database insertion/update
pub struct BookingInsert<'a> {
    pub id: Uuid,
    pub listing_id: Uuid,
    pub guest_id: Uuid,
    pub check_in_date: NaiveDate,
    pub check_out_date: NaiveDate,
    pub number_of_guests: i32,
    pub total_price: Decimal,
    pub status: &'static str,
    pub special_requests: Option<&'a str>,
}

impl<'a> BookingInsert<'a> {
    pub fn new(booking: &'a Booking) -> Self {
        Self {
            id: booking.id,
            listing_id: booking.listing_id,
            guest_id: booking.guest_id,
            check_in_date: booking.check_in_date,
            check_out_date: booking.check_out_date,
            number_of_guests: booking.number_of_guests,
            total_price: booking.total_price,
            status: booking.status.as_str(),
            special_requests: if booking.special_requests.is_empty() {
                None
            } else {
                Some(&booking.special_requests)
            },
        }
    }
}
