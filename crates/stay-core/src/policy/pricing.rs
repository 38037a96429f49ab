//! Price calculation - derives nights and total price from a validated
//! stay window and a listing's nightly rate

use rust_decimal::Decimal;

use crate::value_objects::StayWindow;

/// Currency precision of stored prices (two fractional digits)
const PRICE_SCALE: u32 = 2;

/// Derived pricing for a stay: night count and total price
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quote {
    pub nights: i64,
    pub total: Decimal,
}

impl Quote {
    /// Compute the quote for a stay: `total = nights x price_per_night`,
    /// in exact decimal arithmetic at the listing's price scale.
    ///
    /// Precondition: the window has passed admission, so `nights >= 1`.
    pub fn for_stay(price_per_night: Decimal, window: &StayWindow) -> Self {
        let nights = window.nights();
        let mut total = Decimal::from(nights) * price_per_night;
        total.rescale(PRICE_SCALE);
        Self { nights, total }
    }
}
