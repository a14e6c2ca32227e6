use chrono::{Duration, NaiveDateTime};

use crate::error::QuoteError;
use crate::models::{Pickup, PricingConfig, Quote};
use crate::pricing::calculator::QuoteCalculator;

/// Build the quote issued when a pickup is created.
///
/// The quote is valid from `now` for `validity` and starts unapproved.
pub fn generate_quote(
    pricing: &PricingConfig,
    pickup: &Pickup,
    quote_id: i64,
    validity: Duration,
    now: NaiveDateTime,
) -> Result<Quote, QuoteError> {
    let calculator = QuoteCalculator::with_reference_time(pricing, now)?;
    let quote_price = calculator.final_quote_price(pickup)?;

    Ok(Quote {
        id: quote_id,
        quote_price,
        quote_issued_date: now,
        quote_expiry_date: now + validity,
        seller_id: pickup.owner_id,
        associated_pickup_id: pickup.id,
        is_approved: false,
    })
}
