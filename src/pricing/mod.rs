pub mod calculator;
pub mod dates;
pub mod quote;

pub use calculator::{BatteryQuote, PriceSource, QuoteCalculator};
pub use dates::parse_purchase_date;
pub use quote::generate_quote;
