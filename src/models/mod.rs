pub mod agreement;
pub mod battery;
pub mod pickup;
pub mod pricing;
pub mod quote;
pub mod user;

pub use agreement::{Agreement, AgreementView, CreateAgreementRequest, PaymentMethod};
pub use battery::{Battery, BatteryType, Chemistry, Condition};
pub use pickup::{CreatePickupRequest, Pickup};
pub use pricing::{BatteryProperty, PricingConfig, QuoteConfigRecord};
pub use quote::Quote;
pub use user::{CustomerType, User, UserRequest};
