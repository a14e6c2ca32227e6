use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Price offered for a pickup. Only `is_approved` changes after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub id: i64,
    pub quote_price: f64,
    pub quote_issued_date: NaiveDateTime,
    pub quote_expiry_date: NaiveDateTime,
    pub seller_id: i64,
    pub associated_pickup_id: i64,
    pub is_approved: bool,
}
