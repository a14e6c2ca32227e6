use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::battery::Battery;
use super::user::CustomerType;

/// A seller's request to have one or more batteries collected
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pickup {
    pub id: i64,
    pub owner_id: i64,
    pub pick_up_address: String,
    pub batteries: Vec<Battery>,
    pub address_type: CustomerType,
    pub requested_pickup_date: String,
    pub comments: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Body of `POST /pickup/:id`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePickupRequest {
    pub owner_id: i64,
    pub pick_up_address: String,
    pub batteries: Vec<Battery>,
    pub address_type: CustomerType,
    pub requested_pickup_date: String,
    #[serde(default)]
    pub comments: Option<String>,
}

impl CreatePickupRequest {
    pub fn into_pickup(self, id: i64, now: NaiveDateTime) -> Pickup {
        Pickup {
            id,
            owner_id: self.owner_id,
            pick_up_address: self.pick_up_address,
            batteries: self.batteries,
            address_type: self.address_type,
            requested_pickup_date: self.requested_pickup_date,
            comments: self.comments,
            created_at: now,
            updated_at: now,
        }
    }
}
