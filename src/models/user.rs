use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Residential or business seller. Also used for pickup address types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CustomerType {
    Residential,
    Business,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub business_name: Option<String>,
    pub address: String,
    pub customer_type: CustomerType,
    pub email: String,
    /// Cleared by DELETE; inactive users are hidden from reads
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Body of `POST /user/:id` and `PUT /user/:id`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRequest {
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub business_name: Option<String>,
    pub address: String,
    pub customer_type: CustomerType,
    pub email: String,
}

impl UserRequest {
    pub fn into_user(self, id: i64, now: NaiveDateTime) -> User {
        User {
            id,
            first_name: self.first_name,
            last_name: self.last_name,
            business_name: self.business_name,
            address: self.address,
            customer_type: self.customer_type,
            email: self.email,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    /// Overwrite the editable fields of an existing user
    pub fn apply_to(self, user: &mut User, now: NaiveDateTime) {
        user.first_name = self.first_name;
        user.last_name = self.last_name;
        user.business_name = self.business_name;
        user.address = self.address;
        user.customer_type = self.customer_type;
        user.email = self.email;
        user.updated_at = now;
    }
}
