use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::quote::Quote;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentMethod {
    Check,
    GiftCard,
    Cash,
    Crypto,
}

/// A seller's acceptance of a quote
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Agreement {
    pub id: i64,
    pub associated_quote_id: i64,
    pub agreed_date: String,
    pub payment_method: PaymentMethod,
    pub comments: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Body of `POST /agreement/:id`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAgreementRequest {
    pub associated_quote_id: i64,
    pub agreed_date: String,
    pub payment_method: PaymentMethod,
    #[serde(default)]
    pub comments: Option<String>,
}

impl CreateAgreementRequest {
    pub fn into_agreement(self, id: i64, now: NaiveDateTime) -> Agreement {
        Agreement {
            id,
            associated_quote_id: self.associated_quote_id,
            agreed_date: self.agreed_date,
            payment_method: self.payment_method,
            comments: self.comments,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Agreement as returned by `GET /agreement/:id`, with its quote embedded
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AgreementView {
    #[serde(flatten)]
    pub agreement: Agreement,
    pub associated_quote: Option<Quote>,
}
