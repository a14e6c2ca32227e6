use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::fmt;

use crate::models::BatteryProperty;

/// Errors raised while pricing a pickup.
///
/// A quote is either priced in full or not at all, so any of these aborts the
/// whole pickup.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum QuoteError {
    #[error("Pricing configuration has no weight for battery property '{0}'")]
    MissingWeight(BatteryProperty),

    #[error("Weight {weight} for battery property '{property}' must be a finite, non-negative number")]
    InvalidWeight { property: BatteryProperty, weight: f64 },

    #[error("Battery property weights must sum to a positive, finite number, got {0}")]
    NonPositiveWeightSum(f64),

    #[error("No score entry for {property} value '{value}'")]
    UnscoredValue {
        property: BatteryProperty,
        value: String,
    },

    #[error("Pricing configuration has no cost per kWh for chemistry '{0}'")]
    MissingChemistryCost(String),

    #[error("Could not parse purchase date '{0}'")]
    InvalidPurchaseDate(String),
}

impl QuoteError {
    /// Configuration errors are the operator's fault, the rest come from the battery data
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            Self::MissingWeight(_) | Self::InvalidWeight { .. } | Self::NonPositiveWeightSum(_)
        )
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::MissingWeight(_) | Self::InvalidWeight { .. } | Self::NonPositiveWeightSum(_) => {
                "configuration"
            }
            Self::UnscoredValue { .. } | Self::MissingChemistryCost(_) => "lookup",
            Self::InvalidPurchaseDate(_) => "date_parse",
        }
    }
}

/// Application error types
#[derive(Debug)]
pub enum AppError {
    /// Configuration error
    ConfigError(String),
    /// Entity does not exist (or was soft deleted)
    NotFound(String),
    /// Entity with the requested id already exists
    Conflict(String),
    /// Request body failed validation
    Validation(String),
    /// Pickup could not be priced
    Pricing(QuoteError),
    /// Internal server error
    InternalError(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            Self::NotFound(msg) => write!(f, "Not found: {}", msg),
            Self::Conflict(msg) => write!(f, "Conflict: {}", msg),
            Self::Validation(msg) => write!(f, "Validation error: {}", msg),
            Self::Pricing(err) => write!(f, "Pricing error: {}", err),
            Self::InternalError(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Pricing(err) => Some(err),
            _ => None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            Self::ConfigError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            Self::Conflict(msg) => (StatusCode::CONFLICT, msg.clone()),
            Self::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            Self::Pricing(err) if err.is_configuration_error() => {
                (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
            }
            Self::Pricing(err) => (StatusCode::UNPROCESSABLE_ENTITY, err.to_string()),
            Self::InternalError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
        };

        let body = Json(json!({
            "error": {
                "message": error_message,
                "type": error_type_name(&self),
            }
        }));

        (status, body).into_response()
    }
}

fn error_type_name(error: &AppError) -> &'static str {
    match error {
        AppError::ConfigError(_) => "config_error",
        AppError::NotFound(_) => "not_found",
        AppError::Conflict(_) => "conflict",
        AppError::Validation(_) => "validation_error",
        AppError::Pricing(_) => "pricing_error",
        AppError::InternalError(_) => "internal_error",
    }
}

impl From<QuoteError> for AppError {
    fn from(err: QuoteError) -> Self {
        Self::Pricing(err)
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        Self::InternalError(err.to_string())
    }
}

impl From<axum::extract::rejection::JsonRejection> for AppError {
    fn from(rejection: axum::extract::rejection::JsonRejection) -> Self {
        Self::Validation(rejection.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = AppError::NotFound("Pickup id not found".to_string());
        assert_eq!(error.to_string(), "Not found: Pickup id not found");
    }

    #[test]
    fn test_error_type_name() {
        assert_eq!(error_type_name(&AppError::Conflict("test".to_string())), "conflict");
        assert_eq!(
            error_type_name(&AppError::Pricing(QuoteError::InvalidPurchaseDate("x".to_string()))),
            "pricing_error"
        );
    }

    #[test]
    fn test_quote_error_kinds() {
        assert_eq!(QuoteError::MissingWeight(BatteryProperty::Chemistry).kind(), "configuration");
        assert_eq!(QuoteError::MissingChemistryCost("NiCd".to_string()).kind(), "lookup");
        assert_eq!(QuoteError::InvalidPurchaseDate("soon".to_string()).kind(), "date_parse");
    }

    #[tokio::test]
    async fn test_error_response() {
        let error = AppError::Conflict("User with that id already exists".to_string());
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_pricing_error_status_depends_on_cause() {
        let lookup = AppError::Pricing(QuoteError::MissingChemistryCost("NiCd".to_string()));
        assert_eq!(lookup.into_response().status(), StatusCode::UNPROCESSABLE_ENTITY);

        let config = AppError::Pricing(QuoteError::NonPositiveWeightSum(0.0));
        assert_eq!(config.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
