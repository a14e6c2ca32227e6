use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use tracing::info;

use super::{ensure_absent, find, now, AppState};
use crate::error::AppError;
use crate::models::{PricingConfig, QuoteConfigRecord};
use crate::pricing::QuoteCalculator;

const ENTITY: &str = "QuoteConfig";

/// GET /quoteConfig/:config_id
pub async fn get_quote_config(
    State(state): State<AppState>,
    Path(config_id): Path<i64>,
) -> Result<Json<QuoteConfigRecord>, AppError> {
    find(state.store.quote_configs.as_ref(), config_id, ENTITY).map(Json)
}

/// POST /quoteConfig/:config_id
///
/// The new configuration prices every later pickup if its id is the highest.
pub async fn create_quote_config(
    State(state): State<AppState>,
    Path(config_id): Path<i64>,
    payload: Result<Json<PricingConfig>, JsonRejection>,
) -> Result<(StatusCode, Json<QuoteConfigRecord>), AppError> {
    ensure_absent(state.store.quote_configs.as_ref(), config_id, ENTITY)?;
    let Json(pricing) = payload?;

    // Reject configurations the calculator would refuse later
    QuoteCalculator::new(&pricing).map_err(|e| AppError::Validation(e.to_string()))?;

    let timestamp = now();
    let record = QuoteConfigRecord {
        id: config_id,
        pricing,
        created_at: timestamp,
        updated_at: timestamp,
    };
    state.store.quote_configs.insert(config_id, record.clone());

    info!(
        config_id,
        brands = record.pricing.model_msrps.len(),
        chemistries = record.pricing.chemistry_cost_per_kwh.len(),
        "Created pricing configuration"
    );

    Ok((StatusCode::CREATED, Json(record)))
}
