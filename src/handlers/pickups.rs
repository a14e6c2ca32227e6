use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use tracing::{info, warn};

use super::{ensure_absent, find, now, AppState};
use crate::error::AppError;
use crate::metrics;
use crate::models::{CreatePickupRequest, Pickup, Quote};
use crate::pricing::generate_quote;

const ENTITY: &str = "Pickup";

/// GET /pickup/:pickup_id
pub async fn get_pickup(
    State(state): State<AppState>,
    Path(pickup_id): Path<i64>,
) -> Result<Json<Pickup>, AppError> {
    find(state.store.pickups.as_ref(), pickup_id, ENTITY).map(Json)
}

/// POST /pickup/:pickup_id
///
/// Prices the pickup against the latest pricing configuration and stores the
/// resulting quote. Nothing is stored if any battery fails to price.
pub async fn create_pickup(
    State(state): State<AppState>,
    Path(pickup_id): Path<i64>,
    payload: Result<Json<CreatePickupRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Pickup>), AppError> {
    ensure_absent(state.store.pickups.as_ref(), pickup_id, ENTITY)?;
    let Json(request) = payload.map_err(rejection_to_validation)?;

    let owner_is_active = state
        .store
        .users
        .get(request.owner_id)
        .is_some_and(|user| user.is_active);
    if !owner_is_active {
        return Err(AppError::Validation(format!(
            "Owner id {} does not match an active user",
            request.owner_id
        )));
    }

    let config = state.store.quote_configs.latest().ok_or_else(|| {
        AppError::ConfigError("No pricing configuration has been created".to_string())
    })?;

    let timestamp = now();
    let pickup = request.into_pickup(pickup_id, timestamp);
    let priced = generate_quote(
        &config.pricing,
        &pickup,
        state.store.quotes.next_id(),
        state.quote_validity,
        timestamp,
    )
    .map_err(|e| {
        metrics::record_pricing_error(e.kind());
        warn!(
            pickup_id,
            config_id = config.id,
            error = %e,
            "Failed to price pickup"
        );
        AppError::from(e)
    })?;

    // Keeps the priced id unless a concurrent pickup claimed it first
    let quote = state.store.quotes.insert_with_next_id(&mut |id| Quote {
        id,
        ..priced.clone()
    });
    state.store.pickups.insert(pickup_id, pickup.clone());

    metrics::record_quote(pickup.batteries.len(), quote.quote_price);
    info!(
        pickup_id,
        quote_id = quote.id,
        config_id = config.id,
        batteries = pickup.batteries.len(),
        price = quote.quote_price,
        "Created pickup and quote"
    );

    Ok((StatusCode::CREATED, Json(pickup)))
}

fn rejection_to_validation(rejection: JsonRejection) -> AppError {
    let detail = rejection.body_text();
    if detail.contains("batteries[") {
        AppError::Validation(format!(
            "One or more batteries had validation errors: {}",
            detail
        ))
    } else {
        AppError::Validation(format!("Invalid pickup request: {}", detail))
    }
}
