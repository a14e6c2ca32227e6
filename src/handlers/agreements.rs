use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use tracing::info;

use super::{ensure_absent, find, now, AppState};
use crate::error::AppError;
use crate::metrics;
use crate::models::{Agreement, AgreementView, CreateAgreementRequest};

const ENTITY: &str = "Agreement";

/// GET /agreement/:agreement_id
pub async fn get_agreement(
    State(state): State<AppState>,
    Path(agreement_id): Path<i64>,
) -> Result<Json<AgreementView>, AppError> {
    let agreement = find(state.store.agreements.as_ref(), agreement_id, ENTITY)?;
    let associated_quote = state.store.quotes.get(agreement.associated_quote_id);

    Ok(Json(AgreementView {
        agreement,
        associated_quote,
    }))
}

/// POST /agreement/:agreement_id
///
/// Accepting a quote marks it approved.
pub async fn create_agreement(
    State(state): State<AppState>,
    Path(agreement_id): Path<i64>,
    payload: Result<Json<CreateAgreementRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Agreement>), AppError> {
    ensure_absent(state.store.agreements.as_ref(), agreement_id, ENTITY)?;
    let Json(request) = payload?;

    let quote_id = request.associated_quote_id;
    if !state.store.quotes.exists(quote_id) {
        return Err(AppError::NotFound("Quote id not found".to_string()));
    }

    let agreement = request.into_agreement(agreement_id, now());
    state.store.agreements.insert(agreement_id, agreement.clone());
    state
        .store
        .quotes
        .update(quote_id, &mut |quote| quote.is_approved = true);

    metrics::record_agreement();
    info!(
        agreement_id,
        quote_id,
        payment_method = ?agreement.payment_method,
        "Quote accepted"
    );

    Ok((StatusCode::CREATED, Json(agreement)))
}
