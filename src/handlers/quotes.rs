use axum::{
    extract::{Path, State},
    Json,
};

use super::{find, AppState};
use crate::error::AppError;
use crate::models::Quote;

/// GET /quote/:quote_id
///
/// Quotes are generated when a pickup is created and cannot be written directly.
pub async fn get_quote(
    State(state): State<AppState>,
    Path(quote_id): Path<i64>,
) -> Result<Json<Quote>, AppError> {
    find(state.store.quotes.as_ref(), quote_id, "Quote").map(Json)
}
