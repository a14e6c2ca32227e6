//! HTTP handlers for the buy-back API
//!
//! - users: seller accounts (soft delete)
//! - pickups: pickup requests, priced on creation
//! - quotes: read-only view of generated quotes
//! - agreements: quote acceptance
//! - quote_configs: pricing configurations
//! - health: liveness, readiness and metrics

pub mod agreements;
pub mod health;
pub mod pickups;
pub mod quote_configs;
pub mod quotes;
pub mod users;

use chrono::{Local, NaiveDateTime};

use crate::error::AppError;
use crate::store::{Repository, Store};

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub store: Store,
    /// How long a generated quote stays valid
    pub quote_validity: chrono::Duration,
}

impl AppState {
    pub fn new(store: Store, quote_validity: chrono::Duration) -> Self {
        Self {
            store,
            quote_validity,
        }
    }
}

pub(crate) fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

pub(crate) fn find<T>(repo: &dyn Repository<T>, id: i64, entity: &str) -> Result<T, AppError> {
    repo.get(id)
        .ok_or_else(|| AppError::NotFound(format!("{} id not found", entity)))
}

pub(crate) fn ensure_absent<T>(
    repo: &dyn Repository<T>,
    id: i64,
    entity: &str,
) -> Result<(), AppError> {
    if repo.exists(id) {
        return Err(AppError::Conflict(format!(
            "{} with that id already exists",
            entity
        )));
    }
    Ok(())
}
