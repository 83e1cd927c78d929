//! Handler for `GET /roster`.

use std::sync::Arc;

use axum::{
  Json,
  extract::{Query, State},
};
use kin_core::{roster::FamilyRosterEntry, store::FamilyStore};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct ListParams {
  pub user_id: Uuid,
}

/// `GET /roster?user_id=<id>` — confirmed entries in catalog order.
pub async fn list<S>(
  State(store): State<Arc<S>>,
  Query(params): Query<ListParams>,
) -> Result<Json<Vec<FamilyRosterEntry>>, ApiError>
where
  S: FamilyStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let entries = store
    .roster(params.user_id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(entries))
}
