//! Handlers for `/requests` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/requests` | `?user_id` required; newest first |
//! | `POST` | `/requests` | Inbound delivery from the external channel; 201 |
//! | `POST` | `/requests/:id/accept` | 200 + tagged [`AcceptOutcome`] |
//! | `POST` | `/requests/:id/reject` | 204 always |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use kin_core::{
  relation::RelationKind,
  request::{IncomingRequest, NewIncomingRequest},
  roster::AcceptOutcome,
  store::FamilyStore,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::ApiError;

// ─── List ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ListParams {
  pub user_id: Uuid,
}

/// `GET /requests?user_id=<id>`
pub async fn list<S>(
  State(store): State<Arc<S>>,
  Query(params): Query<ListParams>,
) -> Result<Json<Vec<IncomingRequest>>, ApiError>
where
  S: FamilyStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let requests = store
    .list_requests(params.user_id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(requests))
}

// ─── Deliver ──────────────────────────────────────────────────────────────────

/// JSON body accepted by `POST /requests` — the inbound delivery record:
/// `{"user_id": ..., "id": ..., "name": "...", "email": "...", "relation": "..."}`.
/// `id` comes from the external sender and must be fresh.
#[derive(Debug, Deserialize)]
pub struct DeliverBody {
  pub user_id:  Uuid,
  pub id:       Uuid,
  pub name:     String,
  pub email:    String,
  pub relation: String,
}

/// `POST /requests` — returns 201 + the stored request.
pub async fn deliver<S>(
  State(store): State<Arc<S>>,
  Json(body): Json<DeliverBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: FamilyStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let relation: RelationKind = body.relation.parse()?;

  let request = store
    .deliver_request(body.user_id, NewIncomingRequest {
      request_id:     body.id,
      proposer_name:  body.name,
      proposer_email: body.email,
      relation,
    })
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok((StatusCode::CREATED, Json(request)))
}

// ─── Decide ───────────────────────────────────────────────────────────────────

/// JSON body accepted by the accept/reject endpoints.
#[derive(Debug, Deserialize)]
pub struct DecideBody {
  pub user_id: Uuid,
}

/// `POST /requests/:id/accept` — always 200; the tagged outcome tells the
/// caller whether the request was admitted, discarded, or unknown.
pub async fn accept<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
  Json(body): Json<DecideBody>,
) -> Result<Json<AcceptOutcome>, ApiError>
where
  S: FamilyStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let outcome = store
    .accept_request(body.user_id, id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(outcome))
}

/// `POST /requests/:id/reject` — 204 whether or not the id existed.
pub async fn reject<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
  Json(body): Json<DecideBody>,
) -> Result<StatusCode, ApiError>
where
  S: FamilyStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  store
    .reject_request(body.user_id, id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(StatusCode::NO_CONTENT)
}
