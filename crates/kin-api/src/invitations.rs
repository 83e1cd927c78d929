//! Handlers for `/invitations` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/invitations` | `?user_id` required; newest first |
//! | `POST` | `/invitations` | Body: [`CreateBody`]; 201 + invitation, 400 on bad input |
//! | `POST` | `/invitations/:id/resolve` | Body: [`ResolveBody`]; 404 if unknown |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use kin_core::{
  invitation::{Invitation, InvitationOutcome, validate_contact_email},
  relation::RelationKind,
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

/// `GET /invitations?user_id=<id>`
pub async fn list<S>(
  State(store): State<Arc<S>>,
  Query(params): Query<ListParams>,
) -> Result<Json<Vec<Invitation>>, ApiError>
where
  S: FamilyStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let invitations = store
    .list_invitations(params.user_id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(invitations))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// JSON body accepted by `POST /invitations`.
/// Shape matches the outbound creation record of the client boundary:
/// `{"user_id": ..., "contact": "dad@example.com", "relation": "father"}`.
#[derive(Debug, Deserialize)]
pub struct CreateBody {
  pub user_id:  Uuid,
  pub contact:  String,
  pub relation: String,
}

/// `POST /invitations` — returns 201 + the stored invitation.
pub async fn create<S>(
  State(store): State<Arc<S>>,
  Json(body): Json<CreateBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: FamilyStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  // Validate up front so malformed input surfaces as 400, not a store error.
  let relation: RelationKind = body.relation.parse()?;
  validate_contact_email(&body.contact)?;

  let invitation = store
    .create_invitation(body.user_id, &body.contact, relation)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok((StatusCode::CREATED, Json(invitation)))
}

// ─── Resolve ──────────────────────────────────────────────────────────────────

/// JSON body accepted by `POST /invitations/:id/resolve`.
#[derive(Debug, Deserialize)]
pub struct ResolveBody {
  pub user_id: Uuid,
  pub status:  InvitationOutcome,
}

/// `POST /invitations/:id/resolve` — records the outcome reported by the
/// external channel for a sent invitation.
pub async fn resolve<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
  Json(body): Json<ResolveBody>,
) -> Result<Json<Invitation>, ApiError>
where
  S: FamilyStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let invitation = store
    .resolve_invitation(body.user_id, id, body.status)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?
    .ok_or_else(|| ApiError::NotFound(format!("invitation {id} not found")))?;
  Ok(Json(invitation))
}
