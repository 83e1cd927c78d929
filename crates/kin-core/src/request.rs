//! Inbound requests — proposals awaiting the current user's decision.
//!
//! A request is created when the external channel delivers it and destroyed
//! the instant it is accepted or rejected; it never persists in both the
//! "incoming" and "decided" states.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::relation::RelationKind;

/// An inbound proposal delivered to the current user.
///
/// `request_id` is assigned by the sender's system and stable for the
/// request's lifetime; proposer metadata is immutable display data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncomingRequest {
  pub request_id:     Uuid,
  pub proposer_name:  String,
  pub proposer_email: String,
  pub relation:       RelationKind,
  pub received_at:    DateTime<Utc>,
}

/// Input to [`crate::session::FamilySession::receive`] and
/// [`crate::store::FamilyStore::deliver_request`].
/// `received_at` is always set by the store; it is not accepted from callers.
#[derive(Debug, Clone)]
pub struct NewIncomingRequest {
  pub request_id:     Uuid,
  pub proposer_name:  String,
  pub proposer_email: String,
  pub relation:       RelationKind,
}
