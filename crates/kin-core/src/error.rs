//! Error types for `kin-core`.
//!
//! A missing incoming request is deliberately NOT an error anywhere in this
//! crate: accepting or rejecting an unknown request id is a recoverable no-op
//! (see [`crate::roster::AcceptOutcome`]).

use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum Error {
  /// The contact address failed the syntactic email check.
  #[error("invalid contact email: {0:?}")]
  InvalidEmail(String),

  /// No relation was selected (empty or whitespace-only input).
  #[error("no relation selected")]
  MissingRelation,

  /// A non-empty relation name that is not in the catalog.
  #[error("unknown relation kind: {0:?}")]
  UnknownRelation(String),

  #[error("invitation not found: {0}")]
  InvitationNotFound(Uuid),

  #[error("invitation {0} is already resolved")]
  InvitationAlreadyResolved(Uuid),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
