//! Outbound invitations — requests the current user has sent.
//!
//! An invitation is created Pending and resolved at most once by an outcome
//! delivered from the external notification channel. Invitations are never
//! deleted; resolved ones remain as a historical record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Error, Result, relation::RelationKind};

// ─── Status ──────────────────────────────────────────────────────────────────

/// Lifecycle status of a sent invitation.
///
/// Transitions are one-way: Pending→Accepted or Pending→Rejected. No
/// transition leaves a resolved state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvitationStatus {
  Pending,
  Accepted,
  Rejected,
}

impl InvitationStatus {
  pub fn is_pending(&self) -> bool { matches!(self, Self::Pending) }
}

/// The outcome reported back by the external channel for a sent invitation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvitationOutcome {
  Accepted,
  Rejected,
}

// ─── Invitation ──────────────────────────────────────────────────────────────

/// An outbound request the current user has sent.
///
/// `invitation_id` and `created_at` are assigned at creation and immutable;
/// only `status` ever changes, and only once.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Invitation {
  pub invitation_id: Uuid,
  pub contact_email: String,
  pub relation:      RelationKind,
  pub status:        InvitationStatus,
  pub created_at:    DateTime<Utc>,
}

impl Invitation {
  /// Apply an externally delivered outcome.
  ///
  /// Returns an error if the invitation has already been resolved.
  pub fn resolve(&mut self, outcome: InvitationOutcome) -> Result<()> {
    if !self.status.is_pending() {
      return Err(Error::InvitationAlreadyResolved(self.invitation_id));
    }
    self.status = match outcome {
      InvitationOutcome::Accepted => InvitationStatus::Accepted,
      InvitationOutcome::Rejected => InvitationStatus::Rejected,
    };
    Ok(())
  }
}

// ─── Email validation ────────────────────────────────────────────────────────

/// Syntactic check applied before an invitation may be created: after
/// trimming, the address must contain no whitespace, exactly one `@`, a
/// non-empty local part, and a domain containing a dot.
///
/// Returns the trimmed address for storage.
pub fn validate_contact_email(raw: &str) -> Result<&str> {
  let email = raw.trim();

  let invalid = || Error::InvalidEmail(email.to_owned());

  if email.is_empty() || email.chars().any(char::is_whitespace) {
    return Err(invalid());
  }

  let mut parts = email.split('@');
  match (parts.next(), parts.next(), parts.next()) {
    (Some(local), Some(domain), None)
      if !local.is_empty() && domain.contains('.') =>
    {
      Ok(email)
    }
    _ => Err(invalid()),
  }
}
