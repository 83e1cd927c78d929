//! Roster entries and reconciliation outcomes.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::relation::RelationKind;

/// One confirmed relationship on the dashboard.
///
/// `entry_id` is carried over from the incoming request that produced the
/// entry — the entry's identity IS the originating request's identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FamilyRosterEntry {
  pub entry_id:     Uuid,
  pub display_name: String,
  pub relation:     RelationKind,
  pub glyph:        String,
}

/// Result of reconciling one incoming request against the roster.
///
/// None of these is an error: the discard and not-found paths are silent,
/// recoverable no-ops by design.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", content = "entry", rename_all = "snake_case")]
pub enum AcceptOutcome {
  /// The request was admitted; the new roster entry is returned exactly once,
  /// on this branch only.
  Admitted(FamilyRosterEntry),
  /// The roster already holds an entry for this kind. The request is removed
  /// without touching the roster — first accepted wins, forever.
  DuplicateRelation,
  /// No request with that id exists; no state changed.
  NotFound,
}

impl AcceptOutcome {
  /// The admitted entry, if this outcome carries one.
  pub fn admitted(&self) -> Option<&FamilyRosterEntry> {
    match self {
      Self::Admitted(entry) => Some(entry),
      _ => None,
    }
  }
}
