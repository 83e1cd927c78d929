//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! All timestamps are stored as RFC 3339 strings. Relation kinds and
//! invitation statuses are stored as their canonical lowercase names. UUIDs
//! are stored as hyphenated lowercase strings.

use chrono::{DateTime, Utc};
use kin_core::{
  invitation::{Invitation, InvitationStatus},
  relation::RelationKind,
  request::IncomingRequest,
  roster::FamilyRosterEntry,
};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Uuid ─────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

// ─── DateTime<Utc>
// ────────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── RelationKind
// ─────────────────────────────────────────────────────────────

pub fn encode_relation(kind: RelationKind) -> &'static str {
  kind.canonical_name()
}

pub fn decode_relation(s: &str) -> Result<RelationKind> {
  Ok(s.parse::<RelationKind>().map_err(Error::Core)?)
}

// ─── InvitationStatus
// ─────────────────────────────────────────────────────────

pub fn encode_status(status: InvitationStatus) -> &'static str {
  match status {
    InvitationStatus::Pending => "pending",
    InvitationStatus::Accepted => "accepted",
    InvitationStatus::Rejected => "rejected",
  }
}

pub fn decode_status(s: &str) -> Result<InvitationStatus> {
  match s {
    "pending" => Ok(InvitationStatus::Pending),
    "accepted" => Ok(InvitationStatus::Accepted),
    "rejected" => Ok(InvitationStatus::Rejected),
    other => Err(Error::UnknownStatus(other.to_owned())),
  }
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw strings read directly from an `invitations` row.
pub struct RawInvitation {
  pub invitation_id: String,
  pub contact_email: String,
  pub relation:      String,
  pub status:        String,
  pub created_at:    String,
}

impl RawInvitation {
  pub fn into_invitation(self) -> Result<Invitation> {
    Ok(Invitation {
      invitation_id: decode_uuid(&self.invitation_id)?,
      contact_email: self.contact_email,
      relation:      decode_relation(&self.relation)?,
      status:        decode_status(&self.status)?,
      created_at:    decode_dt(&self.created_at)?,
    })
  }
}

/// Raw strings read directly from an `incoming_requests` row.
pub struct RawIncomingRequest {
  pub request_id:     String,
  pub proposer_name:  String,
  pub proposer_email: String,
  pub relation:       String,
  pub received_at:    String,
}

impl RawIncomingRequest {
  pub fn into_request(self) -> Result<IncomingRequest> {
    Ok(IncomingRequest {
      request_id:     decode_uuid(&self.request_id)?,
      proposer_name:  self.proposer_name,
      proposer_email: self.proposer_email,
      relation:       decode_relation(&self.relation)?,
      received_at:    decode_dt(&self.received_at)?,
    })
  }
}

/// Raw strings read directly from a `roster_entries` row.
pub struct RawRosterEntry {
  pub entry_id:     String,
  pub display_name: String,
  pub relation:     String,
  pub glyph:        String,
}

impl RawRosterEntry {
  pub fn into_entry(self) -> Result<FamilyRosterEntry> {
    Ok(FamilyRosterEntry {
      entry_id:     decode_uuid(&self.entry_id)?,
      display_name: self.display_name,
      relation:     decode_relation(&self.relation)?,
      glyph:        self.glyph,
    })
  }
}
