//! [`FamilySession`] — the in-memory state for one user's family roster.
//!
//! The session owns the three pieces of state the product threads between
//! screens: sent invitations, the incoming-request inbox, and the confirmed
//! roster. All mutation goes through explicit commands (`create_invitation`,
//! `resolve_invitation`, `receive`, `accept`, `reject`); the read views are
//! borrowed iterators. Commands take `&mut self` and complete synchronously;
//! there is no async I/O anywhere inside the session.

use std::collections::BTreeMap;

use chrono::Utc;
use uuid::Uuid;

use crate::{
  Error, Result,
  invitation::{Invitation, InvitationOutcome, InvitationStatus, validate_contact_email},
  relation::RelationKind,
  request::{IncomingRequest, NewIncomingRequest},
  roster::{AcceptOutcome, FamilyRosterEntry},
};

/// Per-user session state. Single-actor: callers must not share a session
/// between concurrent mutators (see [`crate::store::FamilyStore`] for the
/// multi-user service port).
#[derive(Debug, Clone, Default)]
pub struct FamilySession {
  /// Arrival order; read views list newest first.
  invitations: Vec<Invitation>,
  /// Arrival order; read views list newest first.
  incoming:    Vec<IncomingRequest>,
  /// A partial map from kind to entry — never a multiset.
  roster:      BTreeMap<RelationKind, FamilyRosterEntry>,
}

impl FamilySession {
  pub fn new() -> Self { Self::default() }

  // ── Invitation record store ───────────────────────────────────────────────

  /// Create a new Pending invitation.
  ///
  /// The address must pass the syntactic email check. Duplicate invitations
  /// to the same address/relation pair are allowed — the acceptance-side
  /// dedup happens in [`accept`](Self::accept), not here.
  pub fn create_invitation(
    &mut self,
    contact_email: &str,
    relation: RelationKind,
  ) -> Result<Invitation> {
    let email = validate_contact_email(contact_email)?;

    let invitation = Invitation {
      invitation_id: Uuid::new_v4(),
      contact_email: email.to_owned(),
      relation,
      status: InvitationStatus::Pending,
      created_at: Utc::now(),
    };
    self.invitations.push(invitation.clone());

    Ok(invitation)
  }

  /// Apply an externally delivered outcome to a sent invitation.
  pub fn resolve_invitation(
    &mut self,
    invitation_id: Uuid,
    outcome: InvitationOutcome,
  ) -> Result<&Invitation> {
    let invitation = self
      .invitations
      .iter_mut()
      .find(|i| i.invitation_id == invitation_id)
      .ok_or(Error::InvitationNotFound(invitation_id))?;

    invitation.resolve(outcome)?;
    Ok(invitation)
  }

  /// Sent invitations, most recent first.
  pub fn invitations(&self) -> impl Iterator<Item = &Invitation> {
    self.invitations.iter().rev()
  }

  // ── Incoming request store ────────────────────────────────────────────────

  /// Record delivery of an inbound request from the external channel.
  /// `received_at` is stamped here.
  pub fn receive(&mut self, input: NewIncomingRequest) -> IncomingRequest {
    let request = IncomingRequest {
      request_id:     input.request_id,
      proposer_name:  input.proposer_name,
      proposer_email: input.proposer_email,
      relation:       input.relation,
      received_at:    Utc::now(),
    };
    self.incoming.push(request.clone());
    request
  }

  /// Incoming requests awaiting a decision, most recent first.
  pub fn incoming(&self) -> impl Iterator<Item = &IncomingRequest> {
    self.incoming.iter().rev()
  }

  // ── Roster reconciler ─────────────────────────────────────────────────────

  /// Decide an incoming request.
  ///
  /// On admission the request's identity and proposer name move into a new
  /// roster entry and the request leaves the inbox. If the roster already
  /// holds the proposed kind, the request is removed without touching the
  /// roster. An unknown id changes nothing. Both mutations of the admission
  /// path happen within this single call — the caller never observes one
  /// without the other.
  pub fn accept(&mut self, request_id: Uuid) -> AcceptOutcome {
    let Some(position) =
      self.incoming.iter().position(|r| r.request_id == request_id)
    else {
      return AcceptOutcome::NotFound;
    };

    let request = self.incoming.remove(position);

    if self.roster.contains_key(&request.relation) {
      return AcceptOutcome::DuplicateRelation;
    }

    let entry = FamilyRosterEntry {
      entry_id:     request.request_id,
      display_name: request.proposer_name,
      relation:     request.relation,
      glyph:        request.relation.glyph().to_owned(),
    };
    self.roster.insert(request.relation, entry.clone());

    AcceptOutcome::Admitted(entry)
  }

  /// Remove an incoming request without admitting it. Never touches the
  /// roster; rejecting an absent id is a no-op.
  pub fn reject(&mut self, request_id: Uuid) {
    self.incoming.retain(|r| r.request_id != request_id);
  }

  // ── Roster read views ─────────────────────────────────────────────────────

  /// Confirmed entries in catalog order.
  pub fn roster(&self) -> impl Iterator<Item = &FamilyRosterEntry> {
    self.roster.values()
  }

  /// The entry admitted for `relation`, if any.
  pub fn roster_entry(&self, relation: RelationKind) -> Option<&FamilyRosterEntry> {
    self.roster.get(&relation)
  }
}
