//! The `FamilyStore` trait — the multi-user service port.
//!
//! [`crate::session::FamilySession`] is the single-user, in-process form of
//! this state; the trait is its long-lived-service counterpart, implemented
//! by storage backends (e.g. `kin-store-sqlite`). The API layer depends on
//! this abstraction, not on any concrete backend.
//!
//! All methods return `Send` futures so the trait can be used in
//! multi-threaded async runtimes (e.g. tokio with `axum`).

use std::future::Future;

use uuid::Uuid;

use crate::{
  invitation::{Invitation, InvitationOutcome},
  relation::RelationKind,
  request::{IncomingRequest, NewIncomingRequest},
  roster::{AcceptOutcome, FamilyRosterEntry},
};

/// Abstraction over a Kin roster store backend.
///
/// Every operation is scoped to the `user_id` owning the session state.
/// `accept_request` is a compound check-then-insert-then-delete and is not
/// safe under concurrent execution for one user; implementations must
/// serialise it (a single writer at a time per user) so the first-wins
/// invariant cannot be raced.
pub trait FamilyStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Invitations ───────────────────────────────────────────────────────

  /// Validate the address, then create and persist a Pending invitation.
  /// `invitation_id` and `created_at` are assigned by the store.
  fn create_invitation<'a>(
    &'a self,
    user_id: Uuid,
    contact_email: &'a str,
    relation: RelationKind,
  ) -> impl Future<Output = Result<Invitation, Self::Error>> + Send + 'a;

  /// Sent invitations for `user_id`, most recent first.
  fn list_invitations(
    &self,
    user_id: Uuid,
  ) -> impl Future<Output = Result<Vec<Invitation>, Self::Error>> + Send + '_;

  /// Record the externally delivered outcome of a sent invitation.
  ///
  /// Returns `None` if the invitation does not exist for this user; an error
  /// if it was already resolved.
  fn resolve_invitation(
    &self,
    user_id: Uuid,
    invitation_id: Uuid,
    outcome: InvitationOutcome,
  ) -> impl Future<Output = Result<Option<Invitation>, Self::Error>> + Send + '_;

  // ── Incoming requests ─────────────────────────────────────────────────

  /// Record delivery of an inbound request. `received_at` is set by the
  /// store; the request id comes from the external sender and must be fresh.
  fn deliver_request(
    &self,
    user_id: Uuid,
    input: NewIncomingRequest,
  ) -> impl Future<Output = Result<IncomingRequest, Self::Error>> + Send + '_;

  /// Requests awaiting a decision, most recent first.
  fn list_requests(
    &self,
    user_id: Uuid,
  ) -> impl Future<Output = Result<Vec<IncomingRequest>, Self::Error>> + Send + '_;

  // ── Reconciliation ────────────────────────────────────────────────────

  /// Decide a request; semantics of
  /// [`FamilySession::accept`](crate::session::FamilySession::accept).
  /// The roster mutation and inbox removal must be atomic.
  fn accept_request(
    &self,
    user_id: Uuid,
    request_id: Uuid,
  ) -> impl Future<Output = Result<AcceptOutcome, Self::Error>> + Send + '_;

  /// Remove a request without admitting it; no-op for an unknown id.
  fn reject_request(
    &self,
    user_id: Uuid,
    request_id: Uuid,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Confirmed roster entries in catalog order.
  fn roster(
    &self,
    user_id: Uuid,
  ) -> impl Future<Output = Result<Vec<FamilyRosterEntry>, Self::Error>> + Send + '_;
}
