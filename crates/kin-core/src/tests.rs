//! Unit tests for the session state machine and its supporting types.

use uuid::Uuid;

use crate::{
  Error,
  invitation::{InvitationOutcome, InvitationStatus, validate_contact_email},
  relation::{FALLBACK_GLYPH, RelationKind, glyph_for_name},
  request::NewIncomingRequest,
  roster::AcceptOutcome,
  session::FamilySession,
};

fn request(name: &str, relation: RelationKind) -> NewIncomingRequest {
  NewIncomingRequest {
    request_id:     Uuid::new_v4(),
    proposer_name:  name.into(),
    proposer_email: format!("{}@example.com", name.to_lowercase()),
    relation,
  }
}

// ─── Relation catalog ────────────────────────────────────────────────────────

#[test]
fn every_kind_has_a_glyph_and_roundtrips_by_name() {
  for kind in RelationKind::ALL {
    assert!(!kind.glyph().is_empty());
    assert_eq!(kind.canonical_name().parse::<RelationKind>().unwrap(), kind);
  }
}

#[test]
fn relation_parse_is_case_insensitive() {
  assert_eq!("Father".parse::<RelationKind>().unwrap(), RelationKind::Father);
  assert_eq!("GUARDIAN".parse::<RelationKind>().unwrap(), RelationKind::Guardian);
  assert_eq!(" mother ".parse::<RelationKind>().unwrap(), RelationKind::Mother);
}

#[test]
fn empty_relation_is_missing_not_unknown() {
  assert!(matches!("".parse::<RelationKind>(), Err(Error::MissingRelation)));
  assert!(matches!("   ".parse::<RelationKind>(), Err(Error::MissingRelation)));
  assert!(matches!(
    "cousin".parse::<RelationKind>(),
    Err(Error::UnknownRelation(name)) if name == "cousin"
  ));
}

#[test]
fn glyph_lookup_by_name_falls_back_for_strangers() {
  assert_eq!(glyph_for_name("father"), RelationKind::Father.glyph());
  assert_eq!(glyph_for_name("Sister"), RelationKind::Sister.glyph());
  assert_eq!(glyph_for_name("cousin"), FALLBACK_GLYPH);
  assert_eq!(glyph_for_name(""), FALLBACK_GLYPH);
}

#[test]
fn relation_serde_uses_canonical_names() {
  let json = serde_json::to_string(&RelationKind::Daughter).unwrap();
  assert_eq!(json, "\"daughter\"");
}

// ─── Email validation (P6) ───────────────────────────────────────────────────

#[test]
fn email_validation_accepts_plain_addresses() {
  assert_eq!(validate_contact_email("user@example.com").unwrap(), "user@example.com");
  // trimmed form is returned for storage
  assert_eq!(validate_contact_email("  a@b.co  ").unwrap(), "a@b.co");
}

#[test]
fn email_validation_rejects_malformed_addresses() {
  for bad in ["not-an-email", "a@b", "@b.com", "a b@c.com", "a@@b.com", ""] {
    assert!(
      matches!(validate_contact_email(bad), Err(Error::InvalidEmail(_))),
      "expected rejection for {bad:?}"
    );
  }
}

// ─── Invitation record store ─────────────────────────────────────────────────

#[test]
fn create_invitation_starts_pending() {
  let mut session = FamilySession::new();
  let invitation = session
    .create_invitation("dad@example.com", RelationKind::Father)
    .unwrap();

  assert_eq!(invitation.status, InvitationStatus::Pending);
  assert_eq!(invitation.contact_email, "dad@example.com");
  assert_eq!(invitation.relation, RelationKind::Father);
}

#[test]
fn create_invitation_rejects_bad_email_without_mutation() {
  let mut session = FamilySession::new();
  let err = session.create_invitation("a@b", RelationKind::Father).unwrap_err();
  assert!(matches!(err, Error::InvalidEmail(_)));
  assert_eq!(session.invitations().count(), 0);
}

#[test]
fn duplicate_invitations_to_same_pair_are_allowed() {
  // No invariant prevents re-inviting the same address/relation pair; the
  // acceptance-side dedup lives in the reconciler.
  let mut session = FamilySession::new();
  session.create_invitation("dad@example.com", RelationKind::Father).unwrap();
  session.create_invitation("dad@example.com", RelationKind::Father).unwrap();
  assert_eq!(session.invitations().count(), 2);
}

#[test]
fn invitations_list_newest_first() {
  let mut session = FamilySession::new();
  session.create_invitation("first@example.com", RelationKind::Father).unwrap();
  session.create_invitation("second@example.com", RelationKind::Mother).unwrap();

  let emails: Vec<_> =
    session.invitations().map(|i| i.contact_email.as_str()).collect();
  assert_eq!(emails, ["second@example.com", "first@example.com"]);
}

#[test]
fn invitation_outcome_is_one_way() {
  let mut session = FamilySession::new();
  let id = session
    .create_invitation("dad@example.com", RelationKind::Father)
    .unwrap()
    .invitation_id;

  let resolved =
    session.resolve_invitation(id, InvitationOutcome::Accepted).unwrap();
  assert_eq!(resolved.status, InvitationStatus::Accepted);

  // Nothing leaves a resolved state, not even the same outcome again.
  let err = session
    .resolve_invitation(id, InvitationOutcome::Rejected)
    .unwrap_err();
  assert!(matches!(err, Error::InvitationAlreadyResolved(i) if i == id));

  let invitation = session.invitations().next().unwrap();
  assert_eq!(invitation.status, InvitationStatus::Accepted);
}

#[test]
fn resolve_unknown_invitation_errors() {
  let mut session = FamilySession::new();
  let id = Uuid::new_v4();
  let err = session
    .resolve_invitation(id, InvitationOutcome::Accepted)
    .unwrap_err();
  assert!(matches!(err, Error::InvitationNotFound(i) if i == id));
}

// ─── Incoming request store ──────────────────────────────────────────────────

#[test]
fn incoming_list_newest_first() {
  let mut session = FamilySession::new();
  session.receive(request("Suman", RelationKind::Father));
  session.receive(request("Rita", RelationKind::Mother));

  let names: Vec<_> =
    session.incoming().map(|r| r.proposer_name.as_str()).collect();
  assert_eq!(names, ["Rita", "Suman"]);
}

// ─── Roster reconciler ───────────────────────────────────────────────────────

// Scenario A: accepting into an empty roster admits the proposer.
#[test]
fn accept_admits_into_empty_roster() {
  let mut session = FamilySession::new();
  let input = request("Suman", RelationKind::Father);
  let id = input.request_id;
  session.receive(input);

  let outcome = session.accept(id);
  let entry = outcome.admitted().expect("admitted");
  assert_eq!(entry.entry_id, id);
  assert_eq!(entry.display_name, "Suman");
  assert_eq!(entry.relation, RelationKind::Father);
  assert_eq!(entry.glyph, RelationKind::Father.glyph());

  // P3: decided requests leave the inbox.
  assert_eq!(session.incoming().count(), 0);
  assert_eq!(session.roster_entry(RelationKind::Father).unwrap().entry_id, id);
}

// Scenario B: a second accepted request for an occupied kind is discarded.
#[test]
fn accept_discards_duplicate_relation_silently() {
  let mut session = FamilySession::new();
  let first = request("Suman", RelationKind::Father);
  let first_id = first.request_id;
  session.receive(first);
  session.accept(first_id);

  let second = request("Ram", RelationKind::Father);
  let second_id = second.request_id;
  session.receive(second);

  let outcome = session.accept(second_id);
  assert_eq!(outcome, AcceptOutcome::DuplicateRelation);

  // Roster unchanged, inbox no longer holds the discarded request.
  let entry = session.roster_entry(RelationKind::Father).unwrap();
  assert_eq!(entry.entry_id, first_id);
  assert_eq!(entry.display_name, "Suman");
  assert!(session.incoming().all(|r| r.request_id != second_id));
}

// P2: whichever request is accepted first wins, regardless of arrival order.
#[test]
fn first_accepted_wins_not_first_received() {
  let mut session = FamilySession::new();
  let alice = request("Alice", RelationKind::Father);
  let bob = request("Bob", RelationKind::Father);
  let (alice_id, bob_id) = (alice.request_id, bob.request_id);
  session.receive(alice);
  session.receive(bob);

  // Bob arrived second but is accepted first.
  assert!(session.accept(bob_id).admitted().is_some());
  assert_eq!(session.accept(alice_id), AcceptOutcome::DuplicateRelation);

  let entry = session.roster_entry(RelationKind::Father).unwrap();
  assert_eq!(entry.display_name, "Bob");
}

// P1: any accept sequence leaves at most one entry per kind.
#[test]
fn roster_never_holds_two_entries_of_one_kind() {
  let mut session = FamilySession::new();
  let mut ids = Vec::new();
  for name in ["A", "B", "C", "D"] {
    let input = request(name, RelationKind::Mother);
    ids.push(input.request_id);
    session.receive(input);
  }
  for id in ids {
    session.accept(id);
  }

  assert_eq!(session.roster().count(), 1);
  assert_eq!(
    session.roster_entry(RelationKind::Mother).unwrap().display_name,
    "A"
  );
}

// Scenario C / P4: reject removes the request and never mutates the roster.
#[test]
fn reject_removes_request_and_leaves_roster_untouched() {
  let mut session = FamilySession::new();
  let admitted = request("Suman", RelationKind::Father);
  let admitted_id = admitted.request_id;
  session.receive(admitted);
  session.accept(admitted_id);
  let roster_before: Vec<_> = session.roster().cloned().collect();

  let input = request("Maya", RelationKind::Mother);
  let id = input.request_id;
  session.receive(input);
  session.reject(id);

  assert!(session.incoming().all(|r| r.request_id != id));
  let roster_after: Vec<_> = session.roster().cloned().collect();
  assert_eq!(roster_before, roster_after);
}

// P5: a second accept or reject of the same id is a no-op.
#[test]
fn decisions_on_absent_ids_are_idempotent_no_ops() {
  let mut session = FamilySession::new();
  let input = request("Suman", RelationKind::Father);
  let id = input.request_id;
  session.receive(input);

  assert!(session.accept(id).admitted().is_some());
  assert_eq!(session.accept(id), AcceptOutcome::NotFound);
  session.reject(id);
  session.reject(id);

  assert_eq!(session.roster().count(), 1);
  assert_eq!(session.incoming().count(), 0);

  // Same for an id that was never delivered.
  assert_eq!(session.accept(Uuid::new_v4()), AcceptOutcome::NotFound);
}

#[test]
fn roster_lists_in_catalog_order() {
  let mut session = FamilySession::new();
  for relation in [RelationKind::Guardian, RelationKind::Father, RelationKind::Son] {
    let input = request("X", relation);
    let id = input.request_id;
    session.receive(input);
    session.accept(id);
  }

  let kinds: Vec<_> = session.roster().map(|e| e.relation).collect();
  assert_eq!(kinds, [RelationKind::Father, RelationKind::Son, RelationKind::Guardian]);
}

// ─── Wire shapes ─────────────────────────────────────────────────────────────

#[test]
fn accept_outcome_serialises_with_outcome_tag() {
  let mut session = FamilySession::new();
  let input = request("Suman", RelationKind::Father);
  let id = input.request_id;
  session.receive(input);

  let admitted = serde_json::to_value(session.accept(id)).unwrap();
  assert_eq!(admitted["outcome"], "admitted");
  assert_eq!(admitted["entry"]["display_name"], "Suman");
  assert_eq!(admitted["entry"]["relation"], "father");

  let not_found = serde_json::to_value(session.accept(id)).unwrap();
  assert_eq!(not_found["outcome"], "not_found");
}

#[test]
fn invitation_status_serialises_lowercase() {
  assert_eq!(
    serde_json::to_string(&InvitationStatus::Pending).unwrap(),
    "\"pending\""
  );
  assert_eq!(
    serde_json::to_string(&InvitationOutcome::Rejected).unwrap(),
    "\"rejected\""
  );
}
