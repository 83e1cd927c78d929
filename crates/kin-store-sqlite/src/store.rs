//! [`SqliteStore`] — the SQLite implementation of [`FamilyStore`].

use std::path::Path;

use chrono::Utc;
use rusqlite::OptionalExtension as _;
use uuid::Uuid;

use kin_core::{
  invitation::{Invitation, InvitationOutcome, InvitationStatus, validate_contact_email},
  relation::{RelationKind, glyph_for_name},
  request::{IncomingRequest, NewIncomingRequest},
  roster::{AcceptOutcome, FamilyRosterEntry},
  store::FamilyStore,
};

use crate::{
  Error, Result,
  encode::{
    RawIncomingRequest, RawInvitation, RawRosterEntry, encode_dt,
    encode_relation, encode_status, encode_uuid,
  },
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Kin roster store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted. All calls
/// run on the connection's single worker thread, and each compound decision
/// executes inside one transaction, so per-user accepts are serialised and
/// the first-wins invariant cannot be raced.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

/// Outcome of the accept transaction, in raw column form.
enum RawAccept {
  NotFound,
  Duplicate,
  Admitted(RawRosterEntry),
}

/// Outcome of the resolve transaction, in raw column form.
enum RawResolve {
  NotFound,
  AlreadyResolved,
  Updated(RawInvitation),
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── FamilyStore impl ────────────────────────────────────────────────────────

impl FamilyStore for SqliteStore {
  type Error = Error;

  // ── Invitations ───────────────────────────────────────────────────────────

  async fn create_invitation(
    &self,
    user_id: Uuid,
    contact_email: &str,
    relation: RelationKind,
  ) -> Result<Invitation> {
    let email = validate_contact_email(contact_email).map_err(Error::Core)?;

    let invitation = Invitation {
      invitation_id: Uuid::new_v4(),
      contact_email: email.to_owned(),
      relation,
      status: InvitationStatus::Pending,
      created_at: Utc::now(),
    };

    let id_str       = encode_uuid(invitation.invitation_id);
    let user_str     = encode_uuid(user_id);
    let email_str    = invitation.contact_email.clone();
    let relation_str = encode_relation(relation).to_owned();
    let status_str   = encode_status(invitation.status).to_owned();
    let at_str       = encode_dt(invitation.created_at);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO invitations (
             invitation_id, user_id, contact_email, relation, status, created_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
          rusqlite::params![
            id_str, user_str, email_str, relation_str, status_str, at_str
          ],
        )?;
        Ok(())
      })
      .await?;

    Ok(invitation)
  }

  async fn list_invitations(&self, user_id: Uuid) -> Result<Vec<Invitation>> {
    let user_str = encode_uuid(user_id);

    let raws: Vec<RawInvitation> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT invitation_id, contact_email, relation, status, created_at
           FROM invitations
           WHERE user_id = ?1
           ORDER BY created_at DESC, rowid DESC",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![user_str], |row| {
            Ok(RawInvitation {
              invitation_id: row.get(0)?,
              contact_email: row.get(1)?,
              relation:      row.get(2)?,
              status:        row.get(3)?,
              created_at:    row.get(4)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawInvitation::into_invitation).collect()
  }

  async fn resolve_invitation(
    &self,
    user_id: Uuid,
    invitation_id: Uuid,
    outcome: InvitationOutcome,
  ) -> Result<Option<Invitation>> {
    let id_str   = encode_uuid(invitation_id);
    let user_str = encode_uuid(user_id);
    let new_status = encode_status(match outcome {
      InvitationOutcome::Accepted => InvitationStatus::Accepted,
      InvitationOutcome::Rejected => InvitationStatus::Rejected,
    })
    .to_owned();

    let raw: RawResolve = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;

        let row: Option<RawInvitation> = tx
          .query_row(
            "SELECT invitation_id, contact_email, relation, status, created_at
             FROM invitations
             WHERE invitation_id = ?1 AND user_id = ?2",
            rusqlite::params![id_str, user_str],
            |row| {
              Ok(RawInvitation {
                invitation_id: row.get(0)?,
                contact_email: row.get(1)?,
                relation:      row.get(2)?,
                status:        row.get(3)?,
                created_at:    row.get(4)?,
              })
            },
          )
          .optional()?;

        let Some(mut invitation) = row else {
          return Ok(RawResolve::NotFound);
        };
        if invitation.status != "pending" {
          return Ok(RawResolve::AlreadyResolved);
        }

        tx.execute(
          "UPDATE invitations SET status = ?2 WHERE invitation_id = ?1",
          rusqlite::params![id_str, new_status],
        )?;
        tx.commit()?;

        invitation.status = new_status;
        Ok(RawResolve::Updated(invitation))
      })
      .await?;

    match raw {
      RawResolve::NotFound => Ok(None),
      RawResolve::AlreadyResolved => Err(Error::AlreadyResolved(invitation_id)),
      RawResolve::Updated(raw) => Ok(Some(raw.into_invitation()?)),
    }
  }

  // ── Incoming requests ─────────────────────────────────────────────────────

  async fn deliver_request(
    &self,
    user_id: Uuid,
    input: NewIncomingRequest,
  ) -> Result<IncomingRequest> {
    let request = IncomingRequest {
      request_id:     input.request_id,
      proposer_name:  input.proposer_name,
      proposer_email: input.proposer_email,
      relation:       input.relation,
      received_at:    Utc::now(),
    };

    let id_str       = encode_uuid(request.request_id);
    let user_str     = encode_uuid(user_id);
    let name_str     = request.proposer_name.clone();
    let email_str    = request.proposer_email.clone();
    let relation_str = encode_relation(request.relation).to_owned();
    let at_str       = encode_dt(request.received_at);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO incoming_requests (
             request_id, user_id, proposer_name, proposer_email, relation, received_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
          rusqlite::params![
            id_str, user_str, name_str, email_str, relation_str, at_str
          ],
        )?;
        Ok(())
      })
      .await?;

    Ok(request)
  }

  async fn list_requests(&self, user_id: Uuid) -> Result<Vec<IncomingRequest>> {
    let user_str = encode_uuid(user_id);

    let raws: Vec<RawIncomingRequest> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT request_id, proposer_name, proposer_email, relation, received_at
           FROM incoming_requests
           WHERE user_id = ?1
           ORDER BY received_at DESC, rowid DESC",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![user_str], |row| {
            Ok(RawIncomingRequest {
              request_id:     row.get(0)?,
              proposer_name:  row.get(1)?,
              proposer_email: row.get(2)?,
              relation:       row.get(3)?,
              received_at:    row.get(4)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawIncomingRequest::into_request).collect()
  }

  // ── Reconciliation ────────────────────────────────────────────────────────

  async fn accept_request(
    &self,
    user_id: Uuid,
    request_id: Uuid,
  ) -> Result<AcceptOutcome> {
    let id_str   = encode_uuid(request_id);
    let user_str = encode_uuid(user_id);

    let raw: RawAccept = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;

        // Stored relation names are always canonical, so the dedup check is
        // an exact match here; case folding happened at parse time.
        let request: Option<(String, String)> = tx
          .query_row(
            "SELECT proposer_name, relation FROM incoming_requests
             WHERE request_id = ?1 AND user_id = ?2",
            rusqlite::params![id_str, user_str],
            |row| Ok((row.get(0)?, row.get(1)?)),
          )
          .optional()?;

        let Some((proposer_name, relation)) = request else {
          return Ok(RawAccept::NotFound);
        };

        let occupied: bool = tx
          .query_row(
            "SELECT 1 FROM roster_entries WHERE user_id = ?1 AND relation = ?2",
            rusqlite::params![user_str, relation],
            |_| Ok(true),
          )
          .optional()?
          .unwrap_or(false);

        if occupied {
          tx.execute(
            "DELETE FROM incoming_requests WHERE request_id = ?1 AND user_id = ?2",
            rusqlite::params![id_str, user_str],
          )?;
          tx.commit()?;
          return Ok(RawAccept::Duplicate);
        }

        let glyph = glyph_for_name(&relation).to_owned();
        tx.execute(
          "INSERT INTO roster_entries (entry_id, user_id, display_name, relation, glyph)
           VALUES (?1, ?2, ?3, ?4, ?5)",
          rusqlite::params![id_str, user_str, proposer_name, relation, glyph],
        )?;
        tx.execute(
          "DELETE FROM incoming_requests WHERE request_id = ?1 AND user_id = ?2",
          rusqlite::params![id_str, user_str],
        )?;
        tx.commit()?;

        Ok(RawAccept::Admitted(RawRosterEntry {
          entry_id: id_str,
          display_name: proposer_name,
          relation,
          glyph,
        }))
      })
      .await?;

    match raw {
      RawAccept::NotFound => Ok(AcceptOutcome::NotFound),
      RawAccept::Duplicate => Ok(AcceptOutcome::DuplicateRelation),
      RawAccept::Admitted(raw) => Ok(AcceptOutcome::Admitted(raw.into_entry()?)),
    }
  }

  async fn reject_request(&self, user_id: Uuid, request_id: Uuid) -> Result<()> {
    let id_str   = encode_uuid(request_id);
    let user_str = encode_uuid(user_id);

    // Unconditional removal; deleting an absent id is a no-op.
    self
      .conn
      .call(move |conn| {
        conn.execute(
          "DELETE FROM incoming_requests WHERE request_id = ?1 AND user_id = ?2",
          rusqlite::params![id_str, user_str],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn roster(&self, user_id: Uuid) -> Result<Vec<FamilyRosterEntry>> {
    let user_str = encode_uuid(user_id);

    let raws: Vec<RawRosterEntry> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT entry_id, display_name, relation, glyph
           FROM roster_entries
           WHERE user_id = ?1",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![user_str], |row| {
            Ok(RawRosterEntry {
              entry_id:     row.get(0)?,
              display_name: row.get(1)?,
              relation:     row.get(2)?,
              glyph:        row.get(3)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    let mut entries: Vec<FamilyRosterEntry> = raws
      .into_iter()
      .map(RawRosterEntry::into_entry)
      .collect::<Result<_>>()?;

    entries.sort_by_key(|e| e.relation);
    Ok(entries)
  }
}
