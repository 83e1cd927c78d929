//! JSON REST API for Kin.
//!
//! Exposes an axum [`Router`] backed by any [`kin_core::store::FamilyStore`].
//! Auth, TLS, and transport concerns are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", kin_api::api_router(store.clone()))
//! ```

pub mod error;
pub mod invitations;
pub mod requests;
pub mod roster;

use std::{path::PathBuf, sync::Arc};

use axum::{
  Router,
  routing::{get, post},
};
use kin_core::store::FamilyStore;
use serde::Deserialize;

pub use error::ApiError;


// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml`.
#[derive(Deserialize, Clone)]
pub struct ServerConfig {
  pub host:       String,
  pub port:       u16,
  pub store_path: PathBuf,
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: FamilyStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  Router::new()
    // Sent invitations
    .route(
      "/invitations",
      get(invitations::list::<S>).post(invitations::create::<S>),
    )
    .route("/invitations/{id}/resolve", post(invitations::resolve::<S>))
    // Incoming requests
    .route(
      "/requests",
      get(requests::list::<S>).post(requests::deliver::<S>),
    )
    .route("/requests/{id}/accept", post(requests::accept::<S>))
    .route("/requests/{id}/reject", post(requests::reject::<S>))
    // Roster
    .route("/roster", get(roster::list::<S>))
    .with_state(store)
}
