//! The relation catalog — the closed set of permitted relationship kinds.
//!
//! The set is fixed at compile time and never extended at runtime. Each kind
//! carries exactly one display glyph; string-level lookups for names outside
//! the catalog fall back to a generic glyph rather than failing.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::Error;

/// Glyph shown for a name that matches no catalog entry.
pub const FALLBACK_GLYPH: &str = "👤";

/// A permitted relationship kind.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum RelationKind {
  Father,
  Mother,
  Spouse,
  Brother,
  Sister,
  Son,
  Daughter,
  Guardian,
}

impl RelationKind {
  /// Every kind, in catalog order.
  pub const ALL: [RelationKind; 8] = [
    Self::Father,
    Self::Mother,
    Self::Spouse,
    Self::Brother,
    Self::Sister,
    Self::Son,
    Self::Daughter,
    Self::Guardian,
  ];

  /// The lowercase name used in storage and on the wire.
  /// Must match the `rename_all = "lowercase"` serde tags above.
  pub fn canonical_name(&self) -> &'static str {
    match self {
      Self::Father => "father",
      Self::Mother => "mother",
      Self::Spouse => "spouse",
      Self::Brother => "brother",
      Self::Sister => "sister",
      Self::Son => "son",
      Self::Daughter => "daughter",
      Self::Guardian => "guardian",
    }
  }

  /// Display glyph. Total over the enumeration; no error path.
  pub fn glyph(&self) -> &'static str {
    match self {
      Self::Father => "👨",
      Self::Mother => "👩",
      Self::Spouse => "💑",
      Self::Brother => "👬",
      Self::Sister => "👭",
      Self::Son => "👦",
      Self::Daughter => "👧",
      Self::Guardian => "🛡",
    }
  }
}

impl fmt::Display for RelationKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.canonical_name())
  }
}

impl FromStr for RelationKind {
  type Err = Error;

  /// Case-insensitive parse of a catalog name.
  ///
  /// Empty input is [`Error::MissingRelation`] (nothing was selected); any
  /// other unrecognised name is [`Error::UnknownRelation`].
  fn from_str(s: &str) -> Result<Self, Error> {
    let name = s.trim();
    if name.is_empty() {
      return Err(Error::MissingRelation);
    }

    RelationKind::ALL
      .into_iter()
      .find(|kind| kind.canonical_name().eq_ignore_ascii_case(name))
      .ok_or_else(|| Error::UnknownRelation(name.to_owned()))
  }
}

/// String-level glyph lookup for display boundaries.
///
/// Unlike [`RelationKind::glyph`], the input is not required to be a catalog
/// member: unrecognised names map to [`FALLBACK_GLYPH`].
pub fn glyph_for_name(name: &str) -> &'static str {
  name
    .parse::<RelationKind>()
    .map(|kind| kind.glyph())
    .unwrap_or(FALLBACK_GLYPH)
}
