// ── Apartment domain types ──

use std::fmt;

use serde::{Deserialize, Serialize};

// ── ApartmentId ─────────────────────────────────────────────────────

/// Server-assigned apartment identifier. Opaque; never parsed or generated
/// client-side.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApartmentId(String);

impl ApartmentId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ApartmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ApartmentId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl From<String> for ApartmentId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl AsRef<str> for ApartmentId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// ── Apartment ───────────────────────────────────────────────────────

/// A persisted apartment listing.
///
/// This is also the on-disk shape of each cache entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Apartment {
    pub id: ApartmentId,
    pub name: String,
    pub rooms: i64,
    pub price: f64,
    #[serde(default)]
    pub description: String,
}

impl Apartment {
    /// Start an edit buffer holding this apartment's current field values.
    pub fn to_draft(&self) -> ApartmentDraft {
        ApartmentDraft {
            name: self.name.clone(),
            rooms: self.rooms,
            price: self.price,
            description: self.description.clone(),
        }
    }

    /// Whether this apartment's fields equal the draft's, ignoring identity.
    pub fn matches_draft(&self, draft: &ApartmentDraft) -> bool {
        self.to_draft() == *draft
    }
}

// ── ApartmentDraft ──────────────────────────────────────────────────

/// Field values without a server identity: the create input and the edit
/// buffer. `Default` is the empty form (zero rooms and price count as
/// "missing" for validation).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApartmentDraft {
    pub name: String,
    pub rooms: i64,
    pub price: f64,
    #[serde(default)]
    pub description: String,
}

impl ApartmentDraft {
    pub fn new(name: impl Into<String>, rooms: i64, price: f64) -> Self {
        Self {
            name: name.into(),
            rooms,
            price,
            description: String::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}
