// ── Field validation rules ──
//
// Pure, independent checks over draft fields. Callers run all of them and
// surface every violation at once; `validate_draft` does exactly that.

use strum::{Display, IntoStaticStr};
use thiserror::Error;

use crate::model::ApartmentDraft;

/// Longest accepted apartment name, in characters.
pub const NAME_MAX_CHARS: usize = 99;
/// Longest accepted description, in characters.
pub const DESCRIPTION_MAX_CHARS: usize = 999;

pub const NAME_EMPTY: &str = "Apartment name cannot be empty";
pub const NAME_TOO_LONG: &str = "Apartment name exceeds maximum length (99 characters)";
pub const ROOMS_NOT_POSITIVE: &str = "Number of rooms must be greater than 0";
pub const PRICE_NOT_POSITIVE: &str = "Price must be greater than 0";
pub const DESCRIPTION_TOO_LONG: &str = "Description exceeds maximum length (999 characters)";

/// The draft field a violation refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
pub enum DraftField {
    Name,
    Rooms,
    Price,
    Description,
}

/// A single failed field rule.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct Violation {
    pub field: DraftField,
    pub message: &'static str,
}

impl Violation {
    const fn new(field: DraftField, message: &'static str) -> Self {
        Self { field, message }
    }
}

pub fn validate_name(name: &str) -> Option<Violation> {
    if name.trim().is_empty() {
        return Some(Violation::new(DraftField::Name, NAME_EMPTY));
    }
    if name.chars().count() > NAME_MAX_CHARS {
        return Some(Violation::new(DraftField::Name, NAME_TOO_LONG));
    }
    None
}

pub fn validate_rooms(rooms: i64) -> Option<Violation> {
    (rooms <= 0).then_some(Violation::new(DraftField::Rooms, ROOMS_NOT_POSITIVE))
}

/// NaN and infinities are rejected along with zero and negatives.
pub fn validate_price(price: f64) -> Option<Violation> {
    (!price.is_finite() || price <= 0.0)
        .then_some(Violation::new(DraftField::Price, PRICE_NOT_POSITIVE))
}

pub fn validate_description(description: &str) -> Option<Violation> {
    (description.chars().count() > DESCRIPTION_MAX_CHARS)
        .then_some(Violation::new(DraftField::Description, DESCRIPTION_TOO_LONG))
}

/// Run every rule against the draft.
///
/// Returns all violations in field order (name, rooms, price, description).
pub fn validate_draft(draft: &ApartmentDraft) -> Result<(), Vec<Violation>> {
    let violations: Vec<Violation> = [
        validate_name(&draft.name),
        validate_rooms(draft.rooms),
        validate_price(draft.price),
        validate_description(&draft.description),
    ]
    .into_iter()
    .flatten()
    .collect();

    if violations.is_empty() {
        Ok(())
    } else {
        Err(violations)
    }
}
