// ── Domain model ──
//
// Canonical apartment types consumed by the store and front ends. Wire
// shapes from `roost-api` are converted into these in `convert`.

pub mod apartment;
pub mod filter;

pub use apartment::{Apartment, ApartmentDraft, ApartmentId};
pub use filter::{ListFilter, SortDirection};
