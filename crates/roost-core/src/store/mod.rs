// ── Apartment store ──

mod apartment_store;
mod state;

pub use apartment_store::{ApartmentStore, HttpStore};
pub use state::CollectionState;
