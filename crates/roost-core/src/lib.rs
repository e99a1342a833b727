//! State synchronization layer between `roost-api` and front ends (CLI / UI).
//!
//! This crate owns the domain model and the client-side state of the
//! apartment listing:
//!
//! - **[`ApartmentStore`]**: The context object a front end holds for the
//!   whole session. [`initialize()`](ApartmentStore::initialize) seeds the
//!   collection from the local cache, [`refresh()`](ApartmentStore::refresh)
//!   replaces it with the server's answer, and the mutating operations
//!   (`create`, `edit`, `remove`) keep the collection and cache in step with
//!   each successful server response.
//!
//! - **[`StateStream`]**: Subscription handle vended by the store. Exposes
//!   `current()` / `latest()` / `changed()` for reactive rendering.
//!
//! - **[`validation`]**: Pure field rules. Every violation is reported, not
//!   just the first.
//!
//! - **[`cache`]**: The fallback slot holding the last known collection
//!   (a JSON file, or memory for tests and cache-less runs).
//!
//! - **[`ApartmentRemote`]**: The seam between the store and the HTTP client,
//!   implemented for [`roost_api::ApartmentClient`].

pub mod cache;
pub mod config;
pub mod convert;
pub mod error;
pub mod model;
pub mod remote;
pub mod store;
pub mod stream;
pub mod validation;

// ── Primary re-exports ──────────────────────────────────────────────
pub use cache::{ApartmentCache, CacheError, CacheSlot, JsonFileCache, MemoryCache};
pub use config::{CacheLocation, StoreConfig, TlsVerification};
pub use error::CoreError;
pub use model::{Apartment, ApartmentDraft, ApartmentId, ListFilter, SortDirection};
pub use remote::ApartmentRemote;
pub use store::{ApartmentStore, CollectionState, HttpStore};
pub use stream::StateStream;
pub use validation::{DraftField, Violation, validate_draft};
