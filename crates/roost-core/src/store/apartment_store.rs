// ── Apartment store ──
//
// The session-long context object between a front end and the remote
// collection. State lives in a `watch` channel so every mutation is one
// `send_modify` step and subscribers see whole snapshots only. No lock is
// ever held across an await: operations may overlap, and when they do the
// response that resolves last is the one left in the collection.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, info, warn};

use roost_api::ApartmentClient;

use super::state::CollectionState;
use crate::cache::{ApartmentCache, CacheSlot};
use crate::config::StoreConfig;
use crate::error::CoreError;
use crate::model::{Apartment, ApartmentDraft, ApartmentId, ListFilter};
use crate::remote::ApartmentRemote;
use crate::stream::StateStream;
use crate::validation::validate_draft;

/// The store as used against a real server.
pub type HttpStore = ApartmentStore<ApartmentClient, CacheSlot>;

/// Canonical in-memory apartment collection, kept consistent with the
/// remote collection and mirrored into a fallback cache.
///
/// Lifecycle: construct, [`initialize()`](Self::initialize) once, then run
/// operations until drop. Every failing operation both returns its error
/// and records it as `last_error`; the collection is never partially
/// mutated.
pub struct ApartmentStore<R, C> {
    remote: R,
    cache: C,
    state: watch::Sender<Arc<CollectionState>>,
}

impl HttpStore {
    /// Build an HTTP-backed store from configuration. Does not touch the
    /// network or the cache; call [`initialize()`](Self::initialize) next.
    pub fn from_config(config: &StoreConfig) -> Result<Self, CoreError> {
        let client = ApartmentClient::new(config.api_url.as_str(), &config.transport())?;
        Ok(Self::new(client, CacheSlot::from_location(&config.cache)))
    }
}

impl<R: ApartmentRemote, C: ApartmentCache> ApartmentStore<R, C> {
    pub fn new(remote: R, cache: C) -> Self {
        let (state, _) = watch::channel(Arc::new(CollectionState::default()));
        Self {
            remote,
            cache,
            state,
        }
    }

    pub fn remote(&self) -> &R {
        &self.remote
    }

    pub fn cache(&self) -> &C {
        &self.cache
    }

    // ── Read access ──────────────────────────────────────────────────

    /// The current state (cheap `Arc` clone).
    pub fn snapshot(&self) -> Arc<CollectionState> {
        self.state.borrow().clone()
    }

    /// Subscribe to state changes.
    pub fn subscribe(&self) -> StateStream {
        StateStream::new(self.state.subscribe())
    }

    pub fn apartments(&self) -> Vec<Apartment> {
        self.state.borrow().apartments.clone()
    }

    pub fn selected(&self) -> Option<Apartment> {
        self.state.borrow().selected.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.state.borrow().loading
    }

    pub fn last_error(&self) -> Option<CoreError> {
        self.state.borrow().last_error.clone()
    }

    pub fn find(&self, id: &ApartmentId) -> Option<Apartment> {
        self.state.borrow().find(id).cloned()
    }

    // ── Lifecycle ────────────────────────────────────────────────────

    /// Seed the collection from the fallback cache.
    ///
    /// An unreadable cache is logged and treated as empty; it is never
    /// surfaced as `last_error`.
    pub fn initialize(&self) {
        let seeded = match self.cache.load() {
            Ok(apartments) => apartments,
            Err(e) => {
                warn!(error = %e, "ignoring unreadable apartment cache");
                Vec::new()
            }
        };
        debug!(count = seeded.len(), "store seeded from cache");

        self.update(|state| {
            state.apartments = seeded;
            state.in_flight = 0;
            state.loading = false;
            state.last_error = None;
        });
    }

    // ── Operations ───────────────────────────────────────────────────

    /// Replace the collection with the server's list for `filter`.
    ///
    /// On failure the existing collection stays as it was: stale data is
    /// preferred over an empty list. Overlapping refreshes are not
    /// sequenced; whichever resolves last wins.
    pub async fn refresh(&self, filter: ListFilter) -> Result<(), CoreError> {
        self.update(CollectionState::begin_request);
        debug!(?filter, "refreshing apartments");

        match self.remote.list(filter).await {
            Ok(apartments) => {
                debug!(count = apartments.len(), "apartments refreshed");
                self.settle(|state| {
                    state.apartments = apartments;
                    false
                });
                Ok(())
            }
            Err(err) => Err(self.fail(err)),
        }
    }

    /// Fetch one apartment by id and make it the selection. The collection
    /// is left alone.
    pub async fn fetch_selected(&self, id: &ApartmentId) -> Result<Apartment, CoreError> {
        self.update(CollectionState::begin_request);

        match self.remote.get(id).await {
            Ok(apartment) => {
                self.settle(|state| {
                    state.selected = Some(apartment.clone());
                    false
                });
                Ok(apartment)
            }
            Err(err) => Err(self.fail(err)),
        }
    }

    /// Validate `draft`, create it remotely, append the server's record.
    pub async fn create(&self, draft: &ApartmentDraft) -> Result<Apartment, CoreError> {
        self.validate(draft)?;
        self.update(CollectionState::begin_request);

        match self.remote.create(draft).await {
            Ok(created) => {
                info!(id = %created.id, "apartment created");
                self.settle(|state| {
                    state.apartments.push(created.clone());
                    true
                });
                Ok(created)
            }
            Err(err) => Err(self.fail(err)),
        }
    }

    /// Validate `draft` and update apartment `id` in place.
    ///
    /// The target must be in the current collection; if it is not (it was
    /// removed meanwhile) a `NotInCollection` error is recorded and no
    /// request is sent.
    pub async fn edit(&self, id: &ApartmentId, draft: &ApartmentDraft) -> Result<Apartment, CoreError> {
        self.validate(draft)?;
        if !self.state.borrow().contains(id) {
            return Err(self.record(CoreError::NotInCollection { id: id.to_string() }));
        }
        self.update(CollectionState::begin_request);

        match self.remote.update(id, draft).await {
            Ok(updated) => {
                info!(%id, "apartment updated");
                self.settle(|state| {
                    if state.selected.as_ref().is_some_and(|s| &s.id == id) {
                        state.selected = Some(updated.clone());
                    }
                    match state.apartments.iter_mut().find(|a| &a.id == id) {
                        Some(slot) => {
                            *slot = updated.clone();
                            true
                        }
                        None => {
                            warn!(%id, "updated apartment left the collection before the response arrived");
                            false
                        }
                    }
                });
                Ok(updated)
            }
            Err(err) => Err(self.fail(err)),
        }
    }

    /// Delete apartment `id` remotely, then drop it from the collection.
    pub async fn remove(&self, id: &ApartmentId) -> Result<(), CoreError> {
        self.update(CollectionState::begin_request);

        match self.remote.remove(id).await {
            Ok(()) => {
                info!(%id, "apartment removed");
                self.settle(|state| {
                    state.apartments.retain(|a| &a.id != id);
                    if state.selected.as_ref().is_some_and(|s| &s.id == id) {
                        state.selected = None;
                    }
                    true
                });
                Ok(())
            }
            Err(err) => Err(self.fail(err)),
        }
    }

    /// Set or clear the selection. Local only; also drops leftover field
    /// errors from a previous edit session.
    pub fn select(&self, apartment: Option<Apartment>) {
        self.update(|state| {
            state.selected = apartment;
            if state.last_error.as_ref().is_some_and(CoreError::is_validation) {
                state.last_error = None;
            }
        });
    }

    // ── Private helpers ──────────────────────────────────────────────

    fn update(&self, apply: impl FnOnce(&mut CollectionState)) {
        self.state.send_modify(|snap| apply(Arc::make_mut(snap)));
    }

    /// Finish a successful request. `apply` returns whether the collection
    /// changed in a way the cache must mirror; the cache is written inside
    /// the same step so it never sees a half-applied state.
    ///
    /// The write is synchronous and runs under the watch channel's write
    /// lock, so a file-backed cache blocks readers and the calling runtime
    /// worker for the duration of the `fs::write` and rename.
    fn settle(&self, apply: impl FnOnce(&mut CollectionState) -> bool) {
        self.update(|state| {
            state.end_request();
            if apply(state) {
                if let Err(e) = self.cache.save(&state.apartments) {
                    warn!(error = %e, "failed to persist apartment cache");
                }
            }
        });
    }

    /// Finish a failed request, recording the error.
    fn fail(&self, err: CoreError) -> CoreError {
        warn!(error = %err, "apartment request failed");
        self.update(|state| {
            state.end_request();
            state.last_error = Some(err.clone());
        });
        err
    }

    /// Record a failure that never reached the network.
    fn record(&self, err: CoreError) -> CoreError {
        debug!(error = %err, "apartment operation rejected locally");
        self.update(|state| state.last_error = Some(err.clone()));
        err
    }

    fn validate(&self, draft: &ApartmentDraft) -> Result<(), CoreError> {
        validate_draft(draft).map_err(|violations| self.record(violations.into()))
    }
}
