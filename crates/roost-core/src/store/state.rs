// ── Collection state ──
//
// The snapshot a front end renders. Owned by the store; consumers only
// ever see it behind an `Arc`.

use crate::error::CoreError;
use crate::model::{Apartment, ApartmentId};

/// Apartments in server order, the selection, and request-lifecycle flags.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollectionState {
    /// Ordered as the server returned them for the active filter; local
    /// creations are appended.
    pub apartments: Vec<Apartment>,
    /// The apartment being viewed or edited. A copy kept in step with the
    /// collection: edits of the same id refresh it, removal clears it.
    pub selected: Option<Apartment>,
    /// True while at least one request is outstanding.
    pub loading: bool,
    /// The failure from the most recent failed operation.
    pub last_error: Option<CoreError>,
    pub(crate) in_flight: usize,
}

impl CollectionState {
    pub fn find(&self, id: &ApartmentId) -> Option<&Apartment> {
        self.apartments.iter().find(|a| &a.id == id)
    }

    pub fn contains(&self, id: &ApartmentId) -> bool {
        self.find(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.apartments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.apartments.is_empty()
    }

    pub(crate) fn begin_request(&mut self) {
        self.in_flight += 1;
        self.loading = true;
        self.last_error = None;
    }

    pub(crate) fn end_request(&mut self) {
        self.in_flight = self.in_flight.saturating_sub(1);
        self.loading = self.in_flight > 0;
    }
}
