// ── Remote collection seam ──
//
// The store talks to the server only through `ApartmentRemote`, so tests
// can substitute an in-process fake. The production implementation is the
// HTTP client from `roost-api`.

use std::future::Future;

use roost_api::{ApartmentBody, ApartmentClient};

use crate::error::CoreError;
use crate::model::{Apartment, ApartmentDraft, ApartmentId, ListFilter};

/// CRUD access to the remote apartment collection.
///
/// One request per call. Implementations report every failure and never
/// retry.
pub trait ApartmentRemote: Send + Sync {
    /// Apartments sorted by price in `filter.sort` order, restricted to
    /// `filter.rooms` when set.
    fn list(
        &self,
        filter: ListFilter,
    ) -> impl Future<Output = Result<Vec<Apartment>, CoreError>> + Send;

    fn get(&self, id: &ApartmentId) -> impl Future<Output = Result<Apartment, CoreError>> + Send;

    fn create(
        &self,
        draft: &ApartmentDraft,
    ) -> impl Future<Output = Result<Apartment, CoreError>> + Send;

    fn update(
        &self,
        id: &ApartmentId,
        draft: &ApartmentDraft,
    ) -> impl Future<Output = Result<Apartment, CoreError>> + Send;

    fn remove(&self, id: &ApartmentId) -> impl Future<Output = Result<(), CoreError>> + Send;
}

impl ApartmentRemote for ApartmentClient {
    async fn list(&self, filter: ListFilter) -> Result<Vec<Apartment>, CoreError> {
        let apartments = self
            .list_apartments(filter.sort.into(), filter.rooms)
            .await?;
        Ok(apartments.into_iter().map(Apartment::from).collect())
    }

    async fn get(&self, id: &ApartmentId) -> Result<Apartment, CoreError> {
        self.get_apartment(id.as_str())
            .await
            .map(Apartment::from)
            .map_err(|e| CoreError::from_api(e, Some(id.as_str())))
    }

    async fn create(&self, draft: &ApartmentDraft) -> Result<Apartment, CoreError> {
        let body = ApartmentBody::from(draft);
        Ok(self.create_apartment(&body).await?.into())
    }

    async fn update(&self, id: &ApartmentId, draft: &ApartmentDraft) -> Result<Apartment, CoreError> {
        let body = ApartmentBody::from(draft);
        self.update_apartment(id.as_str(), &body)
            .await
            .map(Apartment::from)
            .map_err(|e| CoreError::from_api(e, Some(id.as_str())))
    }

    async fn remove(&self, id: &ApartmentId) -> Result<(), CoreError> {
        self.delete_apartment(id.as_str())
            .await
            .map_err(|e| CoreError::from_api(e, Some(id.as_str())))
    }
}
