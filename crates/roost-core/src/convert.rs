// ── API-to-domain type conversions ──
//
// Bridges raw `roost_api` wire types into canonical `roost_core::model`
// types and back. Wire shapes never leak past this module.

use roost_api::{ApartmentBody, ApartmentResponse, PriceSort};

use crate::model::{Apartment, ApartmentDraft, ApartmentId, SortDirection};

impl From<ApartmentResponse> for Apartment {
    fn from(r: ApartmentResponse) -> Self {
        Self {
            id: ApartmentId::from(r.id),
            name: r.name,
            rooms: r.rooms,
            price: r.price,
            description: r.description,
        }
    }
}

impl From<&ApartmentDraft> for ApartmentBody {
    fn from(d: &ApartmentDraft) -> Self {
        Self {
            name: d.name.clone(),
            rooms: d.rooms,
            price: d.price,
            description: d.description.clone(),
        }
    }
}

impl From<SortDirection> for PriceSort {
    fn from(sort: SortDirection) -> Self {
        match sort {
            SortDirection::Asc => Self::Asc,
            SortDirection::Desc => Self::Desc,
        }
    }
}
