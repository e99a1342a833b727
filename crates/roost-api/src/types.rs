// Wire types for the `/apartments` collection resource.
//
// These mirror the JSON the server speaks. `roost-core` converts them into
// its domain model; nothing above this crate sees the wire shapes.

use serde::{Deserialize, Deserializer, Serialize};

/// An apartment as returned by `GET`, `POST` and `PUT`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApartmentResponse {
    /// Server-assigned identifier. Some backends emit Mongo-style `_id`
    /// or numeric keys; both are accepted and carried as a string.
    #[serde(alias = "_id", deserialize_with = "id_as_string")]
    pub id: String,
    pub name: String,
    pub rooms: i64,
    pub price: f64,
    #[serde(default)]
    pub description: String,
}

/// Request body for `POST /apartments` and `PUT /apartments/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApartmentBody {
    pub name: String,
    pub rooms: i64,
    pub price: f64,
    pub description: String,
}

/// Value of the `priceSort` query parameter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriceSort {
    #[default]
    Asc,
    Desc,
}

impl PriceSort {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Number(i64),
}

fn id_as_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(s) => s,
        RawId::Number(n) => n.to_string(),
    })
}
