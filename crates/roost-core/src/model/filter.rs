// ── List filter ──

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Price ordering requested from the server.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum SortDirection {
    /// Lowest price first.
    #[default]
    Asc,
    /// Highest price first.
    Desc,
}

/// Sort direction plus optional room-count restriction for `list`/`refresh`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ListFilter {
    pub sort: SortDirection,
    /// `None` means no restriction.
    pub rooms: Option<i64>,
}

impl ListFilter {
    pub fn new(sort: SortDirection) -> Self {
        Self { sort, rooms: None }
    }

    /// Restrict to a room count. Zero or negative counts clear the
    /// restriction, matching an emptied "filter by rooms" input.
    pub fn with_rooms(mut self, rooms: Option<i64>) -> Self {
        self.rooms = rooms.filter(|n| *n > 0);
        self
    }
}
