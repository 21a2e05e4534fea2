//! School records.

use crate::distance::GeoPoint;

/// A school building. Classrooms refer to schools by index.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct School {
    /// External school identifier.
    pub id: i64,
    /// Building location.
    pub location: GeoPoint,
}

impl School {
    /// Creates a school at `(lat, lon)`.
    pub fn new(id: i64, lat: f64, lon: f64) -> Self {
        Self {
            id,
            location: GeoPoint::new(lat, lon),
        }
    }
}
