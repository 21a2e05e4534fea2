//! Haversine great-circle distance.
//!
//! # References
//!
//! - Sinnott (1984), "Virtues of the Haversine", *Sky and Telescope* 68(2)

/// Mean Earth radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// A position on the Earth's surface, in degrees.
///
/// # Examples
///
/// ```
/// use u_allocation::distance::GeoPoint;
///
/// let a = GeoPoint::new(-23.5505, -46.6333);
/// assert_eq!(a.distance_km(&a), 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeoPoint {
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lon: f64,
}

impl GeoPoint {
    /// Creates a point from latitude and longitude in degrees.
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Great-circle distance to `other` in kilometers.
    pub fn distance_km(&self, other: &GeoPoint) -> f64 {
        haversine_km(*self, *other)
    }
}

/// Great-circle distance between two points in kilometers.
///
/// Uses the haversine formula with a spherical Earth of radius
/// [`EARTH_RADIUS_KM`]. Inputs are not range-checked: NaN coordinates
/// yield NaN.
///
/// # Complexity
/// O(1)
pub fn haversine_km(a: GeoPoint, b: GeoPoint) -> f64 {
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lon = (b.lon - a.lon).to_radians();
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    EARTH_RADIUS_KM * c
}
