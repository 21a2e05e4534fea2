//! Geographic distance.
//!
//! Students and schools are positioned by latitude/longitude in degrees;
//! travel cost is the great-circle distance between them.

mod haversine;

pub use haversine::{haversine_km, GeoPoint, EARTH_RADIUS_KM};
