//! Great-circle distance between geographic points

use crate::model::GeoPoint;

/// Mean Earth radius in kilometers
const MEAN_EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine distance between two points, in kilometers.
///
/// Symmetric, and zero exactly when both points coincide.
pub fn haversine(a: GeoPoint, b: GeoPoint) -> f64 {
    let lat1 = f64::from(a.y());
    let lat2 = f64::from(b.y());
    let delta_lat = (lat2 - lat1).to_radians();
    let delta_lon = (f64::from(b.x()) - f64::from(a.x())).to_radians();

    let h = (delta_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (delta_lon / 2.0).sin().powi(2);
    2.0 * MEAN_EARTH_RADIUS_KM * h.sqrt().asin()
}
