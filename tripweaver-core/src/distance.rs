//! Great-circle distance and centroid helpers.
//!
//! Coordinates follow the workspace convention of `x = longitude` and
//! `y = latitude`, both in degrees. The haversine here fixes the Earth
//! radius at 6371 km rather than deferring to a geodesy library, so
//! distances are stable across dependency upgrades.

use geo::Coord;

/// Mean Earth radius in kilometres used by [`haversine_km`].
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance between two coordinates in kilometres.
///
/// Pure and total: callers must supply finite in-range coordinates;
/// behaviour outside that is not a contract.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use tripweaver_core::distance::haversine_km;
///
/// let panaji = Coord { x: 73.8278, y: 15.4989 };
/// let margao = Coord { x: 73.9862, y: 15.2832 };
/// let km = haversine_km(panaji, margao);
/// assert!((km - 29.5).abs() < 1.0);
/// ```
#[must_use]
pub fn haversine_km(from: Coord<f64>, to: Coord<f64>) -> f64 {
    let lat_from = from.y.to_radians();
    let lat_to = to.y.to_radians();
    let d_lat = (to.y - from.y).to_radians();
    let d_lon = (to.x - from.x).to_radians();

    let a = (d_lat / 2.0).sin().powi(2)
        + lat_from.cos() * lat_to.cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_KM * c
}

/// Arithmetic mean of a set of coordinates; the origin when empty.
#[must_use]
pub fn centroid(coords: &[Coord<f64>]) -> Coord<f64> {
    if coords.is_empty() {
        return Coord { x: 0.0, y: 0.0 };
    }
    let count = coords.len() as f64;
    let sum = coords.iter().fold(Coord { x: 0.0, y: 0.0 }, |acc, c| Coord {
        x: acc.x + c.x,
        y: acc.y + c.y,
    });
    Coord {
        x: sum.x / count,
        y: sum.y / count,
    }
}

/// Round a distance to one decimal place for presentation totals.
#[must_use]
pub fn round_to_tenth(km: f64) -> f64 {
    (km * 10.0).round() / 10.0
}
