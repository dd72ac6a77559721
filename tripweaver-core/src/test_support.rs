//! Test-only builders and collaborator stand-ins used by unit and
//! behaviour tests across the workspace.

use geo::Coord;

use crate::optimizer::RouteOptimizer;
use crate::place::{NearbyEatery, PlaceCategory, PlaceKnowledge};

/// Build a coordinate from longitude and latitude.
#[must_use]
pub fn coord(lon: f64, lat: f64) -> Coord<f64> {
    Coord { x: lon, y: lat }
}

/// Build a place with a 90-minute visit and no extras.
#[must_use]
pub fn place(name: &str, lon: f64, lat: f64, category: PlaceCategory) -> PlaceKnowledge {
    PlaceKnowledge::new(name, coord(lon, lat), category, 90)
}

/// Build a rated eatery near the given coordinate.
#[must_use]
pub fn eatery(name: &str, lon: f64, lat: f64, category: &str, rating: f32) -> NearbyEatery {
    NearbyEatery {
        name: name.to_owned(),
        location: coord(lon, lat),
        category: Some(category.to_owned()),
        rating: Some(rating),
        distance_km: Some(0.5),
    }
}

/// `RouteOptimizer` that keeps the input order.
#[derive(Debug, Default, Clone, Copy)]
pub struct IdentityOptimizer;

impl RouteOptimizer for IdentityOptimizer {
    fn optimize(&self, places: &[PlaceKnowledge]) -> Vec<usize> {
        (0..places.len()).collect()
    }
}

/// `RouteOptimizer` that violates its contract, for fallback tests.
#[derive(Debug, Default, Clone, Copy)]
pub struct BrokenOptimizer;

impl RouteOptimizer for BrokenOptimizer {
    fn optimize(&self, places: &[PlaceKnowledge]) -> Vec<usize> {
        vec![0; places.len()]
    }
}
