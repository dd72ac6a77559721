//! Visit-order optimization seam.
//!
//! The planner hands each multi-place day to a [`RouteOptimizer`] before
//! scheduling it. Implementations return a permutation of indices into the
//! input slice rather than reordered values, so the round trip needs no
//! name lookup and duplicate place names cannot corrupt the mapping.

use crate::distance::haversine_km;
use crate::place::PlaceKnowledge;

/// Reorder a day's places to reduce intra-day travel.
///
/// The returned vector must be a permutation of `0..places.len()`.
/// Callers treat a violated contract as a soft failure and keep the
/// input order, so implementations need not guard their output.
/// Optimizers must be `Send + Sync` to operate safely across threads.
///
/// # Examples
/// ```
/// use tripweaver_core::{PlaceKnowledge, RouteOptimizer};
///
/// struct Reverse;
///
/// impl RouteOptimizer for Reverse {
///     fn optimize(&self, places: &[PlaceKnowledge]) -> Vec<usize> {
///         (0..places.len()).rev().collect()
///     }
/// }
///
/// assert_eq!(Reverse.optimize(&[]), Vec::<usize>::new());
/// ```
pub trait RouteOptimizer: Send + Sync {
    /// Produce the visiting order as indices into `places`.
    fn optimize(&self, places: &[PlaceKnowledge]) -> Vec<usize>;
}

/// Greedy nearest-neighbour ordering starting from the first place.
///
/// Ties on distance keep the earlier index, so the ordering is
/// deterministic for a given input.
#[derive(Debug, Default, Clone, Copy)]
pub struct NearestNeighbourOptimizer;

impl RouteOptimizer for NearestNeighbourOptimizer {
    fn optimize(&self, places: &[PlaceKnowledge]) -> Vec<usize> {
        if places.len() < 2 {
            return (0..places.len()).collect();
        }

        let mut order = Vec::with_capacity(places.len());
        let mut visited = vec![false; places.len()];
        let mut current = 0_usize;
        visited[0] = true;
        order.push(0);

        while order.len() < places.len() {
            let mut nearest: Option<(usize, f64)> = None;
            for (idx, place) in places.iter().enumerate() {
                if visited[idx] {
                    continue;
                }
                let dist = haversine_km(places[current].location, place.location);
                if nearest.map_or(true, |(_, best)| dist < best) {
                    nearest = Some((idx, dist));
                }
            }
            let Some((next, _)) = nearest else { break };
            visited[next] = true;
            order.push(next);
            current = next;
        }

        order
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::Coord;
    use rstest::rstest;

    use crate::place::PlaceCategory;

    fn place_at(name: &str, x: f64, y: f64) -> PlaceKnowledge {
        PlaceKnowledge::new(name, Coord { x, y }, PlaceCategory::Landmark, 60)
    }

    #[rstest]
    #[case(Vec::new(), Vec::new())]
    #[case(vec![place_at("solo", 0.0, 0.0)], vec![0])]
    fn degenerate_inputs_pass_through(
        #[case] places: Vec<PlaceKnowledge>,
        #[case] expected: Vec<usize>,
    ) {
        assert_eq!(NearestNeighbourOptimizer.optimize(&places), expected);
    }

    #[test]
    fn chains_nearest_neighbours_from_the_first_place() {
        // Walking east from the origin: 0 -> 2 (0.1 deg) -> 1 (0.3 deg).
        let places = vec![
            place_at("start", 0.0, 0.0),
            place_at("far", 0.3, 0.0),
            place_at("near", 0.1, 0.0),
        ];
        assert_eq!(NearestNeighbourOptimizer.optimize(&places), vec![0, 2, 1]);
    }

    #[test]
    fn output_is_a_permutation() {
        let places: Vec<PlaceKnowledge> = (0..6)
            .map(|i| place_at(&format!("p{i}"), f64::from(i) * 0.05, 0.02))
            .collect();
        let mut order = NearestNeighbourOptimizer.optimize(&places);
        order.sort_unstable();
        assert_eq!(order, (0..6).collect::<Vec<_>>());
    }
}
