//! Itinerary assembly across the full trip.
//!
//! `ItineraryPlanner` drives clustering and per-day scheduling: cluster
//! the visitable places, reorder each multi-place day through the
//! [`RouteOptimizer`] seam, schedule every calendar day, then fold the
//! days into a route polyline and trip summary.

use thiserror::Error;

use tripweaver_core::itinerary::{DayItinerary, GeneratedItinerary, TripSummary};
use tripweaver_core::optimizer::{NearestNeighbourOptimizer, RouteOptimizer};
use tripweaver_core::place::{PlaceCategory, PlaceKnowledge};
use tripweaver_core::trip::{PlanRequest, PlanRequestError};

use crate::cluster::cluster_into_days;
use crate::schedule::build_day;

/// Errors returned by [`ItineraryPlanner::plan`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PlanError {
    /// The request failed validation, e.g. an empty place set.
    #[error("invalid plan request: {0}")]
    InvalidRequest(#[from] PlanRequestError),
}

/// Build complete itineraries from researched place knowledge.
///
/// Generic over the route-optimization seam so tests can pin the visit
/// order and deployments can swap in a smarter optimizer.
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use geo::Coord;
/// use tripweaver_core::{PlaceCategory, PlaceKnowledge, PlanRequest, TripDates};
/// use tripweaver_planner::ItineraryPlanner;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let start = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
/// let dates = TripDates::new(start, start)?;
/// let fort = PlaceKnowledge::new(
///     "Aguada Fort",
///     Coord { x: 73.7735, y: 15.4920 },
///     PlaceCategory::Fort,
///     90,
/// );
/// let request = PlanRequest::new(vec![fort], dates, None)?;
/// let itinerary = ItineraryPlanner::default().plan(&request)?;
/// assert_eq!(itinerary.days.len(), 1);
/// assert_eq!(itinerary.summary.places_visited, 1);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ItineraryPlanner<O: RouteOptimizer> {
    optimizer: O,
}

impl Default for ItineraryPlanner<NearestNeighbourOptimizer> {
    fn default() -> Self {
        Self::new(NearestNeighbourOptimizer)
    }
}

impl<O: RouteOptimizer> ItineraryPlanner<O> {
    /// Construct a planner around the given optimizer.
    #[must_use]
    pub const fn new(optimizer: O) -> Self {
        Self { optimizer }
    }

    /// Plan the whole trip.
    ///
    /// Scheduling itself has no failure paths; the only error is a
    /// request that fails validation.
    pub fn plan(&self, request: &PlanRequest) -> Result<GeneratedItinerary, PlanError> {
        request.validate()?;

        let num_days = request.dates.day_count();
        let visitable: Vec<PlaceKnowledge> = request
            .places
            .iter()
            .filter(|p| p.category != PlaceCategory::Accommodation)
            .cloned()
            .collect();
        let clusters = cluster_into_days(&visitable, num_days as usize);

        let mut days = Vec::with_capacity(num_days as usize);
        for index in 0..num_days {
            let day_number = index + 1;
            let mut day_places = clusters.get(index as usize).cloned().unwrap_or_default();
            if day_places.len() > 1 {
                day_places = self.reorder(day_places, day_number);
            }
            days.push(build_day(
                day_number,
                request.dates.date_of(index),
                &day_places,
                request.budget.as_ref(),
                num_days,
            ));
        }

        let route = days
            .iter()
            .flat_map(|day| day.visits().map(|visit| visit.location))
            .collect();
        let summary = summarize(&request.places, &days, num_days);

        Ok(GeneratedItinerary {
            days,
            route,
            summary,
        })
    }

    /// Apply the optimizer's ordering, keeping the input order when the
    /// returned permutation violates the contract.
    fn reorder(&self, day_places: Vec<PlaceKnowledge>, day_number: u32) -> Vec<PlaceKnowledge> {
        let order = self.optimizer.optimize(&day_places);
        if is_permutation(&order, day_places.len()) {
            order
                .into_iter()
                .map(|idx| day_places[idx].clone())
                .collect()
        } else {
            log::warn!(
                "route optimizer returned an invalid order for day {day_number}; keeping input order"
            );
            day_places
        }
    }
}

fn is_permutation(order: &[usize], len: usize) -> bool {
    if order.len() != len {
        return false;
    }
    let mut seen = vec![false; len];
    for &idx in order {
        if idx >= len || seen[idx] {
            return false;
        }
        seen[idx] = true;
    }
    true
}

/// Categories a rounded trip is expected to cover.
const RECOMMENDED_CATEGORIES: [PlaceCategory; 3] = [
    PlaceCategory::Beach,
    PlaceCategory::Restaurant,
    PlaceCategory::Landmark,
];

fn summarize(places: &[PlaceKnowledge], days: &[DayItinerary], num_days: u32) -> TripSummary {
    let total_cost = days.iter().fold(0_u32, |acc, d| acc.saturating_add(d.cost));
    let places_visited = days.iter().map(|d| d.visits().count()).sum::<usize>();
    let travel_km: f64 = days.iter().map(|d| d.travel_km).sum();
    let total_fatigue: i32 = days.iter().map(|d| d.fatigue).sum();
    let average_daily_fatigue =
        (f64::from(total_fatigue) / f64::from(num_days.max(1))).round() as i32;

    let missing_categories = RECOMMENDED_CATEGORIES
        .into_iter()
        .filter(|category| !places.iter().any(|p| p.category == *category))
        .collect();

    TripSummary {
        days: num_days,
        total_cost,
        places_visited: u32::try_from(places_visited).unwrap_or(u32::MAX),
        travel_km: tripweaver_core::distance::round_to_tenth(travel_km),
        average_daily_fatigue,
        missing_categories,
    }
}

#[cfg(test)]
mod tests;
