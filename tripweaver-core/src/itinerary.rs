//! Assembled itineraries: days, route and trip summary.

use chrono::NaiveDate;
use geo::Coord;

use crate::activity::ScheduledActivity;
use crate::place::PlaceCategory;

/// A suggested addition for a category the day does not cover.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Recommendation {
    /// Name of the suggested place.
    pub name: String,
    /// Category the suggestion fills.
    pub category: PlaceCategory,
    /// Position, `x = longitude`, `y = latitude`.
    pub location: Coord<f64>,
    /// Distance from the researched place it was found near, if known.
    #[cfg_attr(feature = "serde", serde(default))]
    pub distance_km: Option<f64>,
    /// Human-readable reason for the suggestion.
    pub reason: String,
    /// Confidence in the suggestion, `0.0..=1.0`.
    pub score: f32,
}

/// One calendar day of the trip.
///
/// Activities are ordered by start time; visits never overlap one
/// another, though a meal slotted at a fixed time may straddle a visit.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DayItinerary {
    /// One-based day number.
    pub day: u32,
    /// Calendar date of this day.
    pub date: NaiveDate,
    /// Time-ordered visits, travel legs and meals.
    pub activities: Vec<ScheduledActivity>,
    /// Fatigue accumulated by visits and travel.
    pub fatigue: i32,
    /// Cost of visits and meals in the trip currency.
    pub cost: u32,
    /// Distance covered between the day's visits in kilometres.
    pub travel_km: f64,
    /// Up to three suggestions for uncovered categories.
    pub recommendations: Vec<Recommendation>,
}

impl DayItinerary {
    /// Iterate over the day's visit activities.
    pub fn visits(&self) -> impl Iterator<Item = &ScheduledActivity> {
        self.activities.iter().filter(|a| a.is_visit())
    }
}

/// Trip-level statistics.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TripSummary {
    /// Number of days in the trip.
    pub days: u32,
    /// Total cost across all days.
    pub total_cost: u32,
    /// Count of scheduled visit activities.
    pub places_visited: u32,
    /// Total distance travelled between visits in kilometres.
    pub travel_km: f64,
    /// Fatigue per day, averaged and rounded; a daily intensity metric,
    /// deliberately not a plain sum like the cost field.
    pub average_daily_fatigue: i32,
    /// Recommended categories absent from the researched place set.
    pub missing_categories: Vec<PlaceCategory>,
}

/// The full planning output.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeneratedItinerary {
    /// One entry per calendar day, in date order.
    pub days: Vec<DayItinerary>,
    /// All visit coordinates in schedule order, for map rendering.
    pub route: Vec<Coord<f64>>,
    /// Trip-level statistics.
    pub summary: TripSummary,
}
