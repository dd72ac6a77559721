//! Scheduled units within a day: visits, travel legs and meals.

use geo::Coord;

use crate::place::PlaceCategory;
use crate::time::{ClockTime, TimeSlot};

/// What kind of schedule entry an activity is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ActivityKind {
    /// Time spent at a place.
    Visit,
    /// Moving between two consecutive visits.
    Travel,
    /// A planned food stop.
    Meal,
}

/// How a travel leg is covered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum TravelMode {
    /// Hired car for longer hops.
    Car,
    /// Auto-rickshaw for short hops.
    Auto,
}

/// How busy a place is expected to be at the scheduled start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum CrowdLevel {
    /// Outside any known peak.
    Low,
    /// Within an hour of a peak starting.
    Medium,
    /// Inside a known peak window.
    High,
}

/// The moving part of a travel activity.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TravelLeg {
    /// Great-circle distance in kilometres, rounded to one decimal.
    pub distance_km: f64,
    /// Pure travel time in minutes, before any waiting at the far end.
    pub minutes: u16,
    /// Chosen mode: car beyond 5 km, auto-rickshaw otherwise.
    pub mode: TravelMode,
}

/// One scheduled unit within a day.
///
/// Immutable once emitted by the scheduler; the containing
/// [`DayItinerary`](crate::DayItinerary) carries the aggregates.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScheduledActivity {
    /// One-based day number; matches the containing day's number.
    pub day: u32,
    /// Display name ("Aguada Fort", "Travel to Palolem Beach", "Spice Garden Cafe").
    pub name: String,
    /// Category of the visited place; `Destination` for travel legs,
    /// `Restaurant` for meals.
    pub category: PlaceCategory,
    /// Position of the destination, `x = longitude`, `y = latitude`.
    pub location: Coord<f64>,
    /// Visit, travel or meal.
    pub kind: ActivityKind,
    /// Bucket the start time falls into.
    pub slot: TimeSlot,
    /// Start of the activity.
    pub start: ClockTime,
    /// End of the activity.
    pub end: ClockTime,
    /// Span in minutes; for travel this includes waiting on a later
    /// time-of-day floor at the destination.
    pub minutes: u16,
    /// Fatigue contribution; negative for meals.
    pub fatigue: i16,
    /// Estimated cost in the trip currency.
    pub cost: u32,
    /// Expected crowding, visits only.
    #[cfg_attr(feature = "serde", serde(default))]
    pub crowd: Option<CrowdLevel>,
    /// Why this slot suits the place, or the meal label.
    #[cfg_attr(feature = "serde", serde(default))]
    pub note: Option<String>,
    /// Travel detail, travel legs only.
    #[cfg_attr(feature = "serde", serde(default))]
    pub travel: Option<TravelLeg>,
}

impl ScheduledActivity {
    /// Whether this entry is a visit.
    #[must_use]
    pub fn is_visit(&self) -> bool {
        self.kind == ActivityKind::Visit
    }
}
