//! Facade crate for the Tripweaver itinerary engine.
//!
//! This crate re-exports the core domain types and the planner so
//! applications can depend on a single crate.

#![forbid(unsafe_code)]

pub use tripweaver_core::{
    ActivityKind, Budget, ClockTime, ClockTimeError, CrowdLevel, DayItinerary, GeneratedItinerary,
    NearbyEatery, NearestNeighbourOptimizer, OpeningHours, PeakWindow, PeakWindowError,
    PlaceCategory, PlaceKnowledge, PlanRequest, PlanRequestError, Recommendation, RouteOptimizer,
    ScheduledActivity, TimePreference, TimeSlot, TravelLeg, TravelMode, TripDates, TripDatesError,
    TripSummary,
};

pub use tripweaver_planner::{ItineraryPlanner, PlanError};
