//! Heuristic itinerary construction for the Tripweaver engine.
//!
//! Places are clustered into day-sized geographic groups, each day is
//! scheduled against a running clock with travel legs and meals, and the
//! days fold into a [`GeneratedItinerary`](tripweaver_core::GeneratedItinerary)
//! with a route polyline and trip summary. Every unsatisfiable constraint
//! degrades by omission; the only error is an invalid request.

#![forbid(unsafe_code)]

pub mod cluster;
pub mod planner;
pub mod schedule;

pub use planner::{ItineraryPlanner, PlanError};
