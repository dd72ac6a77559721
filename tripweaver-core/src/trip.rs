//! Trip parameters: date range, optional budget and the plan request.
//!
//! Constructors validate early so downstream planning can stay
//! panic-free; the planner itself re-checks via [`PlanRequest::validate`]
//! before doing any work.

use chrono::{Days, NaiveDate};
use thiserror::Error;

use crate::place::PlaceKnowledge;

/// A validated inclusive date range.
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use tripweaver_core::TripDates;
///
/// # fn main() -> Result<(), tripweaver_core::TripDatesError> {
/// let start = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
/// let end = NaiveDate::from_ymd_opt(2026, 3, 4).unwrap();
/// let dates = TripDates::new(start, end)?;
/// assert_eq!(dates.day_count(), 3);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TripDates {
    start: NaiveDate,
    end: NaiveDate,
}

/// Errors returned by [`TripDates::new`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TripDatesError {
    /// The end date precedes the start date.
    #[error("trip end {end} precedes start {start}")]
    EndBeforeStart {
        /// Requested start date.
        start: NaiveDate,
        /// Requested end date.
        end: NaiveDate,
    },
}

impl TripDates {
    /// Validate and construct a date range; `start == end` is a one-day trip.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, TripDatesError> {
        if end < start {
            return Err(TripDatesError::EndBeforeStart { start, end });
        }
        Ok(Self { start, end })
    }

    /// First day of the trip.
    #[must_use]
    pub const fn start(&self) -> NaiveDate {
        self.start
    }

    /// Last day of the trip.
    #[must_use]
    pub const fn end(&self) -> NaiveDate {
        self.end
    }

    /// Inclusive number of calendar days covered.
    #[must_use]
    pub fn day_count(&self) -> u32 {
        let span = (self.end - self.start).num_days();
        u32::try_from(span).unwrap_or(u32::MAX).saturating_add(1)
    }

    /// Date of the zero-based `day_index`th day.
    ///
    /// Indexes past the range saturate at the end date.
    #[must_use]
    pub fn date_of(&self, day_index: u32) -> NaiveDate {
        if day_index >= self.day_count() {
            return self.end;
        }
        self.start
            .checked_add_days(Days::new(u64::from(day_index)))
            .unwrap_or(self.end)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for TripDates {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(serde::Deserialize)]
        struct Raw {
            start: NaiveDate,
            end: NaiveDate,
        }
        let raw = Raw::deserialize(deserializer)?;
        Self::new(raw.start, raw.end).map_err(serde::de::Error::custom)
    }
}

/// Overall trip budget used to scale cost estimates.
///
/// Only consulted when a place has no known entry fee.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Budget {
    /// Total amount for the whole trip.
    pub total: u32,
    /// Currency tag, e.g. `INR`; informational only.
    pub currency: String,
    /// Whether `total` is per traveller rather than for the group.
    pub per_person: bool,
}

/// Everything the planner needs for one run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlanRequest {
    /// Researched places to plan around.
    pub places: Vec<PlaceKnowledge>,
    /// Trip date range.
    pub dates: TripDates,
    /// Optional budget for cost scaling.
    #[cfg_attr(feature = "serde", serde(default))]
    pub budget: Option<Budget>,
}

/// Errors returned by [`PlanRequest::new`] and [`PlanRequest::validate`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PlanRequestError {
    /// No places were supplied.
    #[error("plan request must include at least one place")]
    EmptyPlaces,
}

impl PlanRequest {
    /// Validate and construct a request.
    pub fn new(
        places: Vec<PlaceKnowledge>,
        dates: TripDates,
        budget: Option<Budget>,
    ) -> Result<Self, PlanRequestError> {
        let request = Self {
            places,
            dates,
            budget,
        };
        request.validate()?;
        Ok(request)
    }

    /// Re-check the request invariants; fields are public, so planners
    /// call this before trusting them.
    pub fn validate(&self) -> Result<(), PlanRequestError> {
        if self.places.is_empty() {
            return Err(PlanRequestError::EmptyPlaces);
        }
        Ok(())
    }
}
