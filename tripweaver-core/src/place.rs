//! Researched knowledge about places worth visiting.
//!
//! [`PlaceKnowledge`] is the read-only input to planning: an upstream
//! research step resolves names, hours, fees and nearby food options, and
//! this subsystem trusts those fields as given.

use std::fmt;
use std::str::FromStr;

use geo::Coord;
use thiserror::Error;

use crate::time::{ClockTime, TimePreference};

/// Closed set of place categories the planner understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum PlaceCategory {
    /// Sand, sea and sunsets.
    Beach,
    /// Forts and similar historic strongholds.
    Fort,
    /// Monuments, viewpoints and other named sights.
    Landmark,
    /// Paid experiences: water sports, cruises, tours.
    Activity,
    /// Bars, clubs and late venues.
    Nightlife,
    /// Sit-down food stops planned as visits in their own right.
    Restaurant,
    /// A town or area visited for itself.
    Destination,
    /// Hotels and stays; never scheduled as a visit.
    Accommodation,
}

impl PlaceCategory {
    /// Fatigue a visit of this category adds to the day.
    ///
    /// Restaurants are restful and carry a negative impact.
    #[must_use]
    pub const fn fatigue(self) -> i16 {
        match self {
            Self::Beach | Self::Destination | Self::Accommodation => 20,
            Self::Fort => 35,
            Self::Landmark => 25,
            Self::Activity => 40,
            Self::Nightlife => 30,
            Self::Restaurant => -5,
        }
    }

    /// Flat cost estimate used when no entry fee and no budget are known.
    #[must_use]
    pub const fn default_cost(self) -> u32 {
        match self {
            Self::Beach => 0,
            Self::Fort => 100,
            Self::Landmark => 150,
            Self::Activity => 500,
            Self::Nightlife => 1000,
            Self::Restaurant => 400,
            Self::Destination | Self::Accommodation => 100,
        }
    }

    /// Fraction of one day's budget a visit of this category consumes.
    #[must_use]
    pub const fn budget_share(self) -> f64 {
        match self {
            Self::Beach => 0.0,
            Self::Fort | Self::Destination => 0.02,
            Self::Landmark => 0.03,
            Self::Activity => 0.1,
            Self::Nightlife => 0.2,
            Self::Restaurant => 0.08,
            Self::Accommodation => 0.05,
        }
    }
}

/// Daily opening window of a place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OpeningHours {
    /// Opening time.
    pub open: ClockTime,
    /// Closing time; earlier than `open` for venues open past midnight.
    pub close: ClockTime,
}

impl OpeningHours {
    /// Whether the place is open at `time`, handling overnight windows.
    ///
    /// # Examples
    /// ```
    /// use tripweaver_core::{ClockTime, OpeningHours};
    ///
    /// let bar = OpeningHours {
    ///     open: ClockTime::from_hm(18, 0),
    ///     close: ClockTime::from_hm(2, 0),
    /// };
    /// assert!(bar.is_open_at(ClockTime::from_hm(23, 30)));
    /// assert!(bar.is_open_at(ClockTime::from_hm(1, 0)));
    /// assert!(!bar.is_open_at(ClockTime::from_hm(12, 0)));
    /// ```
    #[must_use]
    pub fn is_open_at(&self, time: ClockTime) -> bool {
        if self.close < self.open {
            time >= self.open || time < self.close
        } else {
            time >= self.open && time < self.close
        }
    }
}

/// A busy period, e.g. `11:00-14:00`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeakWindow {
    /// Start of the busy period.
    pub start: ClockTime,
    /// End of the busy period (inclusive when judging crowds).
    pub end: ClockTime,
}

/// Errors returned when parsing a [`PeakWindow`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PeakWindowError {
    /// The value was not in `HH:MM-HH:MM` form.
    #[error("expected a HH:MM-HH:MM window, got {value:?}")]
    Format {
        /// The rejected input.
        value: String,
    },
    /// One of the two clock times failed to parse.
    #[error("invalid clock time in peak window: {0}")]
    Time(#[from] crate::time::ClockTimeError),
}

impl FromStr for PeakWindow {
    type Err = PeakWindowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (start, end) = s.split_once('-').ok_or_else(|| PeakWindowError::Format {
            value: s.to_owned(),
        })?;
        Ok(Self {
            start: start.trim().parse()?,
            end: end.trim().parse()?,
        })
    }
}

impl fmt::Display for PeakWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for PeakWindow {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for PeakWindow {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}

/// A food option near a researched place.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NearbyEatery {
    /// Display name; also the dedup key across a day's meals.
    pub name: String,
    /// Position, `x = longitude`, `y = latitude`.
    pub location: Coord<f64>,
    /// Free-form venue kind from the research source ("cafe", "restaurant").
    #[cfg_attr(feature = "serde", serde(default))]
    pub category: Option<String>,
    /// Rating out of five, when the source had one.
    #[cfg_attr(feature = "serde", serde(default))]
    pub rating: Option<f32>,
    /// Distance from the researched place in kilometres.
    #[cfg_attr(feature = "serde", serde(default))]
    pub distance_km: Option<f64>,
}

impl NearbyEatery {
    /// Whether the source labelled this venue a cafe.
    #[must_use]
    pub fn is_cafe(&self) -> bool {
        self.category
            .as_deref()
            .is_some_and(|kind| kind.to_lowercase().contains("cafe"))
    }
}

/// Structured research output for one point of interest.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use tripweaver_core::{PlaceCategory, PlaceKnowledge, TimePreference};
///
/// let fort = PlaceKnowledge::new(
///     "Aguada Fort",
///     Coord { x: 73.7735, y: 15.4920 },
///     PlaceCategory::Fort,
///     90,
/// );
/// assert_eq!(fort.preferred_time(), TimePreference::Morning);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlaceKnowledge {
    /// Display name, unique within a planning run.
    pub name: String,
    /// Position, `x = longitude`, `y = latitude`.
    pub location: Coord<f64>,
    /// Category driving fatigue, cost and time-of-day defaults.
    pub category: PlaceCategory,
    /// Typical visit duration in minutes.
    pub visit_minutes: u16,
    /// Known entry fee; `None` falls back to category estimates.
    #[cfg_attr(feature = "serde", serde(default))]
    pub entry_fee: Option<u32>,
    /// Opening window; `None` means assume open all day.
    #[cfg_attr(feature = "serde", serde(default))]
    pub opening_hours: Option<OpeningHours>,
    /// Free-text best-time-to-visit hint from the research source.
    #[cfg_attr(feature = "serde", serde(default))]
    pub best_time: Option<String>,
    /// Known busy periods used for crowd tagging.
    #[cfg_attr(feature = "serde", serde(default))]
    pub peak_hours: Vec<PeakWindow>,
    /// Food options near this place, feeding the meal planner.
    #[cfg_attr(feature = "serde", serde(default))]
    pub nearby_eateries: Vec<NearbyEatery>,
}

impl PlaceKnowledge {
    /// Construct a place with the required fields and no extras.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        location: Coord<f64>,
        category: PlaceCategory,
        visit_minutes: u16,
    ) -> Self {
        Self {
            name: name.into(),
            location,
            category,
            visit_minutes,
            entry_fee: None,
            opening_hours: None,
            best_time: None,
            peak_hours: Vec::new(),
            nearby_eateries: Vec::new(),
        }
    }

    /// Set the entry fee while consuming `self`, enabling chaining.
    #[must_use]
    pub fn with_entry_fee(mut self, fee: u32) -> Self {
        self.entry_fee = Some(fee);
        self
    }

    /// Set the opening window while consuming `self`.
    #[must_use]
    pub fn with_opening_hours(mut self, open: ClockTime, close: ClockTime) -> Self {
        self.opening_hours = Some(OpeningHours { open, close });
        self
    }

    /// Set the best-time hint while consuming `self`.
    #[must_use]
    pub fn with_best_time(mut self, hint: impl Into<String>) -> Self {
        self.best_time = Some(hint.into());
        self
    }

    /// Append a nearby eatery while consuming `self`.
    #[must_use]
    pub fn with_eatery(mut self, eatery: NearbyEatery) -> Self {
        self.nearby_eateries.push(eatery);
        self
    }

    /// The typed time-of-day preference for this place.
    #[must_use]
    pub fn preferred_time(&self) -> TimePreference {
        TimePreference::infer(self.best_time.as_deref(), self.category)
    }
}
