//! Clock arithmetic and time-of-day classification.
//!
//! Times are minutes from midnight. A value may exceed 24 hours so that
//! late-night activities (a bar crawl ending at 01:30) keep a monotonic
//! clock within their day; arithmetic saturates rather than wrapping.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::place::PlaceCategory;

/// Start of the scheduling day (08:00).
pub const MORNING_START: ClockTime = ClockTime::from_hm(8, 0);
/// Threshold at which a time counts as afternoon (14:00).
pub const AFTERNOON_START: ClockTime = ClockTime::from_hm(14, 0);
/// Threshold at which a time counts as evening (17:00).
pub const EVENING_START: ClockTime = ClockTime::from_hm(17, 0);
/// Threshold at which a time counts as night (21:00).
pub const NIGHT_START: ClockTime = ClockTime::from_hm(21, 0);
/// Latest start for anything other than nightlife (23:00).
pub const DAY_END: ClockTime = ClockTime::from_hm(23, 0);

/// A time of day in minutes from midnight.
///
/// Parses from and displays as `HH:MM`.
///
/// # Examples
/// ```
/// use tripweaver_core::ClockTime;
///
/// let t: ClockTime = "09:15".parse()?;
/// assert_eq!(t.minutes(), 555);
/// assert_eq!(t.to_string(), "09:15");
/// # Ok::<(), tripweaver_core::ClockTimeError>(())
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClockTime(u16);

impl ClockTime {
    /// Construct from raw minutes since midnight.
    #[must_use]
    pub const fn from_minutes(minutes: u16) -> Self {
        Self(minutes)
    }

    /// Construct from an hour and minute pair.
    ///
    /// # Examples
    /// ```
    /// use tripweaver_core::ClockTime;
    ///
    /// assert_eq!(ClockTime::from_hm(12, 30).minutes(), 750);
    /// ```
    #[must_use]
    pub const fn from_hm(hours: u16, minutes: u16) -> Self {
        Self(hours.saturating_mul(60).saturating_add(minutes))
    }

    /// Minutes since midnight.
    #[must_use]
    pub const fn minutes(self) -> u16 {
        self.0
    }

    /// The time `minutes` later, saturating at the representable maximum.
    #[must_use]
    pub const fn plus(self, minutes: u16) -> Self {
        Self(self.0.saturating_add(minutes))
    }

    /// Minutes elapsed from `self` to `later`; zero when `later` is earlier.
    #[must_use]
    pub const fn until(self, later: Self) -> u16 {
        later.0.saturating_sub(self.0)
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.0 / 60, self.0 % 60)
    }
}

/// Errors returned when parsing a [`ClockTime`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ClockTimeError {
    /// The value was not in `HH:MM` form.
    #[error("expected a HH:MM clock time, got {value:?}")]
    Format {
        /// The rejected input.
        value: String,
    },
    /// The minute component was not in `0..=59`.
    #[error("minute component {minutes} out of range in {value:?}")]
    MinutesOutOfRange {
        /// The rejected input.
        value: String,
        /// The offending minute component.
        minutes: u16,
    },
}

impl FromStr for ClockTime {
    type Err = ClockTimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let format_err = || ClockTimeError::Format {
            value: s.to_owned(),
        };
        let (hours, minutes) = s.split_once(':').ok_or_else(format_err)?;
        let hours: u16 = hours.trim().parse().map_err(|_| format_err())?;
        let minutes: u16 = minutes.trim().parse().map_err(|_| format_err())?;
        if minutes >= 60 {
            return Err(ClockTimeError::MinutesOutOfRange {
                value: s.to_owned(),
                minutes,
            });
        }
        Ok(Self::from_hm(hours, minutes))
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for ClockTime {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for ClockTime {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}

/// Coarse bucket of the day a time falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum TimeSlot {
    /// Before 14:00.
    Morning,
    /// 14:00 to 16:59.
    Afternoon,
    /// 17:00 to 20:59.
    Evening,
    /// 21:00 onwards.
    Night,
}

impl TimeSlot {
    /// Classify a clock time into its bucket.
    ///
    /// # Examples
    /// ```
    /// use tripweaver_core::{ClockTime, TimeSlot};
    ///
    /// assert_eq!(TimeSlot::of(ClockTime::from_hm(9, 0)), TimeSlot::Morning);
    /// assert_eq!(TimeSlot::of(ClockTime::from_hm(18, 30)), TimeSlot::Evening);
    /// ```
    #[must_use]
    pub const fn of(time: ClockTime) -> Self {
        if time.minutes() < AFTERNOON_START.minutes() {
            Self::Morning
        } else if time.minutes() < EVENING_START.minutes() {
            Self::Afternoon
        } else if time.minutes() < NIGHT_START.minutes() {
            Self::Evening
        } else {
            Self::Night
        }
    }
}

/// When a place is best visited.
///
/// Variant order is the scheduling order: flexible places slot between
/// afternoon and evening preferences, so a plain derived `Ord` gives the
/// scheduler its sort key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum TimePreference {
    /// Schedule before midday where possible.
    Morning,
    /// Schedule from 14:00.
    Afternoon,
    /// No preference; scheduled wherever the clock has room.
    Flexible,
    /// Schedule from 17:00.
    Evening,
    /// Schedule from 21:00.
    Night,
}

impl TimePreference {
    /// Derive a preference from a free-text hint and the place category.
    ///
    /// Keyword matching happens here, at the knowledge boundary, so the
    /// scheduler only ever sees the typed preference. The hint wins over
    /// the category except that nightlife venues with no matching keyword
    /// default to night.
    ///
    /// # Examples
    /// ```
    /// use tripweaver_core::{PlaceCategory, TimePreference};
    ///
    /// let pref = TimePreference::infer(Some("best at sunset"), PlaceCategory::Beach);
    /// assert_eq!(pref, TimePreference::Evening);
    /// assert_eq!(
    ///     TimePreference::infer(None, PlaceCategory::Fort),
    ///     TimePreference::Morning,
    /// );
    /// ```
    #[must_use]
    pub fn infer(hint: Option<&str>, category: PlaceCategory) -> Self {
        let hint = hint.unwrap_or_default().to_lowercase();
        if hint.contains("morning") || hint.contains("sunrise") {
            return Self::Morning;
        }
        if hint.contains("evening") || hint.contains("sunset") {
            return Self::Evening;
        }
        if hint.contains("night") || category == PlaceCategory::Nightlife {
            return Self::Night;
        }
        if hint.contains("afternoon") {
            return Self::Afternoon;
        }
        match category {
            PlaceCategory::Fort | PlaceCategory::Landmark => Self::Morning,
            PlaceCategory::Beach => Self::Evening,
            PlaceCategory::Nightlife => Self::Night,
            _ => Self::Flexible,
        }
    }

    /// Earliest start the preference imposes, if any.
    ///
    /// Morning and flexible places take whatever the running clock offers.
    #[must_use]
    pub const fn start_floor(self) -> Option<ClockTime> {
        match self {
            Self::Afternoon => Some(AFTERNOON_START),
            Self::Evening => Some(EVENING_START),
            Self::Night => Some(NIGHT_START),
            Self::Morning | Self::Flexible => None,
        }
    }
}
