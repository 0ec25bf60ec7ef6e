//! Calendar-day normalization for collection records.

use chrono::{DateTime, NaiveDate, NaiveTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

/// A calendar day on the collection schedule.
///
/// Payments have date-only semantics but are stored as timestamps, so every
/// day-scoped operation needs a consistent window: records are written at a
/// canonical time-of-day and queried between the start and end of the day.
/// Centralizing the normalization here keeps range queries from drifting
/// across day boundaries.
///
/// ## Examples
///
/// ```
/// use gullak_core::CollectionDay;
///
/// let day: CollectionDay = "2026-08-05".parse().unwrap();
/// assert_eq!(day.to_string(), "2026-08-05");
/// assert!(day.start_of_day() < day.deposit_time());
/// assert!(day.deposit_time() < day.end_of_day());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CollectionDay(NaiveDate);

impl CollectionDay {
    /// Create a `CollectionDay` from a calendar date.
    #[must_use]
    pub const fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// The calendar day a timestamp falls on.
    #[must_use]
    pub fn from_datetime(at: DateTime<Utc>) -> Self {
        Self(at.date_naive())
    }

    /// Get the underlying calendar date.
    #[must_use]
    pub const fn date(self) -> NaiveDate {
        self.0
    }

    /// Midnight at the start of this day (00:00:00.000 UTC).
    #[must_use]
    pub fn start_of_day(self) -> DateTime<Utc> {
        self.0.and_time(NaiveTime::MIN).and_utc()
    }

    /// The last representable instant of this day (23:59:59.999 UTC).
    #[must_use]
    pub fn end_of_day(self) -> DateTime<Utc> {
        self.start_of_day() + TimeDelta::days(1) - TimeDelta::milliseconds(1)
    }

    /// The canonical time-of-day at which a payment for this day is stored
    /// (12:00:00 UTC), safely inside the day window at either boundary.
    #[must_use]
    pub fn deposit_time(self) -> DateTime<Utc> {
        self.start_of_day() + TimeDelta::hours(12)
    }
}

impl core::fmt::Display for CollectionDay {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl core::str::FromStr for CollectionDay {
    type Err = chrono::ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").map(Self)
    }
}

impl From<NaiveDate> for CollectionDay {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}
