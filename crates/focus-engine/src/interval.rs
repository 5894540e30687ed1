//! Half-open time intervals and interval subtraction.
//!
//! An [`Interval`] covers `[start, end)`. Two intervals that merely touch
//! (`a.end == b.start`) do NOT overlap, so back-to-back events leave no gap
//! and produce no conflict.

use chrono::{DateTime, Duration, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Parse an ISO 8601 timestamp into `DateTime<Utc>`.
///
/// Accepts RFC 3339 with an offset (e.g. "2026-03-02T09:00:00+01:00") and
/// naive times without one (e.g. "2026-03-02T09:00:00"), which are taken as UTC.
pub fn parse_timestamp(s: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    match DateTime::parse_from_rfc3339(s) {
        Ok(dt) => Ok(dt.with_timezone(&Utc)),
        Err(_) => {
            NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f").map(|ndt| ndt.and_utc())
        }
    }
}

fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw)
        .map_err(|e| serde::de::Error::custom(format!("invalid timestamp '{raw}': {e}")))
}

/// A non-empty half-open time range `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Interval {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl Interval {
    /// Build an interval, or `None` when `start >= end`.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Option<Self> {
        (start < end).then_some(Self { start, end })
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start <= instant && instant < self.end
    }

    /// True unless one interval ends at or before the other starts.
    pub fn overlaps(&self, other: &Interval) -> bool {
        !(self.end <= other.start || self.start >= other.end)
    }

    /// Remove `busy` from `self`, returning the 0, 1, or 2 remaining pieces in
    /// time order.
    ///
    /// - No overlap: `[self]` unchanged.
    /// - `busy` covers `self`: `[]`.
    /// - `busy` clips one edge: the surviving side.
    /// - `busy` strictly inside: left remainder, then right remainder.
    ///
    /// Zero-length remainders are never produced.
    pub fn subtract(&self, busy: &Interval) -> Vec<Interval> {
        if !self.overlaps(busy) {
            return vec![*self];
        }

        let left = Interval::new(self.start, busy.start);
        let right = Interval::new(busy.end, self.end);
        left.into_iter().chain(right).collect()
    }
}

/// A calendar event as seen by the resolver: only its time range matters.
///
/// Deserializes from any event record carrying `start` and `end`; title,
/// category and other fields are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusyEvent {
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub start: DateTime<Utc>,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub end: DateTime<Utc>,
}

impl BusyEvent {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    /// The occupied range, or `None` for an event with `end <= start`.
    pub fn interval(&self) -> Option<Interval> {
        Interval::new(self.start, self.end)
    }

    /// Whether any part of the event falls inside `range`.
    pub fn intersects(&self, range: &Interval) -> bool {
        self.start < range.end() && self.end > range.start()
    }
}

impl From<Interval> for BusyEvent {
    fn from(interval: Interval) -> Self {
        Self::new(interval.start, interval.end)
    }
}
