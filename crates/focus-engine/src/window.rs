//! Daily working-hours boundaries anchored in a timezone.

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use chrono_tz::Tz;

use crate::error::{FocusError, Result};
use crate::interval::Interval;

/// Spring-forward gaps are searched in quarter-hour steps, up to a day.
const GAP_STEP_MINUTES: i64 = 15;
const GAP_MAX_STEPS: i64 = 24 * 60 / GAP_STEP_MINUTES;

/// Working hours applied to every day, e.g. 09:00-17:00 in `Europe/Berlin`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkHours {
    start_hour: u32,
    end_hour: u32,
    timezone: Tz,
}

impl Default for WorkHours {
    fn default() -> Self {
        Self {
            start_hour: 9,
            end_hour: 17,
            timezone: Tz::UTC,
        }
    }
}

impl WorkHours {
    /// Requires `start_hour < end_hour <= 24`.
    pub fn new(start_hour: u32, end_hour: u32, timezone: Tz) -> Result<Self> {
        if start_hour >= end_hour || end_hour > 24 {
            return Err(FocusError::InvalidWorkHours(format!(
                "start hour {start_hour} must be before end hour {end_hour} (max 24)"
            )));
        }
        Ok(Self {
            start_hour,
            end_hour,
            timezone,
        })
    }

    /// Like [`WorkHours::new`] with the timezone given by IANA name.
    pub fn from_names(start_hour: u32, end_hour: u32, timezone: &str) -> Result<Self> {
        let tz: Tz = timezone
            .parse()
            .map_err(|_| FocusError::InvalidTimezone(timezone.to_string()))?;
        Self::new(start_hour, end_hour, tz)
    }

    pub fn start_hour(&self) -> u32 {
        self.start_hour
    }

    pub fn end_hour(&self) -> u32 {
        self.end_hour
    }

    pub fn timezone(&self) -> Tz {
        self.timezone
    }

    /// The local calendar date `instant` falls on.
    pub fn local_date(&self, instant: DateTime<Utc>) -> NaiveDate {
        instant.with_timezone(&self.timezone).date_naive()
    }

    /// The work window of a local calendar date.
    pub fn window_on(&self, date: NaiveDate) -> Result<WorkWindow> {
        let start = self.local_instant(date, self.start_hour)?;
        let end = self.local_instant(date, self.end_hour)?;
        let interval = Interval::new(start, end).ok_or_else(|| {
            FocusError::InvalidWorkHours(format!("empty work window on {date}"))
        })?;
        Ok(WorkWindow { date, interval })
    }

    fn local_instant(&self, date: NaiveDate, hour: u32) -> Result<DateTime<Utc>> {
        let local = date
            .and_hms_opt(0, 0, 0)
            .and_then(|midnight| midnight.checked_add_signed(Duration::hours(hour.into())))
            .ok_or_else(|| FocusError::DateOutOfRange(date.to_string()))?;
        // Ambiguous times (DST fall-back) resolve to the earlier instant.
        // Times skipped by a spring-forward gap move to the first wall time
        // after it, so 02:00 on a 02:00->03:00 day becomes 03:00.
        (0..=GAP_MAX_STEPS)
            .filter_map(|step| {
                local.checked_add_signed(Duration::minutes(step * GAP_STEP_MINUTES))
            })
            .find_map(|wall| self.timezone.from_local_datetime(&wall).earliest())
            .map(|dt| dt.with_timezone(&Utc))
            .ok_or_else(|| FocusError::NonexistentLocalTime(local.to_string()))
    }
}

/// The working-hours boundary of one calendar date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkWindow {
    pub date: NaiveDate,
    pub interval: Interval,
}
