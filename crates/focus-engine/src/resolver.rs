//! Focus-window resolution: today first, then tomorrow.
//!
//! The resolver walks a fixed search plan of days. Each day gets a fresh work
//! window, its busy events are fetched, free time is computed, and the first
//! slot that fits is suggested. Only today's search is floored at `now`;
//! tomorrow's whole window is eligible.

use chrono::{DateTime, Days, Duration, Utc};
use serde::ser::{SerializeStruct, Serializer};
use serde::Serialize;

use crate::error::{FocusError, Result, StoreError};
use crate::freebusy::compute_free;
use crate::interval::{BusyEvent, Interval};
use crate::slot::find_slot;
use crate::store::EventStore;
use crate::window::{WorkHours, WorkWindow};

/// Reason given when no day in the search plan has room.
pub const NO_SLOT_REASON: &str =
    "No open block in today/tomorrow work hours. Try a shorter duration or widen hours.";

/// One day of the search plan.
#[derive(Debug, Clone, Copy)]
struct SearchDay {
    /// Days after the local date of `now`.
    offset: u64,
    /// Whether candidates must not start before `now`.
    floor_at_now: bool,
    /// Prepended to the suggestion reason.
    reason_prefix: &'static str,
}

const SEARCH_PLAN: [SearchDay; 2] = [
    SearchDay {
        offset: 0,
        floor_at_now: true,
        reason_prefix: "",
    },
    SearchDay {
        offset: 1,
        floor_at_now: false,
        reason_prefix: "No slot today — suggesting tomorrow. ",
    },
];

/// A suggested focus slot with a human-readable justification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Suggestion {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub reason: String,
}

/// Outcome of one resolution. Running out of room is not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Suggested(Suggestion),
    NoSlot { reason: String },
}

/// Serializes as `{"ok": true, "suggestion": {..}}` or
/// `{"ok": false, "reason": ".."}`.
impl Serialize for Resolution {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut body = serializer.serialize_struct("Resolution", 2)?;
        match self {
            Resolution::Suggested(suggestion) => {
                body.serialize_field("ok", &true)?;
                body.serialize_field("suggestion", suggestion)?;
            }
            Resolution::NoSlot { reason } => {
                body.serialize_field("ok", &false)?;
                body.serialize_field("reason", reason)?;
            }
        }
        body.end()
    }
}

impl Resolution {
    pub fn suggestion(&self) -> Option<&Suggestion> {
        match self {
            Resolution::Suggested(s) => Some(s),
            Resolution::NoSlot { .. } => None,
        }
    }
}

/// A planned search: the window, its floor and the reason prefix.
struct Attempt {
    window: WorkWindow,
    floor: Option<DateTime<Utc>>,
    reason_prefix: &'static str,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct FocusWindowResolver {
    hours: WorkHours,
}

impl FocusWindowResolver {
    pub fn new(hours: WorkHours) -> Self {
        Self { hours }
    }

    pub fn hours(&self) -> &WorkHours {
        &self.hours
    }

    /// Suggest a focus slot of `duration`, fetching busy events from `store`.
    ///
    /// The store is queried once per searched day, and tomorrow is only
    /// fetched when today has no room. Store failures are returned as-is;
    /// a partial busy list could double-book.
    pub async fn resolve<S>(
        &self,
        store: &S,
        duration: Duration,
        now: DateTime<Utc>,
    ) -> Result<Resolution>
    where
        S: EventStore + ?Sized,
    {
        for day in SEARCH_PLAN {
            let attempt = self.plan(day, now)?;
            let busy = store.list_events(&attempt.window.interval).await?;
            if let Some(found) = search(&attempt, &busy, duration) {
                return Ok(found);
            }
        }
        Ok(no_slot())
    }

    /// Synchronous [`resolve`](Self::resolve) with a caller-supplied lookup of
    /// the busy events inside a work window.
    pub fn resolve_with<F>(
        &self,
        duration: Duration,
        now: DateTime<Utc>,
        mut busy_for: F,
    ) -> Result<Resolution>
    where
        F: FnMut(&WorkWindow) -> std::result::Result<Vec<BusyEvent>, StoreError>,
    {
        for day in SEARCH_PLAN {
            let attempt = self.plan(day, now)?;
            let busy = busy_for(&attempt.window)?;
            if let Some(found) = search(&attempt, &busy, duration) {
                return Ok(found);
            }
        }
        Ok(no_slot())
    }

    fn plan(&self, day: SearchDay, now: DateTime<Utc>) -> Result<Attempt> {
        let today = self.hours.local_date(now);
        let date = today
            .checked_add_days(Days::new(day.offset))
            .ok_or_else(|| FocusError::DateOutOfRange(format!("{today} + {} days", day.offset)))?;
        Ok(Attempt {
            window: self.hours.window_on(date)?,
            floor: day.floor_at_now.then_some(now),
            reason_prefix: day.reason_prefix,
        })
    }
}

fn search(attempt: &Attempt, busy: &[BusyEvent], duration: Duration) -> Option<Resolution> {
    let free = compute_free(attempt.window.interval, busy);
    let slot = find_slot(&free, duration, attempt.floor);
    tracing::debug!(
        date = %attempt.window.date,
        busy = busy.len(),
        free = free.len(),
        found = slot.is_some(),
        "searched work window"
    );
    slot.map(|slot| Resolution::Suggested(suggestion(slot, duration, attempt.reason_prefix)))
}

fn suggestion(slot: Interval, duration: Duration, prefix: &str) -> Suggestion {
    Suggestion {
        start: slot.start(),
        end: slot.end(),
        reason: format!(
            "{prefix}Best {}-min focus window based on your calendar.",
            duration.num_minutes()
        ),
    }
}

fn no_slot() -> Resolution {
    Resolution::NoSlot {
        reason: NO_SLOT_REASON.to_string(),
    }
}
