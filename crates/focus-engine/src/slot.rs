//! First-fit slot search over free intervals.

use chrono::{DateTime, Duration, Utc};

use crate::interval::Interval;

/// Find the earliest slot of exactly `duration` inside `free`.
///
/// Intervals are scanned in ascending start order. With `earliest_start`
/// set, a candidate never begins before it. The first interval that can hold
/// the whole duration wins; no search for a tighter or later fit is made.
/// A non-positive duration finds nothing.
pub fn find_slot(
    free: &[Interval],
    duration: Duration,
    earliest_start: Option<DateTime<Utc>>,
) -> Option<Interval> {
    if duration <= Duration::zero() {
        return None;
    }

    let mut ordered: Vec<&Interval> = free.iter().collect();
    if !ordered.is_sorted_by_key(|i| i.start()) {
        ordered.sort_by_key(|i| i.start());
    }

    ordered.into_iter().find_map(|interval| {
        let start = match earliest_start {
            Some(floor) => interval.start().max(floor),
            None => interval.start(),
        };
        let end = start.checked_add_signed(duration)?;
        if end <= interval.end() {
            Interval::new(start, end)
        } else {
            None
        }
    })
}
