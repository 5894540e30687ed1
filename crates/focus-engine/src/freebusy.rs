//! Compute free time within a window from a list of busy events.
//!
//! The window starts out as a single free interval; each busy event is then
//! subtracted from every interval produced so far. Events need not be sorted
//! or merged beforehand, since a subtraction only ever shrinks or splits the
//! intervals that survive.

use crate::interval::{BusyEvent, Interval};

/// Subtract one busy range from every interval of an ordered free list.
fn subtract_from_all(free: Vec<Interval>, busy: &Interval) -> Vec<Interval> {
    free.into_iter()
        .flat_map(|interval| interval.subtract(busy))
        .collect()
}

/// Free intervals of `window` not covered by any of `busy`.
///
/// Returns disjoint intervals sorted by start. Events with `end <= start`
/// carry no busy time and are ignored.
pub fn compute_free(window: Interval, busy: &[BusyEvent]) -> Vec<Interval> {
    busy.iter()
        .filter_map(BusyEvent::interval)
        .fold(vec![window], |free, interval| {
            subtract_from_all(free, &interval)
        })
}

/// Total free minutes across a free list.
pub fn free_minutes(free: &[Interval]) -> i64 {
    free.iter().map(|i| i.duration().num_minutes()).sum()
}
