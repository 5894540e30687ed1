//! # focus-engine
//!
//! Free-time computation and focus-window suggestions for a personal calendar.
//!
//! Given a day's busy events, the engine subtracts them from a working-hours
//! window, finds the earliest slot that can hold a requested duration, and
//! falls back to the next day when today has no room. Everything here is a
//! pure computation except the event-store fetch, which goes through the
//! [`EventStore`] trait.
//!
//! ## Modules
//!
//! - [`interval`] — Half-open intervals, overlap and subtraction
//! - [`freebusy`] — Free intervals of a window minus busy events
//! - [`slot`] — First-fit slot search with an optional start floor
//! - [`window`] — Working hours anchored to a local date and timezone
//! - [`duration`] — Clamping of requested focus durations
//! - [`resolver`] — Today-then-tomorrow focus-window resolution
//! - [`store`] — Event-store trait and an in-memory store
//! - [`error`] — Error types

pub mod duration;
pub mod error;
pub mod freebusy;
pub mod interval;
pub mod resolver;
pub mod slot;
pub mod store;
pub mod window;

pub use duration::DurationBounds;
pub use error::{FocusError, StoreError};
pub use freebusy::compute_free;
pub use interval::{parse_timestamp, BusyEvent, Interval};
pub use resolver::{FocusWindowResolver, Resolution, Suggestion, NO_SLOT_REASON};
pub use slot::find_slot;
pub use store::{EventStore, MemoryEventStore};
pub use window::{WorkHours, WorkWindow};
