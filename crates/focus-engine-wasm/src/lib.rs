//! WASM bindings for focus-engine.
//!
//! Exposes free-time computation, first-fit slot search and focus-window
//! suggestions to JavaScript via `wasm-bindgen`, so the dashboard can preview
//! suggestions without a server round trip. All complex types are passed as
//! JSON strings.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p focus-engine-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target web --out-dir pkg/ \
//!   target/wasm32-unknown-unknown/release/focus_engine_wasm.wasm
//! ```

use chrono::{DateTime, Duration, Utc};
use focus_engine::{
    parse_timestamp, DurationBounds, FocusWindowResolver, Interval, MemoryEventStore, WorkHours,
};
use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

// ---------------------------------------------------------------------------
// Serde-friendly DTOs for crossing the WASM boundary as JSON
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct IntervalDto {
    start: String,
    end: String,
    duration_minutes: i64,
}

impl From<&Interval> for IntervalDto {
    fn from(i: &Interval) -> Self {
        Self {
            start: i.start().to_rfc3339(),
            end: i.end().to_rfc3339(),
            duration_minutes: i.duration().num_minutes(),
        }
    }
}

/// Input format for intervals passed from JavaScript.
#[derive(Deserialize)]
struct IntervalInput {
    start: String,
    end: String,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Parse a timestamp with [`focus_engine::parse_timestamp`], the same rules
/// applied to event JSON.
fn parse_datetime(s: &str) -> Result<DateTime<Utc>, JsValue> {
    parse_timestamp(s)
        .map_err(|e| JsValue::from_str(&format!("Invalid datetime '{}': {}", s, e)))
}

fn parse_window(start: &str, end: &str) -> Result<Interval, JsValue> {
    Interval::new(parse_datetime(start)?, parse_datetime(end)?)
        .ok_or_else(|| JsValue::from_str("Window start must be before window end"))
}

/// Convert a JSON array of `{start, end}` objects into non-empty intervals.
/// Entries with `end <= start` are dropped.
fn parse_intervals_json(json: &str) -> Result<Vec<Interval>, JsValue> {
    let inputs: Vec<IntervalInput> = serde_json::from_str(json)
        .map_err(|e| JsValue::from_str(&format!("Invalid intervals JSON: {}", e)))?;

    let mut intervals = Vec::with_capacity(inputs.len());
    for input in inputs {
        let start = parse_datetime(&input.start)?;
        let end = parse_datetime(&input.end)?;
        intervals.extend(Interval::new(start, end));
    }
    Ok(intervals)
}

fn to_json<T: Serialize>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

// ---------------------------------------------------------------------------
// WASM exports
// ---------------------------------------------------------------------------

/// Compute the free intervals of a window given busy events.
///
/// `events_json` is a JSON array of event objects with `start` and `end`
/// (other fields are ignored). Returns a JSON array of
/// `{start, end, duration_minutes}` objects sorted by start.
#[wasm_bindgen(js_name = "computeFree")]
pub fn compute_free(
    events_json: &str,
    window_start: &str,
    window_end: &str,
) -> Result<String, JsValue> {
    let store = MemoryEventStore::from_json(events_json)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    let window = parse_window(window_start, window_end)?;

    let free = focus_engine::compute_free(window, &store.events_in(&window));

    let dtos: Vec<IntervalDto> = free.iter().map(IntervalDto::from).collect();
    to_json(&dtos)
}

/// Find the earliest slot of `duration_minutes` in a list of free intervals.
///
/// Returns a JSON `{start, end, duration_minutes}` object, or `null` when no
/// interval fits.
#[wasm_bindgen(js_name = "findSlot")]
pub fn find_slot(
    free_json: &str,
    duration_minutes: u32,
    earliest_start: Option<String>,
) -> Result<String, JsValue> {
    let free = parse_intervals_json(free_json)?;
    let floor = earliest_start.as_deref().map(parse_datetime).transpose()?;

    let slot = focus_engine::find_slot(&free, Duration::minutes(duration_minutes.into()), floor);

    to_json(&slot.as_ref().map(IntervalDto::from))
}

/// Suggest a focus window today, or tomorrow if today has no room.
///
/// `events_json` should cover both days. `duration_minutes` is clamped to
/// 15-240 (0 means the 60-minute default). Returns the same JSON body as
/// `GET /api/focus/suggest`: `{ok: true, suggestion: {start, end, reason}}`
/// or `{ok: false, reason}`.
#[wasm_bindgen(js_name = "suggestFocusWindow")]
pub fn suggest_focus_window(
    events_json: &str,
    duration_minutes: i32,
    now: &str,
    start_hour: u32,
    end_hour: u32,
    timezone: &str,
) -> Result<String, JsValue> {
    let store = MemoryEventStore::from_json(events_json)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    let now = parse_datetime(now)?;
    let hours = WorkHours::from_names(start_hour, end_hour, timezone)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    let duration = DurationBounds::default().clamp(Some(duration_minutes.into()));

    let resolution = FocusWindowResolver::new(hours)
        .resolve_with(duration, now, |window| Ok(store.events_in(&window.interval)))
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

    to_json(&resolution)
}
