//! Clamping of requested focus durations.

use chrono::Duration;
use serde::{Deserialize, Serialize};

/// Accepted range for a requested focus duration, in minutes.
///
/// Out-of-range requests are corrected, never rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DurationBounds {
    pub min_minutes: i64,
    pub max_minutes: i64,
    pub default_minutes: i64,
}

impl Default for DurationBounds {
    fn default() -> Self {
        Self {
            min_minutes: 15,
            max_minutes: 240,
            default_minutes: 60,
        }
    }
}

impl DurationBounds {
    /// Clamp a requested number of minutes into range.
    ///
    /// A missing or zero request falls back to `default_minutes` before
    /// clamping.
    pub fn clamp_minutes(&self, requested: Option<i64>) -> i64 {
        let minutes = match requested {
            Some(m) if m != 0 => m,
            _ => self.default_minutes,
        };
        minutes.clamp(self.min_minutes, self.max_minutes)
    }

    /// Parse a raw query value and clamp it. Anything unparseable counts as
    /// missing.
    pub fn clamp_raw(&self, raw: Option<&str>) -> i64 {
        let requested = raw.and_then(|s| s.trim().parse::<f64>().ok()).and_then(|m| {
            // Truncation toward zero; NaN and infinities are treated as missing.
            m.is_finite().then_some(m.trunc() as i64)
        });
        self.clamp_minutes(requested)
    }

    pub fn clamp(&self, requested: Option<i64>) -> Duration {
        Duration::minutes(self.clamp_minutes(requested))
    }

    /// Whether `min <= default <= max` and the minimum is positive.
    pub fn is_valid(&self) -> bool {
        self.min_minutes > 0
            && self.min_minutes <= self.max_minutes
            && (self.min_minutes..=self.max_minutes).contains(&self.default_minutes)
    }
}
