//! Game calendar: the game date, crop-of-the-day rotation and the session countdown.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::Serialize;

use crate::domain::session_ttl;

pub const CROPS: [&str; 15] = [
  "Rice", "Wheat", "Cotton", "Sugarcane", "Maize",
  "Potato", "Tomato", "Onion", "Soybean", "Groundnut",
  "Mustard", "Chilli", "Turmeric", "Banana", "Mango",
];

/// Calendar-day key (UTC) partitioning bundles and sessions.
pub fn game_date(now: DateTime<Utc>) -> NaiveDate {
  now.date_naive()
}

/// Rotates through `CROPS` by day of year.
pub fn crop_for_date(date: NaiveDate) -> &'static str {
  CROPS[date.ordinal() as usize % CROPS.len()]
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeRemaining {
  pub hours: i64,
  pub minutes: i64,
  pub seconds: i64,
  pub total_seconds: i64,
  pub expires_at: DateTime<Utc>,
  pub is_expired: bool,
}

/// Countdown to the end of a session created at `created_at`.
pub fn time_remaining(created_at: DateTime<Utc>, now: DateTime<Utc>) -> TimeRemaining {
  let expires_at = created_at + session_ttl();
  let total_seconds = (expires_at - now).num_seconds().max(0);
  TimeRemaining {
    hours: total_seconds / 3600,
    minutes: (total_seconds % 3600) / 60,
    seconds: total_seconds % 60,
    total_seconds,
    expires_at,
    is_expired: total_seconds == 0,
  }
}
