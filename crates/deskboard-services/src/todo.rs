//! Todo types shared by the file store, the API server and the HTTP client.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single todo item.
///
/// `id` is the 1-based position of the item in the collection. It is
/// reassigned whenever an earlier item is deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Todo {
    pub id: u64,
    pub text: String,
    pub done: bool,
    pub created: DateTime<Utc>,
    pub timer: Option<Timer>,
}

/// Countdown attached to a todo at creation time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Timer {
    pub minutes: f64,
    pub expires_at: DateTime<Utc>,
}

/// The expiry of a requested timer is not a representable timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Timer is out of range")]
pub struct TimerOutOfRange;

impl Timer {
    /// Build a timer expiring `minutes` after `now`.
    ///
    /// Returns `Ok(None)` unless `minutes` is a positive finite number.
    ///
    /// # Errors
    /// Returns [`TimerOutOfRange`] if the expiry overflows the calendar.
    pub fn try_starting_at(
        now: DateTime<Utc>,
        minutes: f64,
    ) -> Result<Option<Self>, TimerOutOfRange> {
        if !minutes.is_finite() || minutes <= 0.0 {
            return Ok(None);
        }

        let millis = (minutes * 60_000.0).round();
        if millis >= i64::MAX as f64 {
            return Err(TimerOutOfRange);
        }
        let expires_at = Duration::try_milliseconds(millis as i64)
            .and_then(|delta| now.checked_add_signed(delta))
            .ok_or(TimerOutOfRange)?;

        Ok(Some(Self {
            minutes,
            expires_at,
        }))
    }

    /// Like [`Timer::try_starting_at`], treating an out-of-range expiry as
    /// no timer.
    pub fn starting_at(now: DateTime<Utc>, minutes: f64) -> Option<Self> {
        Self::try_starting_at(now, minutes).ok().flatten()
    }

    /// Time left until expiry, clamped at zero.
    pub fn remaining(&self, now: DateTime<Utc>) -> Duration {
        (self.expires_at - now).max(Duration::zero())
    }
}

/// Request body for `POST /api/todos`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoCreateRequest {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timer_minutes: Option<f64>,
}
