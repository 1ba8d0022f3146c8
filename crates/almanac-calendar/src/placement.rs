//! Vertical geometry for events in timed (week/day) views.
//!
//! Offsets and heights are in minutes since midnight; the rendering layer
//! maps minutes to pixels.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::CalendarError;
use crate::grid::day_start;
use crate::types::Event;

/// Minimum rendered duration in minutes. Shorter or zero-length events are
/// stretched to this so they stay visible and clickable.
pub const MIN_VISIBLE_MINUTES: i64 = 30;

/// Where an event sits within one day's column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventPlacement {
    pub event_id: String,
    /// Minutes since midnight at the event's visible start within the day.
    pub top_offset_minutes: i64,
    /// Visible duration in minutes, never below `MIN_VISIBLE_MINUTES`.
    pub height_minutes: i64,
}

/// Compute the geometry for `event` within `day`.
///
/// The visible window is the part of the event's effective interval that
/// falls inside the day: an event that started earlier begins at midnight
/// (offset 0), and one that ends later runs to the next midnight, so a fully
/// covered day measures 1440 minutes. The stored event is not modified.
///
/// # Errors
/// Returns `DateOutOfRange` if `day` has no representable next midnight.
pub fn place_event(event: &Event, day: NaiveDate) -> Result<EventPlacement, CalendarError> {
    let start_of_day = day_start(day);
    let next_midnight = start_of_day
        .checked_add_signed(Duration::days(1))
        .ok_or_else(|| CalendarError::out_of_range(day))?;

    let visible_start = event.effective_start().max(start_of_day);
    let visible_end = event.effective_end().min(next_midnight);

    let top_offset_minutes = (visible_start - start_of_day).num_minutes();
    let visible_end_minutes = (visible_end - start_of_day).num_minutes();
    let height_minutes = (visible_end_minutes - top_offset_minutes).max(MIN_VISIBLE_MINUTES);

    Ok(EventPlacement {
        event_id: event.id.clone(),
        top_offset_minutes,
        height_minutes,
    })
}

/// Minutes since midnight for the current-time indicator.
///
/// `Some` only when `day` is `now`'s calendar date; the indicator is not
/// drawn on any other day. Both inputs are explicit so the result never
/// depends on the ambient clock.
pub fn current_time_offset(now: DateTime<Utc>, day: NaiveDate) -> Option<i64> {
    if now.date_naive() != day {
        return None;
    }
    Some((now - day_start(day)).num_minutes())
}
