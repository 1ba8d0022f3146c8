//! Event types and wire-format decoding.

use chrono::{DateTime, NaiveDateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::CalendarError;

/// Color applied when the service omits one.
pub const DEFAULT_EVENT_COLOR: &str = "#4285F4";

/// The (name, hex) palette offered by the event editor.
pub const EVENT_COLORS: [(&str, &str); 8] = [
    ("Tomato", "#D50000"),
    ("Flamingo", "#E67C73"),
    ("Tangerine", "#F4511E"),
    ("Banana", "#F6BF26"),
    ("Sage", "#33B679"),
    ("Basil", "#0B8043"),
    ("Peacock", "#039BE5"),
    ("Blueberry", "#3F51B5"),
];

/// Last second of a day. Day intervals are inclusive on both ends.
pub(crate) const DAY_END: NaiveTime = match NaiveTime::from_hms_opt(23, 59, 59) {
    Some(t) => t,
    // 23:59:59 is always a valid time
    None => NaiveTime::MIN,
};

/// Calendar event as consumed by the projector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub all_day: bool,
    pub kind: EventKind,
    pub color: String,
}

/// Event category.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Event,
    Task,
    Reminder,
}

impl Default for EventKind {
    fn default() -> Self {
        Self::Event
    }
}

impl Event {
    /// Start instant used for overlap testing.
    ///
    /// All-day events snap to the start of their first day regardless of the
    /// stored time-of-day.
    pub fn effective_start(&self) -> DateTime<Utc> {
        if self.all_day {
            self.start.date_naive().and_time(NaiveTime::MIN).and_utc()
        } else {
            self.start
        }
    }

    /// End instant used for overlap testing.
    ///
    /// All-day events extend to the last second of their final day.
    pub fn effective_end(&self) -> DateTime<Utc> {
        if self.all_day {
            self.end.date_naive().and_time(DAY_END).and_utc()
        } else {
            self.end
        }
    }

    /// True when the stored interval is impossible (`end` before `start`).
    pub fn is_malformed(&self) -> bool {
        self.end < self.start
    }
}

// API Response Types

/// Event as returned by the events service.
#[derive(Debug, Deserialize)]
pub struct ApiEvent {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub start_time: String,
    pub end_time: String,
    #[serde(default)]
    pub all_day: bool,
    pub event_type: Option<String>,
    pub color: Option<String>,
}

impl Event {
    /// Convert a service response to a local Event.
    ///
    /// # Errors
    /// Returns `CalendarError::InvalidEventData` when a timestamp cannot be
    /// parsed. A bad timestamp is never replaced with a substitute date.
    pub fn from_api(api: ApiEvent) -> Result<Self, CalendarError> {
        let start = parse_instant(&api.start_time)?;
        let end = parse_instant(&api.end_time)?;

        let kind = match api.event_type.as_deref() {
            Some("task") => EventKind::Task,
            Some("reminder") => EventKind::Reminder,
            _ => EventKind::Event,
        };

        Ok(Self {
            id: api.id.to_string(),
            title: api.title,
            description: api.description,
            start,
            end,
            all_day: api.all_day,
            kind,
            color: api.color.unwrap_or_else(|| DEFAULT_EVENT_COLOR.to_string()),
        })
    }
}

/// Parse a service timestamp.
///
/// Accepts RFC 3339 and the zoneless `YYYY-MM-DDTHH:MM:SS` form older
/// records use; zoneless times are taken as UTC.
fn parse_instant(raw: &str) -> Result<DateTime<Utc>, CalendarError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S") {
        return Ok(naive.and_utc());
    }
    Err(CalendarError::InvalidEventData(format!(
        "unparseable timestamp: {}",
        raw
    )))
}
