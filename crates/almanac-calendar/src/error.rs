//! Calendar-specific error types.

use chrono::NaiveDate;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CalendarError {
    #[error("Invalid event data: {0}")]
    InvalidEventData(String),

    #[error("Date out of range: {0}")]
    DateOutOfRange(String),

    #[error("Event source error: {0}")]
    Source(String),
}

impl CalendarError {
    /// Out-of-range error for a date computation near `reference`.
    pub fn out_of_range(reference: NaiveDate) -> Self {
        Self::DateOutOfRange(format!("date arithmetic overflow near {}", reference))
    }

    /// Create a source error.
    pub fn source(message: impl Into<String>) -> Self {
        Self::Source(message.into())
    }

    /// User-friendly error message for UI display.
    pub fn user_message(&self) -> String {
        match self {
            Self::InvalidEventData(msg) => format!("Invalid event: {}", msg),
            Self::DateOutOfRange(_) => "That date is outside the supported range.".to_string(),
            Self::Source(_) => "Could not load events. Please try again.".to_string(),
        }
    }

    /// Whether the failure came from the event source rather than this crate.
    pub fn is_source_error(&self) -> bool {
        matches!(self, Self::Source(_))
    }
}
