//! Event source trait and the in-memory implementation.
//!
//! The projector reads events through `EventSource`; persistence and
//! transport live behind it, outside this crate.

use crate::error::CalendarError;
use crate::types::Event;

/// Read-only supply of calendar events.
///
/// Implementations are `Send` so a source can be handed to whichever thread
/// drives rendering. The projector never writes through this interface;
/// event creation and editing belong to the service that owns the data.
pub trait EventSource: Send {
    /// Fetch the current set of events visible to the user.
    ///
    /// # Errors
    /// Returns `CalendarError::Source` when the underlying store or service
    /// cannot produce the events.
    fn fetch_events(&self) -> Result<Vec<Event>, CalendarError>;
}

/// Fixed event collection, for tests and embedding.
#[derive(Debug, Clone, Default)]
pub struct InMemoryEventSource {
    events: Vec<Event>,
}

impl InMemoryEventSource {
    pub fn new(events: Vec<Event>) -> Self {
        Self { events }
    }
}

impl EventSource for InMemoryEventSource {
    fn fetch_events(&self) -> Result<Vec<Event>, CalendarError> {
        Ok(self.events.clone())
    }
}
