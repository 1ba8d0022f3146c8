//! Calendar grid projection for Almanac.
//!
//! Projects a set of events onto month/week/day grids and computes the
//! vertical geometry timed views render events with.

pub mod error;
pub mod format;
pub mod grid;
pub mod placement;
pub mod source;
pub mod types;
pub mod view;

pub use error::CalendarError;
pub use grid::{events_on_day, DayCell, GridProjector, InvalidEvent, Projection};
pub use placement::{current_time_offset, place_event, EventPlacement, MIN_VISIBLE_MINUTES};
pub use source::{EventSource, InMemoryEventSource};
pub use types::{Event, EventKind};
pub use view::{NavAction, View};
