//! Grid projection: which days a view shows and which events land on each day.
//!
//! Month grids span whole weeks covering the month. Week grids span the
//! week containing the reference date, and day grids are a single date.
//! Events are assigned to every day their effective interval overlaps.

use chrono::{DateTime, Datelike, Duration, Months, NaiveDate, NaiveTime, Utc, Weekday};
use serde::{Deserialize, Serialize};

use almanac_core::config::{CalendarConfig, InvalidEventPolicy, WeekStart};

use crate::error::CalendarError;
use crate::types::{Event, DAY_END};
use crate::view::View;

/// One day slot in a rendered grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayCell {
    pub date: NaiveDate,
    /// Whether this day falls in the reference month. Month views gray out
    /// the leading and trailing neighbor days.
    pub in_view_month: bool,
    pub is_today: bool,
    /// Events overlapping this day, ordered by effective start then id.
    pub events: Vec<Event>,
}

impl DayCell {
    /// Split events into the visible prefix and the hidden remainder count,
    /// for month cells that cap how many entries they list.
    pub fn visible_events(&self, limit: usize) -> (&[Event], usize) {
        if self.events.len() <= limit {
            (&self.events, 0)
        } else {
            (&self.events[..limit], self.events.len() - limit)
        }
    }
}

/// A malformed event reported by screening.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvalidEvent {
    pub id: String,
    pub message: String,
}

/// A projected grid plus any data findings produced while building it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projection {
    pub view: View,
    pub cells: Vec<DayCell>,
    /// Malformed events found while screening. The caller decides how to
    /// surface these (the grid itself is already consistent).
    pub invalid: Vec<InvalidEvent>,
}

/// Projects events onto day grids.
///
/// Stateless: every method is a pure function of its arguments and the
/// projector's settings, so repeated calls with the same inputs produce
/// identical output.
#[derive(Debug, Clone, Copy)]
pub struct GridProjector {
    week_starts_on: Weekday,
    invalid_events: InvalidEventPolicy,
}

impl Default for GridProjector {
    fn default() -> Self {
        Self::new(Weekday::Sun, InvalidEventPolicy::default())
    }
}

impl GridProjector {
    pub fn new(week_starts_on: Weekday, invalid_events: InvalidEventPolicy) -> Self {
        Self {
            week_starts_on,
            invalid_events,
        }
    }

    /// Build a projector from the calendar section of the app config.
    pub fn from_config(config: &CalendarConfig) -> Self {
        Self::new(
            week_start_day(config.week_starts_on),
            config.invalid_events,
        )
    }

    /// The dates shown for `view` at `reference`, in display order.
    ///
    /// # Errors
    /// Returns `DateOutOfRange` when the grid would step outside the
    /// representable date range.
    pub fn grid_days(
        &self,
        reference: NaiveDate,
        view: View,
    ) -> Result<Vec<NaiveDate>, CalendarError> {
        match view {
            View::Month => self.month_days(reference),
            View::Week => self.week_days(reference),
            View::Day => Ok(vec![reference]),
        }
    }

    /// Project `events` onto the grid for `view` at `reference`.
    ///
    /// `today` is passed in rather than read from the clock, so the result
    /// is a pure function of the arguments.
    ///
    /// # Errors
    /// Returns `DateOutOfRange` when the grid cannot be computed.
    pub fn project(
        &self,
        reference: NaiveDate,
        view: View,
        today: NaiveDate,
        events: &[Event],
    ) -> Result<Projection, CalendarError> {
        let (screened, invalid) = self.screen_events(events);
        let days = self.grid_days(reference, view)?;

        let view_month = (reference.year(), reference.month());
        let cells: Vec<DayCell> = days
            .into_iter()
            .map(|date| DayCell {
                date,
                in_view_month: (date.year(), date.month()) == view_month,
                is_today: date == today,
                events: events_on_day(date, &screened),
            })
            .collect();

        tracing::debug!(
            "Projected {:?} view at {}: {} cells, {} malformed events",
            view,
            reference,
            cells.len(),
            invalid.len()
        );

        Ok(Projection {
            view,
            cells,
            invalid,
        })
    }

    /// Apply the invalid-event policy.
    ///
    /// Returns the events eligible for assignment plus one finding per
    /// malformed event (`end` before `start`). Under `Exclude` the event is
    /// dropped; under `Clamp` it is kept with its end pulled up to its start.
    pub fn screen_events(&self, events: &[Event]) -> (Vec<Event>, Vec<InvalidEvent>) {
        let mut kept = Vec::with_capacity(events.len());
        let mut invalid = Vec::new();

        for event in events {
            if !event.is_malformed() {
                kept.push(event.clone());
                continue;
            }

            tracing::warn!(
                "Malformed event {}: end {} is before start {}",
                event.id,
                event.end,
                event.start
            );
            invalid.push(InvalidEvent {
                id: event.id.clone(),
                message: format!("end {} is before start {}", event.end, event.start),
            });

            if self.invalid_events == InvalidEventPolicy::Clamp {
                let mut clamped = event.clone();
                clamped.end = clamped.start;
                kept.push(clamped);
            }
        }

        (kept, invalid)
    }

    fn month_days(&self, reference: NaiveDate) -> Result<Vec<NaiveDate>, CalendarError> {
        let month_start = first_of_month(reference)?;
        let month_end = last_of_month(reference)?;
        let grid_start = self.align_to_week_start(month_start)?;
        let grid_end = self.align_to_week_end(month_end)?;
        Ok(collect_days(grid_start, grid_end))
    }

    fn week_days(&self, reference: NaiveDate) -> Result<Vec<NaiveDate>, CalendarError> {
        let start = self.align_to_week_start(reference)?;
        let end = start
            .checked_add_signed(Duration::days(6))
            .ok_or_else(|| CalendarError::out_of_range(reference))?;
        Ok(collect_days(start, end))
    }

    /// The week-start-aligned date on or before `date`.
    fn align_to_week_start(&self, date: NaiveDate) -> Result<NaiveDate, CalendarError> {
        let offset = days_past_week_start(date.weekday(), self.week_starts_on);
        date.checked_sub_signed(Duration::days(i64::from(offset)))
            .ok_or_else(|| CalendarError::out_of_range(date))
    }

    /// The last day of the week containing `date`.
    fn align_to_week_end(&self, date: NaiveDate) -> Result<NaiveDate, CalendarError> {
        let offset = 6 - days_past_week_start(date.weekday(), self.week_starts_on);
        date.checked_add_signed(Duration::days(i64::from(offset)))
            .ok_or_else(|| CalendarError::out_of_range(date))
    }
}

/// Events whose effective interval overlaps `day`, ordered by effective
/// start with ties broken by ascending id.
///
/// Overlap is inclusive on both boundaries: an event touching any second of
/// the day belongs to it, which is what puts multi-day events in every cell
/// they span. Malformed events are skipped here; run them through
/// `GridProjector::screen_events` first to report or clamp them.
pub fn events_on_day(day: NaiveDate, events: &[Event]) -> Vec<Event> {
    let day_start = day_start(day);
    let day_end = day_end(day);

    let mut on_day: Vec<Event> = events
        .iter()
        .filter(|e| !e.is_malformed())
        .filter(|e| e.effective_start() <= day_end && e.effective_end() >= day_start)
        .cloned()
        .collect();

    on_day.sort_by(|a, b| {
        a.effective_start()
            .cmp(&b.effective_start())
            .then_with(|| a.id.cmp(&b.id))
    });
    on_day
}

/// Midnight at the start of `day`, in UTC.
pub(crate) fn day_start(day: NaiveDate) -> DateTime<Utc> {
    day.and_time(NaiveTime::MIN).and_utc()
}

/// The last second of `day`, in UTC.
pub(crate) fn day_end(day: NaiveDate) -> DateTime<Utc> {
    day.and_time(DAY_END).and_utc()
}

/// Days from the configured week start to `day`, in 0..7.
fn days_past_week_start(day: Weekday, week_start: Weekday) -> u32 {
    (7 + day.num_days_from_sunday() - week_start.num_days_from_sunday()) % 7
}

fn week_start_day(week_starts_on: WeekStart) -> Weekday {
    match week_starts_on {
        WeekStart::Sunday => Weekday::Sun,
        WeekStart::Monday => Weekday::Mon,
    }
}

fn first_of_month(date: NaiveDate) -> Result<NaiveDate, CalendarError> {
    date.with_day(1)
        .ok_or_else(|| CalendarError::out_of_range(date))
}

fn last_of_month(date: NaiveDate) -> Result<NaiveDate, CalendarError> {
    let next_month = first_of_month(date)?
        .checked_add_months(Months::new(1))
        .ok_or_else(|| CalendarError::out_of_range(date))?;
    next_month
        .checked_sub_signed(Duration::days(1))
        .ok_or_else(|| CalendarError::out_of_range(date))
}

fn collect_days(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    let mut days = Vec::new();
    let mut day = start;
    while day <= end {
        days.push(day);
        match day.checked_add_signed(Duration::days(1)) {
            Some(next) => day = next,
            None => break,
        }
    }
    days
}
