//! End-to-end projection tests: grid shapes across many months, event
//! assignment, placement geometry, malformed-event policies, and navigation.

#![allow(clippy::unwrap_used)]

use almanac_calendar::grid::{events_on_day, GridProjector};
use almanac_calendar::placement::{current_time_offset, place_event, MIN_VISIBLE_MINUTES};
use almanac_calendar::source::{EventSource, InMemoryEventSource};
use almanac_calendar::types::{Event, EventKind, DEFAULT_EVENT_COLOR};
use almanac_calendar::view::{NavAction, View};
use almanac_core::config::{CalendarConfig, InvalidEventPolicy, WeekStart};
use chrono::{DateTime, Datelike, Duration, NaiveDate, TimeZone, Utc, Weekday};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn create_test_event(id: &str, start: DateTime<Utc>, end: DateTime<Utc>) -> Event {
    Event {
        id: id.to_string(),
        title: format!("Event {}", id),
        description: None,
        start,
        end,
        all_day: false,
        kind: EventKind::Event,
        color: DEFAULT_EVENT_COLOR.to_string(),
    }
}

#[test]
fn month_grids_cover_full_weeks_for_a_whole_year() {
    let projector = GridProjector::default();

    for month in 1..=12 {
        let days = projector
            .grid_days(date(2024, month, 15), View::Month)
            .unwrap();

        assert_eq!(days.len() % 7, 0, "month {} not a whole number of weeks", month);
        assert_eq!(days[0].weekday(), Weekday::Sun);
        assert_eq!(days.last().unwrap().weekday(), Weekday::Sat);

        // The grid brackets the month.
        let next_first = if month == 12 {
            date(2025, 1, 1)
        } else {
            date(2024, month + 1, 1)
        };
        let month_last = next_first.pred_opt().unwrap();
        assert!(days[0] <= date(2024, month, 1));
        assert!(days.contains(&date(2024, month, 1)));
        assert!(days.contains(&month_last));

        // Contiguous, no gaps.
        for pair in days.windows(2) {
            assert_eq!(pair[1] - pair[0], Duration::days(1));
        }
    }
}

#[test]
fn week_grids_contain_their_reference_date() {
    let projector = GridProjector::default();

    for offset in 0..14 {
        let reference = date(2024, 3, 1) + Duration::days(offset);
        let days = projector.grid_days(reference, View::Week).unwrap();

        assert_eq!(days.len(), 7);
        assert_eq!(days[0].weekday(), Weekday::Sun);
        assert!(days.contains(&reference));
        assert_eq!(*days.last().unwrap() - days[0], Duration::days(6));
    }
}

#[test]
fn day_grid_is_exactly_the_reference() {
    let projector = GridProjector::default();
    let days = projector.grid_days(date(2024, 3, 10), View::Day).unwrap();
    assert_eq!(days, vec![date(2024, 3, 10)]);
}

#[test]
fn multi_day_event_appears_on_each_spanned_day() {
    let projector = GridProjector::default();
    let event = create_test_event(
        "span",
        Utc.with_ymd_and_hms(2024, 3, 10, 22, 0, 0).unwrap(),
        Utc.with_ymd_and_hms(2024, 3, 12, 2, 0, 0).unwrap(),
    );

    let projection = projector
        .project(date(2024, 3, 10), View::Month, date(2024, 3, 10), &[event])
        .unwrap();

    let days_with_event: Vec<NaiveDate> = projection
        .cells
        .iter()
        .filter(|c| !c.events.is_empty())
        .map(|c| c.date)
        .collect();

    assert_eq!(
        days_with_event,
        vec![date(2024, 3, 10), date(2024, 3, 11), date(2024, 3, 12)]
    );
}

#[test]
fn multi_day_event_placement_windows() {
    let event = create_test_event(
        "span",
        Utc.with_ymd_and_hms(2024, 3, 10, 22, 0, 0).unwrap(),
        Utc.with_ymd_and_hms(2024, 3, 12, 2, 0, 0).unwrap(),
    );

    let middle = place_event(&event, date(2024, 3, 11)).unwrap();
    assert_eq!(middle.top_offset_minutes, 0);
    assert_eq!(middle.height_minutes, 1440);

    let first = place_event(&event, date(2024, 3, 10)).unwrap();
    assert_eq!(first.top_offset_minutes, 22 * 60);
    assert_eq!(first.height_minutes, 2 * 60);
}

#[test]
fn morning_event_round_trip() {
    let event = create_test_event(
        "meeting",
        Utc.with_ymd_and_hms(2024, 3, 10, 9, 0, 0).unwrap(),
        Utc.with_ymd_and_hms(2024, 3, 10, 10, 30, 0).unwrap(),
    );

    let on_day = events_on_day(date(2024, 3, 10), std::slice::from_ref(&event));
    assert_eq!(on_day.len(), 1);

    let placement = place_event(&on_day[0], date(2024, 3, 10)).unwrap();
    assert_eq!(placement.top_offset_minutes, 540);
    assert_eq!(placement.height_minutes, 90);
}

#[test]
fn zero_duration_event_is_visible_on_one_day() {
    let instant = Utc.with_ymd_and_hms(2024, 3, 10, 9, 0, 0).unwrap();
    let event = create_test_event("blip", instant, instant);
    let events = vec![event];

    assert!(events_on_day(date(2024, 3, 9), &events).is_empty());
    assert!(events_on_day(date(2024, 3, 11), &events).is_empty());

    let on_day = events_on_day(date(2024, 3, 10), &events);
    assert_eq!(on_day.len(), 1);

    let placement = place_event(&on_day[0], date(2024, 3, 10)).unwrap();
    assert_eq!(placement.height_minutes, MIN_VISIBLE_MINUTES);
}

#[test]
fn malformed_event_is_reported_and_excluded() {
    let projector = GridProjector::default();
    let good = create_test_event(
        "good",
        Utc.with_ymd_and_hms(2024, 3, 10, 9, 0, 0).unwrap(),
        Utc.with_ymd_and_hms(2024, 3, 10, 10, 0, 0).unwrap(),
    );
    let bad = create_test_event(
        "bad",
        Utc.with_ymd_and_hms(2024, 3, 12, 10, 0, 0).unwrap(),
        Utc.with_ymd_and_hms(2024, 3, 12, 9, 0, 0).unwrap(),
    );

    let projection = projector
        .project(
            date(2024, 3, 10),
            View::Month,
            date(2024, 3, 10),
            &[good, bad],
        )
        .unwrap();

    assert_eq!(projection.invalid.len(), 1);
    assert_eq!(projection.invalid[0].id, "bad");

    let assigned_ids: Vec<&str> = projection
        .cells
        .iter()
        .flat_map(|c| c.events.iter())
        .map(|e| e.id.as_str())
        .collect();
    assert_eq!(assigned_ids, vec!["good"]);
}

#[test]
fn clamp_policy_keeps_malformed_event_visible() {
    let config = CalendarConfig {
        week_starts_on: WeekStart::Sunday,
        invalid_events: InvalidEventPolicy::Clamp,
        ..CalendarConfig::default()
    };
    let projector = GridProjector::from_config(&config);

    let bad = create_test_event(
        "bad",
        Utc.with_ymd_and_hms(2024, 3, 12, 10, 0, 0).unwrap(),
        Utc.with_ymd_and_hms(2024, 3, 12, 9, 0, 0).unwrap(),
    );

    let projection = projector
        .project(date(2024, 3, 10), View::Month, date(2024, 3, 10), &[bad])
        .unwrap();

    // Still reported, but clamped onto its start day.
    assert_eq!(projection.invalid.len(), 1);
    let cell = projection
        .cells
        .iter()
        .find(|c| c.date == date(2024, 3, 12))
        .unwrap();
    assert_eq!(cell.events.len(), 1);

    let placement = place_event(&cell.events[0], date(2024, 3, 12)).unwrap();
    assert_eq!(placement.top_offset_minutes, 600);
    assert_eq!(placement.height_minutes, MIN_VISIBLE_MINUTES);
}

#[test]
fn month_cell_overflow_honors_configured_limit() {
    let config = CalendarConfig::default();
    let projector = GridProjector::from_config(&config);

    let nine = Utc.with_ymd_and_hms(2024, 3, 10, 9, 0, 0).unwrap();
    let ten = Utc.with_ymd_and_hms(2024, 3, 10, 10, 0, 0).unwrap();
    let events: Vec<Event> = (0..5)
        .map(|i| create_test_event(&i.to_string(), nine, ten))
        .collect();

    let projection = projector
        .project(date(2024, 3, 10), View::Month, date(2024, 3, 10), &events)
        .unwrap();
    let cell = projection
        .cells
        .iter()
        .find(|c| c.date == date(2024, 3, 10))
        .unwrap();
    assert_eq!(cell.events.len(), 5);

    // Five events against the default limit of three leaves a "+2 more" remainder.
    let (visible, hidden) = cell.visible_events(config.month_cell_events);
    assert_eq!(visible.len(), config.month_cell_events);
    assert_eq!(hidden, 2);
}

#[test]
fn projection_is_idempotent() {
    let projector = GridProjector::default();
    let events = vec![
        create_test_event(
            "1",
            Utc.with_ymd_and_hms(2024, 3, 10, 9, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2024, 3, 10, 10, 0, 0).unwrap(),
        ),
        create_test_event(
            "2",
            Utc.with_ymd_and_hms(2024, 3, 11, 23, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2024, 3, 12, 1, 0, 0).unwrap(),
        ),
    ];

    let first = projector
        .project(date(2024, 3, 10), View::Month, date(2024, 3, 10), &events)
        .unwrap();
    let second = projector
        .project(date(2024, 3, 10), View::Month, date(2024, 3, 10), &events)
        .unwrap();

    assert_eq!(first, second);
}

#[test]
fn source_feeds_projection() {
    let source = InMemoryEventSource::new(vec![create_test_event(
        "from-source",
        Utc.with_ymd_and_hms(2024, 3, 10, 9, 0, 0).unwrap(),
        Utc.with_ymd_and_hms(2024, 3, 10, 10, 0, 0).unwrap(),
    )]);

    let events = source.fetch_events().unwrap();
    let projector = GridProjector::default();
    let projection = projector
        .project(date(2024, 3, 10), View::Day, date(2024, 3, 10), &events)
        .unwrap();

    assert_eq!(projection.cells.len(), 1);
    assert_eq!(projection.cells[0].events.len(), 1);
    assert!(projection.cells[0].is_today);
}

#[test]
fn navigation_round_trips() {
    let reference = date(2024, 3, 10);
    let today = date(2024, 6, 1);

    for view in [View::Month, View::Week, View::Day] {
        let forward = view.navigate(reference, NavAction::Next, today).unwrap();
        let back = view.navigate(forward, NavAction::Previous, today).unwrap();
        assert_eq!(back, reference, "{:?} navigation did not round-trip", view);

        assert_eq!(view.navigate(reference, NavAction::Today, today).unwrap(), today);
    }
}

#[test]
fn week_view_with_monday_start_still_contains_reference() {
    let config = CalendarConfig {
        week_starts_on: WeekStart::Monday,
        ..CalendarConfig::default()
    };
    let projector = GridProjector::from_config(&config);

    let reference = date(2024, 3, 10); // a Sunday
    let days = projector.grid_days(reference, View::Week).unwrap();

    assert_eq!(days[0], date(2024, 3, 4));
    assert_eq!(*days.last().unwrap(), reference);
    assert!(days.contains(&reference));
}

#[test]
fn current_time_indicator_only_on_matching_day() {
    let now = Utc.with_ymd_and_hms(2024, 3, 10, 14, 45, 0).unwrap();

    assert_eq!(current_time_offset(now, date(2024, 3, 10)), Some(885));
    assert_eq!(current_time_offset(now, date(2024, 3, 11)), None);
}

#[test]
fn far_future_reference_reports_out_of_range() {
    let projector = GridProjector::default();
    let result = projector.project(NaiveDate::MAX, View::Month, date(2024, 3, 10), &[]);
    assert!(result.is_err());
}
