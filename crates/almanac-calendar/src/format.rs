//! Header and axis labels for calendar views.

use chrono::{DateTime, Datelike, NaiveDate, Utc, Weekday};

use crate::types::Event;

/// Month-view title, e.g. "March 2024".
pub fn month_title(date: NaiveDate) -> String {
    date.format("%B %Y").to_string()
}

/// Week-view title, e.g. "Mar 3 – 9, 2024".
///
/// When the week spans a month boundary both months are spelled out, with
/// the year taken from the week's end ("Dec 29 – Jan 4, 2025").
pub fn week_title(start: NaiveDate, end: NaiveDate) -> String {
    if start.year() == end.year() && start.month() == end.month() {
        format!(
            "{} – {}, {}",
            start.format("%b %-d"),
            end.format("%-d"),
            end.format("%Y")
        )
    } else {
        format!("{} – {}", start.format("%b %-d"), end.format("%b %-d, %Y"))
    }
}

/// Day-view title, e.g. "Sunday, March 10, 2024".
pub fn day_title(date: NaiveDate) -> String {
    date.format("%A, %B %-d, %Y").to_string()
}

/// Short date label, e.g. "Mar 10, 2024".
pub fn short_date(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

/// Twelve-hour time label, e.g. "9:00 AM".
pub fn time_label(instant: DateTime<Utc>) -> String {
    instant.format("%-I:%M %p").to_string()
}

/// Time range for an event listing, e.g. "9:00 AM – 10:30 AM".
///
/// All-day events get the literal label "All day" instead of a range.
pub fn event_time_label(event: &Event) -> String {
    if event.all_day {
        "All day".to_string()
    } else {
        format!("{} – {}", time_label(event.start), time_label(event.end))
    }
}

/// The 24 "00:00".."23:00" axis labels timed views draw their hour rows from.
pub fn hour_slots() -> Vec<String> {
    (0..24).map(|hour| format!("{:02}:00", hour)).collect()
}

/// Three-letter weekday column headers beginning at `week_starts_on`.
pub fn weekday_headers(week_starts_on: Weekday) -> Vec<&'static str> {
    let mut headers = Vec::with_capacity(7);
    let mut day = week_starts_on;
    for _ in 0..7 {
        headers.push(weekday_label(day));
        day = day.succ();
    }
    headers
}

fn weekday_label(day: Weekday) -> &'static str {
    match day {
        Weekday::Sun => "Sun",
        Weekday::Mon => "Mon",
        Weekday::Tue => "Tue",
        Weekday::Wed => "Wed",
        Weekday::Thu => "Thu",
        Weekday::Fri => "Fri",
        Weekday::Sat => "Sat",
    }
}
