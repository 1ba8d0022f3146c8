//! View granularities and reference-date navigation.

use chrono::{Duration, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use almanac_core::config::DefaultView;

use crate::error::CalendarError;

/// Calendar view granularity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum View {
    Month,
    Week,
    Day,
}

impl From<DefaultView> for View {
    fn from(default_view: DefaultView) -> Self {
        match default_view {
            DefaultView::Month => Self::Month,
            DefaultView::Week => Self::Week,
            DefaultView::Day => Self::Day,
        }
    }
}

/// Navigation action over the reference date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavAction {
    Previous,
    Next,
    Today,
}

impl View {
    /// Apply a navigation action to the reference date.
    ///
    /// Month views step by a calendar month, clamping the day-of-month when
    /// the target month is shorter. Week views step by 7 days and day views
    /// by one day. `Today` jumps to the caller-supplied `today`.
    ///
    /// # Errors
    /// Returns `DateOutOfRange` when the step leaves the representable range.
    pub fn navigate(
        self,
        reference: NaiveDate,
        action: NavAction,
        today: NaiveDate,
    ) -> Result<NaiveDate, CalendarError> {
        match action {
            NavAction::Today => Ok(today),
            NavAction::Previous => self.step_back(reference),
            NavAction::Next => self.step_forward(reference),
        }
    }

    fn step_back(self, reference: NaiveDate) -> Result<NaiveDate, CalendarError> {
        let stepped = match self {
            View::Month => reference.checked_sub_months(Months::new(1)),
            View::Week => reference.checked_sub_signed(Duration::days(7)),
            View::Day => reference.checked_sub_signed(Duration::days(1)),
        };
        stepped.ok_or_else(|| CalendarError::out_of_range(reference))
    }

    fn step_forward(self, reference: NaiveDate) -> Result<NaiveDate, CalendarError> {
        let stepped = match self {
            View::Month => reference.checked_add_months(Months::new(1)),
            View::Week => reference.checked_add_signed(Duration::days(7)),
            View::Day => reference.checked_add_signed(Duration::days(1)),
        };
        stepped.ok_or_else(|| CalendarError::out_of_range(reference))
    }
}
