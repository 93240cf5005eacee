//! Unit tests for the sprint module.


use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};
use mockable::Clock;

/// Clock pinned to a fixed instant.
#[derive(Debug, Clone, Copy)]
pub(super) struct FixedClock(DateTime<Utc>);

impl FixedClock {
    /// Pins the clock to noon UTC on the given day.
    pub(super) fn at(year: i32, month: u32, day: u32) -> Self {
        let instant = Utc
            .with_ymd_and_hms(year, month, day, 12, 0, 0)
            .single()
            .expect("valid fixed clock instant");
        Self(instant)
    }

    /// Returns the local calendar date the clock reports.
    pub(super) fn today(&self) -> NaiveDate {
        self.local().date_naive()
    }
}

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.0.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Builds a calendar date, panicking on invalid input.
pub(super) fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid calendar date")
}
