//! Inclusive date range covered by a sprint.

use super::{SprintDomainError, SprintPolicy};
use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

/// Validated inclusive `[start, end]` date range.
///
/// Deserialising rejects reversed bounds. The maximum duration belongs to
/// the policy in force when dates are set, so stored periods are not
/// re-checked against it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "PeriodBounds")]
pub struct SprintPeriod {
    start: NaiveDate,
    end: NaiveDate,
}

/// Unchecked wire form of [`SprintPeriod`].
#[derive(Deserialize)]
struct PeriodBounds {
    start: NaiveDate,
    end: NaiveDate,
}

impl TryFrom<PeriodBounds> for SprintPeriod {
    type Error = SprintDomainError;

    fn try_from(bounds: PeriodBounds) -> Result<Self, Self::Error> {
        Self::ordered(bounds.start, bounds.end)
    }
}

impl SprintPeriod {
    /// Creates a period after checking ordering and maximum duration.
    ///
    /// # Errors
    ///
    /// Returns [`SprintDomainError::EndBeforeStart`] when `end < start` and
    /// [`SprintDomainError::DurationExceeded`] when the inclusive length is
    /// longer than `policy.max_duration_days`.
    pub fn new(
        start: NaiveDate,
        end: NaiveDate,
        policy: &SprintPolicy,
    ) -> Result<Self, SprintDomainError> {
        let period = Self::ordered(start, end)?;
        let days = (end - start).num_days() + 1;
        if days > i64::from(policy.max_duration_days) {
            return Err(SprintDomainError::DurationExceeded {
                days,
                max_days: policy.max_duration_days,
            });
        }
        Ok(period)
    }

    fn ordered(start: NaiveDate, end: NaiveDate) -> Result<Self, SprintDomainError> {
        if end < start {
            return Err(SprintDomainError::EndBeforeStart { start, end });
        }
        Ok(Self { start, end })
    }

    /// Creates a period of the policy's default length beginning at `start`.
    ///
    /// # Errors
    ///
    /// Returns the same errors as [`SprintPeriod::new`] when the policy's
    /// default length is itself out of bounds.
    pub fn starting(start: NaiveDate, policy: &SprintPolicy) -> Result<Self, SprintDomainError> {
        let extra_days = u64::from(policy.default_length_days.saturating_sub(1));
        let end = start.checked_add_days(Days::new(extra_days)).unwrap_or(start);
        Self::new(start, end, policy)
    }

    /// Returns the first day of the sprint.
    #[must_use]
    pub const fn start(&self) -> NaiveDate {
        self.start
    }

    /// Returns the last day of the sprint.
    #[must_use]
    pub const fn end(&self) -> NaiveDate {
        self.end
    }

    /// Returns the inclusive number of days covered.
    #[must_use]
    pub fn duration_days(&self) -> u32 {
        let days = (self.end - self.start).num_days() + 1;
        u32::try_from(days).unwrap_or(0)
    }

    /// Returns whether the two ranges share at least one day.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        other.start <= self.end && other.end >= self.start
    }

    /// Returns the whole days left between `today` and the last day.
    ///
    /// Zero once the end date has been reached or passed.
    #[must_use]
    pub fn days_remaining_from(&self, today: NaiveDate) -> u32 {
        let days = (self.end - today).num_days().max(0);
        u32::try_from(days).unwrap_or(u32::MAX)
    }
}
