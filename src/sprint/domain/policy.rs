//! Scheduling policy applied to sprint date ranges.

/// Configuration for sprint scheduling rules.
///
/// # Examples
///
/// ```
/// use sprintboard::sprint::domain::SprintPolicy;
///
/// let policy = SprintPolicy::default();
/// assert_eq!(policy.max_duration_days, 30);
/// assert_eq!(policy.default_length_days, 14);
///
/// let weekly = SprintPolicy::default().with_default_length_days(7);
/// assert_eq!(weekly.default_length_days, 7);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SprintPolicy {
    /// Longest permitted inclusive sprint duration in days.
    pub max_duration_days: u32,
    /// Inclusive length used when a sprint is created without an end date.
    pub default_length_days: u32,
}

impl Default for SprintPolicy {
    fn default() -> Self {
        Self {
            max_duration_days: 30,
            default_length_days: 14,
        }
    }
}

impl SprintPolicy {
    /// Creates a policy for teams running one-week iterations.
    #[must_use]
    pub const fn weekly() -> Self {
        Self {
            max_duration_days: 7,
            default_length_days: 7,
        }
    }

    /// Overrides the maximum duration.
    #[must_use]
    pub const fn with_max_duration_days(mut self, days: u32) -> Self {
        self.max_duration_days = days;
        self
    }

    /// Overrides the default sprint length.
    #[must_use]
    pub const fn with_default_length_days(mut self, days: u32) -> Self {
        self.default_length_days = days;
        self
    }
}
