//! Calendar-day windows used for due-today retrieval.

use super::TaskDomainError;
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime, Offset, TimeDelta, Utc};

/// Inclusive `[start, end]` range covering one calendar day.
///
/// The day is measured in a single fixed UTC offset so that every caller
/// agrees on where midnight falls. Both bounds are stored as UTC instants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DueWindow {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl DueWindow {
    /// Builds the window for the calendar day containing `reference`, with
    /// day boundaries taken in `offset`.
    ///
    /// `start` is local midnight; `end` is one nanosecond before the next
    /// local midnight.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::WindowOutOfRange`] when either boundary
    /// falls outside the representable date range.
    pub fn containing(
        reference: DateTime<Utc>,
        offset: FixedOffset,
    ) -> Result<Self, TaskDomainError> {
        let out_of_range = || TaskDomainError::WindowOutOfRange(reference);
        let day = reference.with_timezone(&offset).date_naive();

        let start = local_midnight(day, offset).ok_or_else(out_of_range)?;
        let end = day
            .succ_opt()
            .and_then(|next_day| local_midnight(next_day, offset))
            .and_then(|next_start| next_start.checked_sub_signed(TimeDelta::nanoseconds(1)))
            .ok_or_else(out_of_range)?;

        Ok(Self { start, end })
    }

    /// Builds the window for the UTC calendar day containing `reference`.
    ///
    /// # Errors
    ///
    /// See [`DueWindow::containing`].
    pub fn utc_day(reference: DateTime<Utc>) -> Result<Self, TaskDomainError> {
        Self::containing(reference, Utc.fix())
    }

    /// Returns the first instant of the day.
    #[must_use]
    pub const fn start(&self) -> DateTime<Utc> {
        self.start
    }

    /// Returns the last instant of the day.
    #[must_use]
    pub const fn end(&self) -> DateTime<Utc> {
        self.end
    }

    /// Returns whether `instant` lies within the window, bounds included.
    #[must_use]
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start <= instant && instant <= self.end
    }
}

fn local_midnight(day: NaiveDate, offset: FixedOffset) -> Option<DateTime<Utc>> {
    day.and_time(NaiveTime::MIN)
        .and_local_timezone(offset)
        .single()
        .map(|local| local.with_timezone(&Utc))
}
