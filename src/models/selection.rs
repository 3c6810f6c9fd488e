use std::collections::BTreeSet;

use chrono::NaiveDate;

use crate::errors::SelectionViolation;
use crate::models::date_range::{nights_in, DateRange};
use crate::models::room::StayConstraint;

/// Click-driven date-range selection for one room's calendar.
///
/// Rules are checked in order: past-date, blocked-date, stay-length. Any
/// violation resets to `Empty` and is returned to the caller so the UI can
/// show why the selection vanished. The checkout day is never required to be
/// free; the guest departs before the next check-in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RangeSelection {
    #[default]
    Empty,
    Partial {
        from: NaiveDate,
    },
    Complete {
        from: NaiveDate,
        to: NaiveDate,
    },
}

impl RangeSelection {
    pub fn new() -> Self {
        Self::Empty
    }

    pub fn as_range(&self) -> DateRange {
        match *self {
            Self::Empty => DateRange::empty(),
            Self::Partial { from } => DateRange {
                from: Some(from),
                to: None,
            },
            Self::Complete { from, to } => DateRange {
                from: Some(from),
                to: Some(to),
            },
        }
    }

    pub fn is_complete(&self) -> bool {
        matches!(self, Self::Complete { .. })
    }

    pub fn reset(&mut self) {
        *self = Self::Empty;
    }

    /// Apply one calendar click and return the resulting state.
    ///
    /// While a check-in is selected, a click after it attempts to complete
    /// the range; a click at or before it restarts the selection from the
    /// clicked date. Clicking the selected check-in again deselects it.
    pub fn click(
        &mut self,
        date: NaiveDate,
        today: NaiveDate,
        blocked: &BTreeSet<NaiveDate>,
        constraint: &StayConstraint,
    ) -> Result<Self, SelectionViolation> {
        match *self {
            Self::Partial { from } if date == from => {
                *self = Self::Empty;
                Ok(*self)
            }
            Self::Partial { from } if date > from => {
                self.complete(from, date, blocked, constraint)
            }
            _ => self.start(date, today, blocked),
        }
    }

    fn start(
        &mut self,
        from: NaiveDate,
        today: NaiveDate,
        blocked: &BTreeSet<NaiveDate>,
    ) -> Result<Self, SelectionViolation> {
        *self = Self::Empty;
        if from < today {
            return Err(SelectionViolation::PastDate);
        }
        if blocked.contains(&from) {
            return Err(SelectionViolation::DateBlocked);
        }
        *self = Self::Partial { from };
        Ok(*self)
    }

    fn complete(
        &mut self,
        from: NaiveDate,
        to: NaiveDate,
        blocked: &BTreeSet<NaiveDate>,
        constraint: &StayConstraint,
    ) -> Result<Self, SelectionViolation> {
        *self = Self::Empty;
        // Half-open: every night in [from, to) must be free, `to` itself may
        // carry another guest's check-in.
        if nights_in(from, to).any(|night| blocked.contains(&night)) {
            return Err(SelectionViolation::DateBlocked);
        }
        let nights = (to - from).num_days() as u32;
        if nights < constraint.min_nights {
            return Err(SelectionViolation::StayTooShort {
                min: constraint.min_nights,
            });
        }
        if nights > constraint.max_nights {
            return Err(SelectionViolation::StayTooLong {
                max: constraint.max_nights,
            });
        }
        *self = Self::Complete { from, to };
        Ok(*self)
    }
}
