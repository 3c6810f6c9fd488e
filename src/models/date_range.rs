use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::SelectionViolation;

/// Candidate stay, half-open: `[from, to)`. The guest departs on `to`, so the
/// checkout day itself is never an occupied night.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl DateRange {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Complete range with both ends set. Rejects a checkout on or before
    /// check-in.
    pub fn new(from: NaiveDate, to: NaiveDate) -> Result<Self, SelectionViolation> {
        if from >= to {
            return Err(SelectionViolation::Inverted);
        }
        Ok(Self {
            from: Some(from),
            to: Some(to),
        })
    }

    pub fn is_complete(&self) -> bool {
        self.from.is_some() && self.to.is_some()
    }

    pub fn bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        match (self.from, self.to) {
            (Some(from), Some(to)) => Some((from, to)),
            _ => None,
        }
    }

    /// Number of nights, or `None` while either end is unset.
    pub fn nights(&self) -> Option<u32> {
        self.bounds().map(|(from, to)| (to - from).num_days() as u32)
    }

    /// The nights a guest actually occupies: every day in `[from, to)`.
    pub fn occupied_nights(&self) -> impl Iterator<Item = NaiveDate> {
        let bounds = self.bounds();
        bounds
            .into_iter()
            .flat_map(|(from, to)| nights_in(from, to))
    }
}

/// Iterate the occupied nights of `[from, to)`. Empty when `from >= to`.
pub fn nights_in(from: NaiveDate, to: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    from.iter_days().take_while(move |day| *day < to)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn test_rejects_inverted_range() {
        assert_eq!(
            DateRange::new(date("2024-07-04"), date("2024-07-01")),
            Err(SelectionViolation::Inverted)
        );
        assert_eq!(
            DateRange::new(date("2024-07-01"), date("2024-07-01")),
            Err(SelectionViolation::Inverted)
        );
    }

    #[test]
    fn test_nights_count() {
        let range = DateRange::new(date("2024-07-01"), date("2024-07-04")).unwrap();
        assert_eq!(range.nights(), Some(3));
        assert_eq!(DateRange::empty().nights(), None);
    }

    #[test]
    fn test_occupied_nights_exclude_checkout_day() {
        let range = DateRange::new(date("2024-07-01"), date("2024-07-04")).unwrap();
        let nights: Vec<NaiveDate> = range.occupied_nights().collect();
        assert_eq!(
            nights,
            vec![date("2024-07-01"), date("2024-07-02"), date("2024-07-03")]
        );
    }

    #[test]
    fn test_nights_in_empty_for_inverted_bounds() {
        assert_eq!(nights_in(date("2024-07-04"), date("2024-07-01")).count(), 0);
    }
}
